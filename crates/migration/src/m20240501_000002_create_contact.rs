//! Create `contact` table with FK to `user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(pk_auto(Contact::Id))
                    .col(string_len(Contact::FirstName, 100).not_null())
                    .col(ColumnDef::new(Contact::LastName).string_len(100).null())
                    .col(ColumnDef::new(Contact::Email).string_len(100).null())
                    .col(ColumnDef::new(Contact::Phone).string_len(20).null())
                    .col(string_len(Contact::Username, 100).not_null())
                    .col(timestamp_with_time_zone(Contact::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Contact::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_user")
                            .from(Contact::Table, Contact::Username)
                            .to(User::Table, User::Username)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contact::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contact { Table, Id, FirstName, LastName, Email, Phone, Username, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Username }
