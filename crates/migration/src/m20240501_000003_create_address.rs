//! Create `address` table with FK to `contact`.
//!
//! Deleting a contact removes its addresses (ON DELETE CASCADE).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(pk_auto(Address::Id))
                    .col(ColumnDef::new(Address::Street).string_len(255).null())
                    .col(ColumnDef::new(Address::City).string_len(100).null())
                    .col(ColumnDef::new(Address::Province).string_len(100).null())
                    .col(string_len(Address::Country, 100).not_null())
                    .col(string_len(Address::PostalCode, 10).not_null())
                    .col(integer(Address::ContactId).not_null())
                    .col(timestamp_with_time_zone(Address::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Address::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_address_contact")
                            .from(Address::Table, Address::ContactId)
                            .to(Contact::Table, Contact::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Address::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Address { Table, Id, Street, City, Province, Country, PostalCode, ContactId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Contact { Table, Id }
