use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Contact: every query is scoped by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_contact_username")
                    .table(Contact::Table)
                    .col(Contact::Username)
                    .to_owned(),
            )
            .await?;

        // Address: every query is scoped by parent contact
        manager
            .create_index(
                Index::create()
                    .name("idx_address_contact")
                    .table(Address::Table)
                    .col(Address::ContactId)
                    .to_owned(),
            )
            .await?;

        // User: token lookup on every authenticated request
        manager
            .create_index(
                Index::create()
                    .name("idx_user_token")
                    .table(User::Table)
                    .col(User::Token)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_contact_username").table(Contact::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_address_contact").table(Address::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_token").table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User { Table, Token }

#[derive(DeriveIden)]
enum Contact { Table, Username }

#[derive(DeriveIden)]
enum Address { Table, ContactId }
