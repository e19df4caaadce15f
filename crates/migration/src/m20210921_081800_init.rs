//! Initial schema.
//!
//! - `users`: identities known to the auth layer (name, email, bearer token)
//! - `events`: scheduled gatherings owned by their creator
//! - `invitations`: one row per invited (user, event) pair
//! - `expenditures`: cost lines attached to an event
//!
//! Every child row cascades on the deletion of its event or user.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Token,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    Name,
    Description,
    Venue,
    Time,
    Duration,
    CreatorId,
}

#[derive(Iden)]
enum Invitations {
    Table,
    Id,
    UserId,
    EventId,
    Status,
}

#[derive(Iden)]
enum Expenditures {
    Table,
    Id,
    Name,
    Organization,
    Quantity,
    UnitPrice,
    EventId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Token).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Events::Description).string_len(255).not_null())
                    .col(ColumnDef::new(Events::Venue).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Events::Time)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::Duration).integer().not_null())
                    .col(ColumnDef::new(Events::CreatorId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-events-creator_id")
                            .from(Events::Table, Events::CreatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-events-creator_id")
                    .table(Events::Table)
                    .col(Events::CreatorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invitations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invitations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invitations::UserId).integer().not_null())
                    .col(ColumnDef::new(Invitations::EventId).integer().not_null())
                    .col(
                        ColumnDef::new(Invitations::Status)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-invitations-user_id")
                            .from(Invitations::Table, Invitations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-invitations-event_id")
                            .from(Invitations::Table, Invitations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One invitation per (user, event).
        manager
            .create_index(
                Index::create()
                    .name("idx-invitations-user_id-event_id-unique")
                    .table(Invitations::Table)
                    .col(Invitations::UserId)
                    .col(Invitations::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-invitations-event_id")
                    .table(Invitations::Table)
                    .col(Invitations::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenditures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenditures::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenditures::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Expenditures::Organization)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenditures::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Expenditures::UnitPrice).integer().not_null())
                    .col(ColumnDef::new(Expenditures::EventId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenditures-event_id")
                            .from(Expenditures::Table, Expenditures::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenditures-event_id")
                    .table(Expenditures::Table)
                    .col(Expenditures::EventId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenditures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invitations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
