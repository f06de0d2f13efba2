//! Migration: Create the admins and donors profile tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .col(ColumnDef::new(Admins::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Admins::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::IsRoot)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admins_user_id")
                            .from(Admins::Table, Admins::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Donors::Table)
                    .col(ColumnDef::new(Donors::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Donors::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Donors::BirthDate).date().not_null())
                    .col(ColumnDef::new(Donors::Gender).string().not_null())
                    .col(ColumnDef::new(Donors::Phone).string().not_null())
                    .col(ColumnDef::new(Donors::Cpf).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donors_user_id")
                            .from(Donors::Table, Donors::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Admins {
    Table,
    Id,
    UserId,
    IsRoot,
}

#[derive(Iden)]
enum Donors {
    Table,
    Id,
    UserId,
    BirthDate,
    Gender,
    Phone,
    Cpf,
}
