//! Migration: Create quizzes table owned by users.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quizzes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quizzes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quizzes::UserId).integer().not_null())
                    .col(ColumnDef::new(Quizzes::Title).string().not_null())
                    .col(ColumnDef::new(Quizzes::Description).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quizzes_user_id")
                            .from(Quizzes::Table, Quizzes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quizzes_user_id")
                    .table(Quizzes::Table)
                    .col(Quizzes::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Quizzes::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Quizzes {
    Table,
    Id,
    UserId,
    Title,
    Description,
}
