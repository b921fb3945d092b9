//! Migration: Create questions table belonging to quizzes.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_quizzes_table::Quizzes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::QuizId).integer().not_null())
                    .col(ColumnDef::new(Questions::QuestionText).text().not_null())
                    .col(ColumnDef::new(Questions::CorrectAnswer).string().not_null())
                    .col(ColumnDef::new(Questions::AlternativeOne).string().not_null())
                    .col(ColumnDef::new(Questions::AlternativeTwo).string().not_null())
                    .col(ColumnDef::new(Questions::AlternativeThree).string().not_null())
                    .col(ColumnDef::new(Questions::AlternativeFour).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_questions_quiz_id")
                            .from(Questions::Table, Questions::QuizId)
                            .to(Quizzes::Table, Quizzes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_questions_quiz_id")
                    .table(Questions::Table)
                    .col(Questions::QuizId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Questions::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Questions {
    Table,
    Id,
    QuizId,
    QuestionText,
    CorrectAnswer,
    AlternativeOne,
    AlternativeTwo,
    AlternativeThree,
    AlternativeFour,
}
