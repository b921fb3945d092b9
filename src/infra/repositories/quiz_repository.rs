//! Quiz repository implementation.
//!
//! A quiz and its questions are always written together inside one
//! transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::entities::{question, quiz};
use super::entities::{QuestionActiveModel, QuestionEntity, QuizActiveModel, QuizEntity, QuizModel};
use crate::domain::{NewQuestion, NewQuiz, Question, Quiz, UpdateQuiz};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Quiz repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Find quiz (with questions) by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Quiz>>;

    /// List one page of quizzes ordered by id, with the total count
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Quiz>, u64)>;

    /// Insert a quiz and its questions
    async fn create(&self, quiz: NewQuiz) -> AppResult<Quiz>;

    /// Update quiz fields, replacing the questions when provided
    async fn update(&self, id: i32, changes: UpdateQuiz) -> AppResult<Quiz>;

    /// Delete a quiz and its questions, returning what was deleted
    async fn delete(&self, id: i32) -> AppResult<Quiz>;
}

/// Concrete implementation of QuizRepository
pub struct QuizStore {
    db: DatabaseConnection,
}

impl QuizStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn assemble(model: QuizModel, questions: Vec<Question>) -> Quiz {
    Quiz {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        description: model.description,
        questions,
    }
}

/// Load questions for the given quizzes, grouped by quiz id in insertion order.
async fn load_questions<C: ConnectionTrait>(
    conn: &C,
    quiz_ids: Vec<i32>,
) -> Result<HashMap<i32, Vec<Question>>, DbErr> {
    let mut grouped: HashMap<i32, Vec<Question>> = HashMap::new();
    if quiz_ids.is_empty() {
        return Ok(grouped);
    }

    let models = QuestionEntity::find()
        .filter(question::Column::QuizId.is_in(quiz_ids))
        .order_by_asc(question::Column::Id)
        .all(conn)
        .await?;

    for model in models {
        grouped
            .entry(model.quiz_id)
            .or_default()
            .push(Question::from(model));
    }
    Ok(grouped)
}

async fn insert_questions<C: ConnectionTrait>(
    conn: &C,
    quiz_id: i32,
    questions: Vec<NewQuestion>,
) -> Result<Vec<Question>, DbErr> {
    let mut inserted = Vec::with_capacity(questions.len());
    for q in questions {
        let model = QuestionActiveModel {
            quiz_id: Set(quiz_id),
            question_text: Set(q.question_text),
            correct_answer: Set(q.correct_answer),
            alternative_one: Set(q.alternative_one),
            alternative_two: Set(q.alternative_two),
            alternative_three: Set(q.alternative_three),
            alternative_four: Set(q.alternative_four),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        inserted.push(Question::from(model));
    }
    Ok(inserted)
}

#[async_trait]
impl QuizRepository for QuizStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Quiz>> {
        let Some(model) = QuizEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut questions = load_questions(&self.db, vec![model.id]).await?;
        let questions = questions.remove(&model.id).unwrap_or_default();
        Ok(Some(assemble(model, questions)))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Quiz>, u64)> {
        let offset = params.offset()?;
        let total = QuizEntity::find().count(&self.db).await?;
        let models = QuizEntity::find()
            .order_by_asc(quiz::Column::Id)
            .offset(offset)
            .limit(params.limit())
            .all(&self.db)
            .await?;

        let ids = models.iter().map(|m| m.id).collect();
        let mut questions = load_questions(&self.db, ids).await?;

        let quizzes = models
            .into_iter()
            .map(|m| {
                let qs = questions.remove(&m.id).unwrap_or_default();
                assemble(m, qs)
            })
            .collect();
        Ok((quizzes, total))
    }

    async fn create(&self, new_quiz: NewQuiz) -> AppResult<Quiz> {
        let txn = self.db.begin().await?;

        let model = QuizActiveModel {
            user_id: Set(new_quiz.user_id),
            title: Set(new_quiz.title),
            description: Set(new_quiz.description),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let questions = insert_questions(&txn, model.id, new_quiz.questions).await?;
        txn.commit().await?;

        Ok(assemble(model, questions))
    }

    async fn update(&self, id: i32, changes: UpdateQuiz) -> AppResult<Quiz> {
        let txn = self.db.begin().await?;

        let existing = QuizEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: QuizActiveModel = existing.into();
        active.title = Set(changes.title);
        active.description = Set(changes.description);
        let model = active.update(&txn).await?;

        let questions = match changes.questions {
            Some(replacement) => {
                QuestionEntity::delete_many()
                    .filter(question::Column::QuizId.eq(id))
                    .exec(&txn)
                    .await?;
                insert_questions(&txn, id, replacement).await?
            }
            None => load_questions(&txn, vec![id])
                .await?
                .remove(&id)
                .unwrap_or_default(),
        };

        txn.commit().await?;
        Ok(assemble(model, questions))
    }

    async fn delete(&self, id: i32) -> AppResult<Quiz> {
        let txn = self.db.begin().await?;

        let existing = QuizEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;
        let questions = load_questions(&txn, vec![id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        QuestionEntity::delete_many()
            .filter(question::Column::QuizId.eq(id))
            .exec(&txn)
            .await?;
        QuizEntity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(assemble(existing, questions))
    }
}
