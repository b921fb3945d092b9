//! Quiz aggregate: a titled quiz owned by a user with its multiple-choice questions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::not_blank;

/// Multiple-choice question belonging to a quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Question {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub quiz_id: i32,
    #[schema(example = "What is the capital of Sweden?")]
    pub question_text: String,
    #[schema(example = "Stockholm")]
    pub correct_answer: String,
    #[schema(example = "Stockholm")]
    pub alternative_one: String,
    #[schema(example = "Oslo")]
    pub alternative_two: String,
    #[schema(example = "Helsinki")]
    pub alternative_three: String,
    #[schema(example = "Copenhagen")]
    pub alternative_four: String,
}

/// Quiz with its questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Quiz {
    #[schema(example = 1)]
    pub id: i32,
    /// Owner of the quiz
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = "Nordic capitals")]
    pub title: String,
    #[schema(example = "How well do you know the north?")]
    pub description: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

/// Question content supplied when creating or replacing questions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct NewQuestion {
    #[validate(custom(function = "not_blank", message = "Question text is required"))]
    #[schema(example = "What is the capital of Sweden?")]
    pub question_text: String,
    #[validate(custom(function = "not_blank", message = "Correct answer is required"))]
    #[schema(example = "Stockholm")]
    pub correct_answer: String,
    #[validate(custom(function = "not_blank", message = "Alternative one is required"))]
    #[schema(example = "Stockholm")]
    pub alternative_one: String,
    #[validate(custom(function = "not_blank", message = "Alternative two is required"))]
    #[schema(example = "Oslo")]
    pub alternative_two: String,
    #[validate(custom(function = "not_blank", message = "Alternative three is required"))]
    #[schema(example = "Helsinki")]
    pub alternative_three: String,
    #[validate(custom(function = "not_blank", message = "Alternative four is required"))]
    #[schema(example = "Copenhagen")]
    pub alternative_four: String,
}

/// Data needed to persist a new quiz
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub questions: Vec<NewQuestion>,
}

/// Replacement of a quiz's editable fields.
///
/// `questions: None` leaves the existing questions untouched,
/// `Some(..)` replaces the whole set.
#[derive(Debug, Clone)]
pub struct UpdateQuiz {
    pub title: String,
    pub description: String,
    pub questions: Option<Vec<NewQuestion>>,
}
