//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod question;
pub mod quiz;
pub mod user;

pub use question::{ActiveModel as QuestionActiveModel, Entity as QuestionEntity};
pub use quiz::{ActiveModel as QuizActiveModel, Entity as QuizEntity, Model as QuizModel};
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity};
