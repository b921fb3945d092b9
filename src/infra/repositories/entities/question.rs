//! Question database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Question;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub quiz_id: i32,
    pub question_text: String,
    pub correct_answer: String,
    pub alternative_one: String,
    pub alternative_two: String,
    pub alternative_three: String,
    pub alternative_four: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz::Entity",
        from = "Column::QuizId",
        to = "super::quiz::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Quiz,
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Question {
    fn from(model: Model) -> Self {
        Question {
            id: model.id,
            quiz_id: model.quiz_id,
            question_text: model.question_text,
            correct_answer: model.correct_answer,
            alternative_one: model.alternative_one,
            alternative_two: model.alternative_two,
            alternative_three: model.alternative_three,
            alternative_four: model.alternative_four,
        }
    }
}
