//! `SeaORM` Entity for question_answers table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "question_answers"
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel, Serialize, Deserialize, ToSchema,
)]
#[schema(as = QuestionAnswer)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub question_id: Uuid,
    pub answer_text: String,
    pub answered_by: Option<Uuid>,
    pub is_featured: bool,
    pub likes: i32,
    pub answered_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    QuestionId,
    AnswerText,
    AnsweredBy,
    IsFeatured,
    Likes,
    AnsweredAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    Id,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Question,
    AnsweredBy,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::QuestionId => ColumnType::Uuid.def().unique(),
            Self::AnswerText => ColumnType::Text.def(),
            Self::AnsweredBy => ColumnType::Uuid.def().null(),
            Self::IsFeatured => ColumnType::Boolean.def(),
            Self::Likes => ColumnType::Integer.def(),
            Self::AnsweredAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Question => Entity::belongs_to(super::public_question::Entity)
                .from(Column::QuestionId)
                .to(super::public_question::Column::Id)
                .into(),
            Self::AnsweredBy => Entity::belongs_to(super::user::Entity)
                .from(Column::AnsweredBy)
                .to(super::user::Column::Id)
                .into(),
        }
    }
}

impl Related<super::public_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnsweredBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
