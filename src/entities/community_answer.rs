//! `SeaORM` Entity for community_answers table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "community_answers"
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel, Serialize, Deserialize, ToSchema,
)]
#[schema(as = CommunityAnswer)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub question_id: Uuid,
    pub answer_text: String,
    pub answered_by: Option<Uuid>,
    pub visitor_name: String,
    pub visitor_email: String,
    pub is_verified: bool,
    pub is_spam: bool,
    pub likes: i32,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    QuestionId,
    AnswerText,
    AnsweredBy,
    VisitorName,
    VisitorEmail,
    IsVerified,
    IsSpam,
    Likes,
    IpAddress,
    UserAgent,
    CreatedAt,
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
            Self::QuestionId => ColumnType::Uuid.def(),
            Self::AnswerText => ColumnType::Text.def(),
            Self::AnsweredBy => ColumnType::Uuid.def().null(),
            Self::VisitorName => ColumnType::String(StringLen::N(100)).def(),
            Self::VisitorEmail => ColumnType::String(StringLen::N(254)).def(),
            Self::IsVerified => ColumnType::Boolean.def(),
            Self::IsSpam => ColumnType::Boolean.def(),
            Self::Likes => ColumnType::Integer.def(),
            Self::IpAddress => ColumnType::String(StringLen::N(45)).def().null(),
            Self::UserAgent => ColumnType::Text.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
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
