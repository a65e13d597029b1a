//! `SeaORM` Entity for question_reports table

use super::sea_orm_active_enums::ReportType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "question_reports"
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel, Serialize, Deserialize, ToSchema,
)]
#[schema(as = QuestionReport)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub question_id: Uuid,
    pub answer_id: Option<Uuid>,
    pub report_type: ReportType,
    pub description: String,
    pub reporter_ip: String,
    pub reporter_email: String,
    pub is_resolved: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    QuestionId,
    AnswerId,
    ReportType,
    Description,
    ReporterIp,
    ReporterEmail,
    IsResolved,
    CreatedAt,
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
    Answer,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::QuestionId => ColumnType::Uuid.def(),
            Self::AnswerId => ColumnType::Uuid.def().null(),
            Self::ReportType => ColumnType::String(StringLen::N(20)).def(),
            Self::Description => ColumnType::Text.def(),
            Self::ReporterIp => ColumnType::String(StringLen::N(45)).def(),
            Self::ReporterEmail => ColumnType::String(StringLen::N(254)).def(),
            Self::IsResolved => ColumnType::Boolean.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
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
            Self::Answer => Entity::belongs_to(super::community_answer::Entity)
                .from(Column::AnswerId)
                .to(super::community_answer::Column::Id)
                .into(),
        }
    }
}

impl Related<super::public_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::community_answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
