//! `SeaORM` Entity for public_questions table

use super::sea_orm_active_enums::QuestionStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "public_questions"
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel, Serialize, Deserialize, ToSchema,
)]
#[schema(as = PublicQuestion)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub visitor_name: String,
    pub visitor_email: String,
    pub visitor_phone: String,
    pub title: String,
    pub question_text: String,
    pub category_id: Option<Uuid>,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub status: QuestionStatus,
    pub view_count: i32,
    pub is_frequent: bool,
    pub slug: String,
    pub meta_description: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    VisitorName,
    VisitorEmail,
    VisitorPhone,
    Title,
    QuestionText,
    CategoryId,
    IpAddress,
    UserAgent,
    Status,
    ViewCount,
    IsFrequent,
    Slug,
    MetaDescription,
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
    Category,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::VisitorName => ColumnType::String(StringLen::N(100)).def(),
            Self::VisitorEmail => ColumnType::String(StringLen::N(254)).def(),
            Self::VisitorPhone => ColumnType::String(StringLen::N(20)).def(),
            Self::Title => ColumnType::String(StringLen::N(200)).def(),
            Self::QuestionText => ColumnType::Text.def(),
            Self::CategoryId => ColumnType::Uuid.def().null(),
            Self::IpAddress => ColumnType::String(StringLen::N(45)).def().null(),
            Self::UserAgent => ColumnType::Text.def(),
            Self::Status => ColumnType::String(StringLen::N(10)).def(),
            Self::ViewCount => ColumnType::Integer.def(),
            Self::IsFrequent => ColumnType::Boolean.def(),
            Self::Slug => ColumnType::String(StringLen::N(250)).def().unique(),
            Self::MetaDescription => ColumnType::Text.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Category => Entity::belongs_to(super::question_category::Entity)
                .from(Column::CategoryId)
                .to(super::question_category::Column::Id)
                .into(),
        }
    }
}

impl Related<super::question_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
