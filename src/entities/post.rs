//! `SeaORM` Entity for posts table

use super::sea_orm_active_enums::PostStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "posts"
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel, Serialize, Deserialize, ToSchema,
)]
#[schema(as = Post)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub excerpt: String,
    pub content: String,
    pub cloud_url: Option<String>,
    pub status: PostStatus,
    pub views_count: i32,
    pub reading_time: i32,
    pub meta_description: String,
    pub keywords: String,
    pub is_featured: bool,
    pub allow_comments: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub published_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    Title,
    Slug,
    AuthorId,
    CategoryId,
    Excerpt,
    Content,
    CloudUrl,
    Status,
    ViewsCount,
    ReadingTime,
    MetaDescription,
    Keywords,
    IsFeatured,
    AllowComments,
    CreatedAt,
    UpdatedAt,
    PublishedAt,
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
    Author,
    Category,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::Title => ColumnType::String(StringLen::N(200)).def(),
            Self::Slug => ColumnType::String(StringLen::N(200)).def().unique(),
            Self::AuthorId => ColumnType::Uuid.def(),
            Self::CategoryId => ColumnType::Uuid.def().null(),
            Self::Excerpt => ColumnType::Text.def(),
            Self::Content => ColumnType::Text.def(),
            Self::CloudUrl => ColumnType::String(StringLen::N(500)).def().null(),
            Self::Status => ColumnType::String(StringLen::N(10)).def(),
            Self::ViewsCount => ColumnType::Integer.def(),
            Self::ReadingTime => ColumnType::Integer.def(),
            Self::MetaDescription => ColumnType::String(StringLen::N(160)).def(),
            Self::Keywords => ColumnType::String(StringLen::N(255)).def(),
            Self::IsFeatured => ColumnType::Boolean.def(),
            Self::AllowComments => ColumnType::Boolean.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
            Self::PublishedAt => ColumnType::DateTime.def().null(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Author => Entity::belongs_to(super::user::Entity)
                .from(Column::AuthorId)
                .to(super::user::Column::Id)
                .into(),
            Self::Category => Entity::belongs_to(super::blog_category::Entity)
                .from(Column::CategoryId)
                .to(super::blog_category::Column::Id)
                .into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::blog_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
