//! `SeaORM` Entity for student_profiles table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student_profiles"
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel, Serialize, Deserialize, ToSchema,
)]
#[schema(as = StudentProfile)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub country: String,
    pub phone: String,
    pub parent_phone: String,
    pub package_name: String,
    pub lessons_count: i32,
    pub session_duration: i32,
    pub supervisor_id: Option<Uuid>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    UserId,
    FullName,
    Age,
    Country,
    Phone,
    ParentPhone,
    PackageName,
    LessonsCount,
    SessionDuration,
    SupervisorId,
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
    User,
    Supervisor,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::UserId => ColumnType::Uuid.def().unique(),
            Self::FullName => ColumnType::String(StringLen::N(100)).def(),
            Self::Age => ColumnType::Integer.def(),
            Self::Country => ColumnType::String(StringLen::N(50)).def(),
            Self::Phone => ColumnType::String(StringLen::N(15)).def(),
            Self::ParentPhone => ColumnType::String(StringLen::N(15)).def(),
            Self::PackageName => ColumnType::String(StringLen::N(100)).def(),
            Self::LessonsCount => ColumnType::Integer.def(),
            Self::SessionDuration => ColumnType::Integer.def(),
            Self::SupervisorId => ColumnType::Uuid.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::User => Entity::belongs_to(super::user::Entity)
                .from(Column::UserId)
                .to(super::user::Column::Id)
                .into(),
            Self::Supervisor => Entity::belongs_to(super::user::Entity)
                .from(Column::SupervisorId)
                .to(super::user::Column::Id)
                .into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
