//! `SeaORM` Entity for sessions table

use super::sea_orm_active_enums::SessionStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "sessions"
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel, Serialize, Deserialize, ToSchema,
)]
#[schema(as = Session)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub student_profile_id: Uuid,
    pub date: DateTime,
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    StudentProfileId,
    Date,
    Status,
    Notes,
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
    StudentProfile,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::StudentProfileId => ColumnType::Uuid.def(),
            Self::Date => ColumnType::DateTime.def(),
            Self::Status => ColumnType::String(StringLen::N(10)).def(),
            Self::Notes => ColumnType::Text.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::StudentProfile => Entity::belongs_to(super::student_profile::Entity)
                .from(Column::StudentProfileId)
                .to(super::student_profile::Column::Id)
                .into(),
        }
    }
}

impl Related<super::student_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
