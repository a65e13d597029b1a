//! `SeaORM` Entity for teachers table

use super::sea_orm_active_enums::JobTitle;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "teachers"
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel, Serialize, Deserialize, ToSchema,
)]
#[schema(as = Teacher)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub name: String,
    pub job_title: JobTitle,
    pub salary: Decimal,
    pub working_hours: i32,
    pub bonus: Decimal,
    pub deduction: Decimal,
    pub notes: Option<String>,
    pub start_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    Name,
    JobTitle,
    Salary,
    WorkingHours,
    Bonus,
    Deduction,
    Notes,
    StartDate,
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
pub enum Relation {}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::Name => ColumnType::String(StringLen::N(255)).def(),
            Self::JobTitle => ColumnType::String(StringLen::N(20)).def(),
            Self::Salary => ColumnType::Decimal(Some((10, 2))).def(),
            Self::WorkingHours => ColumnType::Integer.def(),
            Self::Bonus => ColumnType::Decimal(Some((10, 2))).def(),
            Self::Deduction => ColumnType::Decimal(Some((10, 2))).def(),
            Self::Notes => ColumnType::Text.def().null(),
            Self::StartDate => ColumnType::Date.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef")
    }
}

impl ActiveModelBehavior for ActiveModel {}
