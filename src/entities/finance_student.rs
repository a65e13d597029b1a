//! `SeaORM` Entity for finance_students table

use super::sea_orm_active_enums::PaymentType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "finance_students"
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, DeriveModel, DeriveActiveModel, Serialize, Deserialize, ToSchema,
)]
#[schema(as = FinanceStudent)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub teacher_id: Option<Uuid>,
    pub name: String,
    pub session_duration: i32,
    pub lessons_count: i32,
    pub payment_type: PaymentType,
    pub paid_amount: Decimal,
    pub join_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    TeacherId,
    Name,
    SessionDuration,
    LessonsCount,
    PaymentType,
    PaidAmount,
    JoinDate,
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
    Teacher,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::TeacherId => ColumnType::Uuid.def().null(),
            Self::Name => ColumnType::String(StringLen::N(255)).def(),
            Self::SessionDuration => ColumnType::Integer.def(),
            Self::LessonsCount => ColumnType::Integer.def(),
            Self::PaymentType => ColumnType::String(StringLen::N(20)).def(),
            Self::PaidAmount => ColumnType::Decimal(Some((10, 2))).def(),
            Self::JoinDate => ColumnType::Date.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Teacher => Entity::belongs_to(super::teacher::Entity)
                .from(Column::TeacherId)
                .to(super::teacher::Column::Id)
                .into(),
        }
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
