//! `SeaORM` active enums stored as short strings

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(15))")]
#[serde(rename_all = "snake_case")]
pub enum RoleEnum {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "supervisor")]
    Supervisor,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl RoleEnum {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleEnum::Student => "student",
            RoleEnum::Supervisor => "supervisor",
            RoleEnum::Admin => "admin",
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, RoleEnum::Supervisor | RoleEnum::Admin)
    }
}

impl std::str::FromStr for RoleEnum {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(RoleEnum::Student),
            "supervisor" => Ok(RoleEnum::Supervisor),
            "admin" => Ok(RoleEnum::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Attendance state of one lesson. `Unset` is serialized as `""`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum SessionStatus {
    #[sea_orm(string_value = "present")]
    #[serde(rename = "present")]
    Present,
    #[sea_orm(string_value = "absent")]
    #[serde(rename = "absent")]
    Absent,
    #[sea_orm(string_value = "unset")]
    #[serde(rename = "")]
    Unset,
}

impl SessionStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "present" => Some(SessionStatus::Present),
            "absent" => Some(SessionStatus::Absent),
            "" | "unset" => Some(SessionStatus::Unset),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "spam")]
    Spam,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[sea_orm(string_value = "spam")]
    Spam,
    #[sea_orm(string_value = "inappropriate")]
    Inappropriate,
    #[sea_orm(string_value = "incorrect")]
    Incorrect,
    #[sea_orm(string_value = "duplicate")]
    Duplicate,
    #[sea_orm(string_value = "other")]
    Other,
}

impl ReportType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "spam" => Some(ReportType::Spam),
            "inappropriate" => Some(ReportType::Inappropriate),
            "incorrect" => Some(ReportType::Incorrect),
            "duplicate" => Some(ReportType::Duplicate),
            "other" => Some(ReportType::Other),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum JobTitle {
    #[sea_orm(string_value = "junior")]
    Junior,
    #[sea_orm(string_value = "intermediate")]
    Intermediate,
    #[sea_orm(string_value = "senior")]
    Senior,
    #[sea_orm(string_value = "master")]
    Master,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "per_lesson")]
    PerLesson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_status_accepts_blank_as_unset() {
        assert_eq!(SessionStatus::parse(""), Some(SessionStatus::Unset));
        assert_eq!(SessionStatus::parse("present"), Some(SessionStatus::Present));
        assert_eq!(SessionStatus::parse("late"), None);
    }

    #[test]
    fn unset_status_serializes_as_empty_string() {
        let json = serde_json::to_string(&SessionStatus::Unset).unwrap();
        assert_eq!(json, "\"\"");
    }

    #[test]
    fn staff_roles() {
        assert!(RoleEnum::Admin.is_staff());
        assert!(RoleEnum::Supervisor.is_staff());
        assert!(!RoleEnum::Student.is_staff());
    }
}
