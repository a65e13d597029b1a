use crate::entities::sea_orm_active_enums::{JobTitle, PaymentType};
use crate::entities::{expense, finance_student, teacher};
use crate::repositories::{NewExpense, NewFinanceStudent, NewTeacher};
use crate::services::finance::FinanceDashboard;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub success: bool,
    #[serde(flatten)]
    pub dashboard: FinanceDashboard,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TeacherRequest {
    pub name: String,
    pub job_title: JobTitle,
    #[schema(value_type = String, example = "3000.00")]
    pub salary: Decimal,
    #[serde(default)]
    pub working_hours: i32,
    #[serde(default)]
    #[schema(value_type = String, example = "0")]
    pub bonus: Decimal,
    #[serde(default)]
    #[schema(value_type = String, example = "0")]
    pub deduction: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    pub start_date: NaiveDate,
}

impl From<TeacherRequest> for NewTeacher {
    fn from(req: TeacherRequest) -> Self {
        NewTeacher {
            name: req.name.trim().to_string(),
            job_title: req.job_title,
            salary: req.salary,
            working_hours: req.working_hours,
            bonus: req.bonus,
            deduction: req.deduction,
            notes: req.notes,
            start_date: req.start_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FinanceStudentRequest {
    #[serde(default)]
    pub teacher_id: Option<Uuid>,
    pub name: String,
    pub session_duration: i32,
    pub lessons_count: i32,
    pub payment_type: PaymentType,
    #[schema(value_type = String, example = "100.00")]
    pub paid_amount: Decimal,
    pub join_date: NaiveDate,
}

impl From<FinanceStudentRequest> for NewFinanceStudent {
    fn from(req: FinanceStudentRequest) -> Self {
        NewFinanceStudent {
            teacher_id: req.teacher_id,
            name: req.name.trim().to_string(),
            session_duration: req.session_duration,
            lessons_count: req.lessons_count,
            payment_type: req.payment_type,
            paid_amount: req.paid_amount,
            join_date: req.join_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExpenseRequest {
    pub title: String,
    #[schema(value_type = String, example = "20.00")]
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ExpenseRequest> for NewExpense {
    fn from(req: ExpenseRequest) -> Self {
        NewExpense {
            title: req.title.trim().to_string(),
            amount: req.amount,
            date: req.date,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherListResponse {
    pub success: bool,
    pub teachers: Vec<teacher::Model>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub success: bool,
    pub teacher: teacher::Model,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FinanceStudentListResponse {
    pub success: bool,
    pub students: Vec<finance_student::Model>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FinanceStudentResponse {
    pub success: bool,
    pub student: finance_student::Model,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseListResponse {
    pub success: bool,
    pub expenses: Vec<expense::Model>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExpenseResponse {
    pub success: bool,
    pub expense: expense::Model,
}
