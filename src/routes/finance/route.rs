use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get},
};
use chrono::Utc;
use uuid::Uuid;

use super::dto::{
    DashboardResponse, ExpenseListResponse, ExpenseRequest, ExpenseResponse,
    FinanceStudentListResponse, FinanceStudentRequest, FinanceStudentResponse,
    TeacherListResponse, TeacherRequest, TeacherResponse,
};
use crate::error::AppResult;
use crate::extractor::AuthClaims;
use crate::routes::MessageResponse;
use crate::services::finance::{DashboardQuery, FinanceService};
use crate::static_service::get_database_connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/finance/dashboard", get(dashboard))
        .route("/api/v1/finance/teachers", get(list_teachers).post(create_teacher))
        .route("/api/v1/finance/teachers/{id}", delete(delete_teacher))
        .route("/api/v1/finance/students", get(list_students).post(create_student))
        .route("/api/v1/finance/students/{id}", delete(delete_student))
        .route("/api/v1/finance/expenses", get(list_expenses).post(create_expense))
        .route("/api/v1/finance/expenses/{id}", delete(delete_expense))
}

/// Income, expenses, salaries and profit for the selected period
#[utoipa::path(
    get,
    path = "/api/v1/finance/dashboard",
    params(DashboardQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Financial rollup", body = DashboardResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Finance"
)]
pub async fn dashboard(
    auth: AuthClaims,
    Query(query): Query<DashboardQuery>,
) -> AppResult<(StatusCode, Json<DashboardResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let today = Utc::now().date_naive();
    let dashboard = FinanceService::new(db).dashboard(&actor, query, today).await?;
    Ok((
        StatusCode::OK,
        Json(DashboardResponse {
            success: true,
            dashboard,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/finance/teachers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Teachers", body = TeacherListResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Finance"
)]
pub async fn list_teachers(auth: AuthClaims) -> AppResult<(StatusCode, Json<TeacherListResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let teachers = FinanceService::new(db).teachers(&actor).await?;
    Ok((StatusCode::OK, Json(TeacherListResponse { success: true, teachers })))
}

#[utoipa::path(
    post,
    path = "/api/v1/finance/teachers",
    request_body = TeacherRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Teacher created", body = TeacherResponse),
        (status = 400, description = "Invalid fields"),
        (status = 403, description = "Admins only")
    ),
    tag = "Finance"
)]
pub async fn create_teacher(
    auth: AuthClaims,
    Json(payload): Json<TeacherRequest>,
) -> AppResult<(StatusCode, Json<TeacherResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let teacher = FinanceService::new(db).create_teacher(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(TeacherResponse { success: true, teacher })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/finance/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Teacher deleted", body = MessageResponse),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Finance"
)]
pub async fn delete_teacher(
    auth: AuthClaims,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    FinanceService::new(db).delete_teacher(&actor, id).await?;
    Ok((StatusCode::OK, Json(MessageResponse::ok("Teacher deleted"))))
}

#[utoipa::path(
    get,
    path = "/api/v1/finance/students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paying students, newest first", body = FinanceStudentListResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Finance"
)]
pub async fn list_students(
    auth: AuthClaims,
) -> AppResult<(StatusCode, Json<FinanceStudentListResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let students = FinanceService::new(db).students(&actor).await?;
    Ok((StatusCode::OK, Json(FinanceStudentListResponse { success: true, students })))
}

#[utoipa::path(
    post,
    path = "/api/v1/finance/students",
    request_body = FinanceStudentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Student created", body = FinanceStudentResponse),
        (status = 400, description = "Invalid fields"),
        (status = 403, description = "Admins only")
    ),
    tag = "Finance"
)]
pub async fn create_student(
    auth: AuthClaims,
    Json(payload): Json<FinanceStudentRequest>,
) -> AppResult<(StatusCode, Json<FinanceStudentResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let student = FinanceService::new(db).create_student(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(FinanceStudentResponse { success: true, student })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/finance/students/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Student not found")
    ),
    tag = "Finance"
)]
pub async fn delete_student(
    auth: AuthClaims,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    FinanceService::new(db).delete_student(&actor, id).await?;
    Ok((StatusCode::OK, Json(MessageResponse::ok("Student deleted"))))
}

#[utoipa::path(
    get,
    path = "/api/v1/finance/expenses",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Expenses, newest first", body = ExpenseListResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Finance"
)]
pub async fn list_expenses(auth: AuthClaims) -> AppResult<(StatusCode, Json<ExpenseListResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let expenses = FinanceService::new(db).expenses(&actor).await?;
    Ok((StatusCode::OK, Json(ExpenseListResponse { success: true, expenses })))
}

#[utoipa::path(
    post,
    path = "/api/v1/finance/expenses",
    request_body = ExpenseRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Expense recorded", body = ExpenseResponse),
        (status = 400, description = "Invalid fields"),
        (status = 403, description = "Admins only")
    ),
    tag = "Finance"
)]
pub async fn create_expense(
    auth: AuthClaims,
    Json(payload): Json<ExpenseRequest>,
) -> AppResult<(StatusCode, Json<ExpenseResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let expense = FinanceService::new(db).create_expense(&actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ExpenseResponse { success: true, expense })))
}

#[utoipa::path(
    delete,
    path = "/api/v1/finance/expenses/{id}",
    params(("id" = Uuid, Path, description = "Expense id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Expense deleted", body = MessageResponse),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Expense not found")
    ),
    tag = "Finance"
)]
pub async fn delete_expense(
    auth: AuthClaims,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    FinanceService::new(db).delete_expense(&actor, id).await?;
    Ok((StatusCode::OK, Json(MessageResponse::ok("Expense deleted"))))
}
