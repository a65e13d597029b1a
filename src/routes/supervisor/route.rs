use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::Value;
use uuid::Uuid;

use super::dto::{ActionResponse, MarkedReadResponse, SupervisorDashboardResponse};
use crate::error::AppResult;
use crate::extractor::AuthClaims;
use crate::services::attendance::{AttendanceService, SupervisorAction};
use crate::services::messaging::marked_read_message;
use crate::static_service::get_database_connection;

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/v1/supervisor/dashboard",
            get(dashboard).post(dashboard_action),
        )
        .route(
            "/api/v1/supervisor/students/{student_user_id}/messages/read",
            post(mark_student_messages_read),
        )
}

/// Every student supervised by the caller, most unread messages first
#[utoipa::path(
    get,
    path = "/api/v1/supervisor/dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Supervisor dashboard", body = SupervisorDashboardResponse),
        (status = 403, description = "Supervisors and admins only")
    ),
    tag = "Supervisor"
)]
pub async fn dashboard(auth: AuthClaims) -> AppResult<(StatusCode, Json<SupervisorDashboardResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let dashboard = AttendanceService::new(db).dashboard(&actor).await?;

    Ok((
        StatusCode::OK,
        Json(SupervisorDashboardResponse {
            success: true,
            students: dashboard.students.into_iter().map(Into::into).collect(),
            total_unread: dashboard.total_unread,
        }),
    ))
}

/// Multi-action endpoint: the first of add_session, update_status,
/// delete_session, send_message, mark_as_read present in the body runs
#[utoipa::path(
    post,
    path = "/api/v1/supervisor/dashboard",
    request_body(content = serde_json::Value, description = "Action key with its fields, nested or top level"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Action applied", body = ActionResponse),
        (status = 400, description = "Unknown action or invalid fields"),
        (status = 403, description = "Student not supervised by the caller"),
        (status = 404, description = "Student or session not found")
    ),
    tag = "Supervisor"
)]
pub async fn dashboard_action(
    auth: AuthClaims,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<ActionResponse>)> {
    let actor = auth.actor()?;
    let action = SupervisorAction::from_json(&body)?;
    let db = get_database_connection().await;

    let outcome = AttendanceService::new(db).apply(&actor, action).await?;
    Ok((StatusCode::OK, Json(outcome.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/supervisor/students/{student_user_id}/messages/read",
    params(("student_user_id" = Uuid, Path, description = "User id of the student")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread messages from the student marked as read", body = MarkedReadResponse),
        (status = 403, description = "Student not supervised by the caller"),
        (status = 404, description = "Student not found")
    ),
    tag = "Supervisor"
)]
pub async fn mark_student_messages_read(
    auth: AuthClaims,
    Path(student_user_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<MarkedReadResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let count = AttendanceService::new(db)
        .mark_student_messages_read(&actor, student_user_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MarkedReadResponse {
            success: true,
            message: marked_read_message(count),
            count,
        }),
    ))
}
