use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    MessageSentResponse, SendMessageRequest, StudentDashboardResponse, UnreadCountResponse,
};
use crate::error::AppResult;
use crate::extractor::AuthClaims;
use crate::routes::MessageResponse;
use crate::services::attendance::attendance_summary;
use crate::services::messaging::MessagingService;
use crate::static_service::get_database_connection;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/dashboard", get(student_dashboard))
        .route("/api/v1/messages", post(send_message))
        .route("/api/v1/messages/unread-count", get(unread_count))
        .route("/api/v1/messages/{id}/read", post(mark_read))
}

/// Student dashboard: profile, sessions and the conversation with the supervisor
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard data", body = StudentDashboardResponse),
        (status = 403, description = "Only students have a dashboard"),
        (status = 404, description = "Profile not found")
    ),
    tag = "Messages"
)]
pub async fn student_dashboard(
    auth: AuthClaims,
) -> AppResult<(StatusCode, Json<StudentDashboardResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;

    let dashboard = MessagingService::new(db).student_dashboard(&actor).await?;
    let attendance = attendance_summary(&dashboard.sessions);

    Ok((
        StatusCode::OK,
        Json(StudentDashboardResponse {
            success: true,
            profile: dashboard.profile,
            supervisor: dashboard.supervisor,
            sessions: dashboard.sessions,
            attendance,
            messages: dashboard.messages,
        }),
    ))
}

/// Student writes to the assigned supervisor
#[utoipa::path(
    post,
    path = "/api/v1/messages",
    request_body = SendMessageRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Message sent", body = MessageSentResponse),
        (status = 400, description = "Empty message or no supervisor assigned"),
        (status = 404, description = "Profile not found")
    ),
    tag = "Messages"
)]
pub async fn send_message(
    auth: AuthClaims,
    Json(payload): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<MessageSentResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;

    let message = MessagingService::new(db)
        .send_to_supervisor(&actor, &payload.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageSentResponse {
            success: true,
            message: "Your message has been sent to your supervisor".to_string(),
            data: message,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/messages/unread-count",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread messages addressed to the caller", body = UnreadCountResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Messages"
)]
pub async fn unread_count(auth: AuthClaims) -> AppResult<(StatusCode, Json<UnreadCountResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let unread_count = MessagingService::new(db).unread_count(&actor).await?;
    Ok((
        StatusCode::OK,
        Json(UnreadCountResponse {
            success: true,
            unread_count,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/messages/{id}/read",
    params(("id" = Uuid, Path, description = "Message id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Message marked as read", body = MessageResponse),
        (status = 404, description = "No such message addressed to the caller")
    ),
    tag = "Messages"
)]
pub async fn mark_read(
    auth: AuthClaims,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    MessagingService::new(db).mark_read(&actor, id).await?;
    Ok((StatusCode::OK, Json(MessageResponse::ok("Message marked as read"))))
}
