use super::dto::ProfileResponse;
use crate::error::AppResult;
use crate::extractor::AuthClaims;
use crate::services::accounts::AccountService;
use crate::services::attendance::attendance_summary;
use crate::static_service::get_database_connection;
use axum::{Json, Router, http::StatusCode, routing::get};

pub fn create_route() -> Router {
    Router::new().route("/api/v1/profile", get(get_profile))
}

/// Get the caller's student profile with sessions, latest first
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile retrieved", body = ProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile for this account")
    ),
    tag = "Profile"
)]
pub async fn get_profile(auth: AuthClaims) -> AppResult<(StatusCode, Json<ProfileResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;

    let (profile, sessions) = AccountService::new(db).own_profile(&actor).await?;
    let attendance = attendance_summary(&sessions);

    Ok((
        StatusCode::OK,
        Json(ProfileResponse {
            success: true,
            profile,
            sessions,
            attendance,
        }),
    ))
}
