use axum::{Json, Router, http::StatusCode, routing::post};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use super::dto::{LoginRequest, LoginResponse, RegisterResponse};
use crate::config::APP_CONFIG;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::AppResult;
use crate::extractor::AuthClaims;
use crate::redis_service::JwtBlacklist;
use crate::routes::MessageResponse;
use crate::services::accounts::{AccountService, redirect_for};
use crate::static_service::get_database_connection;
use crate::utils::jwt::JwtManager;
use crate::validation::{RegistrationInput, validate_registration};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
}

/// Student self sign-up
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegistrationInput,
    responses(
        (status = 201, description = "Student registered", body = RegisterResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Username already taken"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn register(
    Json(payload): Json<RegistrationInput>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let registration = validate_registration(&payload)?;
    let db = get_database_connection().await;

    let (user, profile) = AccountService::new(db).register_student(registration).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Account created successfully".to_string(),
            redirect_to: redirect_for(user.role).to_string(),
            user,
            profile,
        }),
    ))
}

/// Login endpoint - returns JWT token and the role's landing page
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(Json(payload): Json<LoginRequest>) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    let db = get_database_connection().await;
    let user = AccountService::new(db)
        .authenticate(&payload.username, &payload.password)
        .await?;

    let token = JwtManager::new(APP_CONFIG.jwt_secret.as_str()).create_jwt(
        &user.id.to_string(),
        &user.username,
        user.role,
        APP_CONFIG.jwt_expires_in,
    )?;

    tracing::info!("User {} logged in as {}", user.username, user.role.as_str());

    let message = match user.role {
        RoleEnum::Student => format!("Welcome back, {}", user.username),
        RoleEnum::Supervisor | RoleEnum::Admin => format!("Welcome, {}", user.username),
    };

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            success: true,
            message,
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: APP_CONFIG.jwt_expires_in,
            user_id: user.id.to_string(),
            username: user.username,
            role: user.role.as_str().to_string(),
            redirect_to: redirect_for(user.role).to_string(),
        }),
    ))
}

/// Logout endpoint - revokes the presented token until it expires
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn logout(
    AuthClaims(claims): AuthClaims,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    JwtBlacklist::add_jwt_to_blacklist(&claims.user_id, bearer.token(), claims.remaining_ttl())
        .await?;
    tracing::info!("User {} logged out", claims.username);

    Ok((StatusCode::OK, Json(MessageResponse::ok("Logged out successfully"))))
}
