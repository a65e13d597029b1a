use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    routing::{get, post},
};

use super::dto::{BookingListQuery, BookingListResponse, BookingResponse};
use crate::error::AppResult;
use crate::extractor::AuthClaims;
use crate::routes::{BulkFlagRequest, BulkResponse};
use crate::services::bookings::BookingService;
use crate::static_service::get_database_connection;
use crate::validation::BookingInput;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/contact", post(book_trial))
        .route("/api/v1/admin/bookings", get(list_bookings))
        .route("/api/v1/admin/bookings/contacted", post(set_contacted))
}

/// Free trial lesson request
#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body = BookingInput,
    responses(
        (status = 201, description = "Booking stored", body = BookingResponse),
        (status = 400, description = "Missing or invalid fields")
    ),
    tag = "Bookings"
)]
pub async fn book_trial(
    Json(payload): Json<BookingInput>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let db = get_database_connection().await;
    let booking = BookingService::new(db).book_trial(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            message: "Your trial booking has been received. We will contact you soon".to_string(),
            booking,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/bookings",
    params(BookingListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings, newest first", body = BookingListResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(
    auth: AuthClaims,
    Query(query): Query<BookingListQuery>,
) -> AppResult<(StatusCode, Json<BookingListResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let bookings = BookingService::new(db).list(&actor, query.contacted).await?;
    Ok((
        StatusCode::OK,
        Json(BookingListResponse {
            success: true,
            bookings,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/bookings/contacted",
    request_body = BulkFlagRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings updated", body = BulkResponse),
        (status = 403, description = "Admins only")
    ),
    tag = "Bookings"
)]
pub async fn set_contacted(
    auth: AuthClaims,
    Json(payload): Json<BulkFlagRequest>,
) -> AppResult<(StatusCode, Json<BulkResponse>)> {
    let actor = auth.actor()?;
    let db = get_database_connection().await;
    let affected = BookingService::new(db)
        .set_contacted(&actor, payload.ids, payload.value)
        .await?;
    Ok((StatusCode::OK, Json(BulkResponse::new(affected))))
}
