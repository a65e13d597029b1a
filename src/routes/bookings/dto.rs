use crate::entities::trial_booking;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub booking: trial_booking::Model,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingListQuery {
    pub contacted: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingListResponse {
    pub success: bool,
    pub bookings: Vec<trial_booking::Model>,
}
