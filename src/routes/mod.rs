pub mod auth;
pub mod blog;
pub mod bookings;
pub mod finance;
pub mod health;
pub mod messages;
pub mod profile;
pub mod qna;
pub mod supervisor;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Result of a bulk moderation action.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkResponse {
    pub success: bool,
    pub message: String,
    pub affected: u64,
}

impl BulkResponse {
    pub fn new(affected: u64) -> Self {
        Self {
            success: true,
            message: format!("{affected} items updated"),
            affected,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct IdsRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkFlagRequest {
    pub ids: Vec<Uuid>,
    #[serde(alias = "contacted", alias = "approved", alias = "verified", alias = "spam")]
    pub value: bool,
}
