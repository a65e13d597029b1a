use crate::entities::{message, session, student_profile, user};
use crate::services::attendance::AttendanceSummary;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDashboardResponse {
    pub success: bool,
    pub profile: student_profile::Model,
    pub supervisor: Option<user::Model>,
    pub sessions: Vec<session::Model>,
    pub attendance: AttendanceSummary,
    pub messages: Vec<message::Model>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    #[serde(default)]
    #[schema(example = "Can we move Thursday's lesson?")]
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageSentResponse {
    pub success: bool,
    pub message: String,
    pub data: message::Model,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub success: bool,
    pub unread_count: u64,
}
