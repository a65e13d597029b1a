use crate::entities::{session, student_profile};
use crate::services::attendance::AttendanceSummary;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: student_profile::Model,
    pub sessions: Vec<session::Model>,
    pub attendance: AttendanceSummary,
}
