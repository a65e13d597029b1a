use crate::entities::{message, session, student_profile, user};
use crate::services::attendance::{ActionOutcome, AttendanceSummary, StudentOverview};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentOverviewDto {
    pub profile: student_profile::Model,
    pub user: Option<user::Model>,
    pub sessions: Vec<session::Model>,
    pub attendance: AttendanceSummary,
    pub unread_count: u64,
    pub messages: Vec<message::Model>,
}

impl From<StudentOverview> for StudentOverviewDto {
    fn from(overview: StudentOverview) -> Self {
        Self {
            profile: overview.profile,
            user: overview.user,
            sessions: overview.sessions,
            attendance: overview.attendance,
            unread_count: overview.unread_count,
            messages: overview.messages,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupervisorDashboardResponse {
    pub success: bool,
    pub students: Vec<StudentOverviewDto>,
    pub total_unread: u64,
}

/// Outcome of one dashboard action. Only the field matching the action is set.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<session::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<message::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked_read: Option<u64>,
}

impl From<ActionOutcome> for ActionResponse {
    fn from(outcome: ActionOutcome) -> Self {
        let message = outcome.message();
        let (session, sent, marked_read) = match outcome {
            ActionOutcome::SessionAdded { session, .. } | ActionOutcome::StatusUpdated(session) => {
                (Some(session), None, None)
            }
            ActionOutcome::SessionDeleted { .. } => (None, None, None),
            ActionOutcome::MessageSent(sent) => (None, Some(sent), None),
            ActionOutcome::MarkedRead(count) => (None, None, Some(count)),
        };
        Self {
            success: true,
            message,
            session,
            sent,
            marked_read,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkedReadResponse {
    pub success: bool,
    pub message: String,
    pub count: u64,
}
