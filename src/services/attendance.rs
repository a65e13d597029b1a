use crate::entities::sea_orm_active_enums::SessionStatus;
use crate::entities::{message, session, student_profile, user};
use crate::error::{AppError, AppResult};
use crate::middleware::permission::{Actor, ensure_supervises, require_staff};
use crate::repositories::{
    MessageRepository, SessionRepository, StudentProfileRepository, UserRepository,
};
use crate::services::messaging::MessagingService;
use chrono::NaiveDateTime;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

const SESSION_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    pub total_sessions: u64,
    pub attended_sessions: u64,
    pub attendance_rate: f64,
}

pub fn attendance_rate(present: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    present as f64 / total as f64 * 100.0
}

pub fn attendance_summary(sessions: &[session::Model]) -> AttendanceSummary {
    let total = sessions.len() as u64;
    let present = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Present)
        .count() as u64;
    AttendanceSummary {
        total_sessions: total,
        attended_sessions: present,
        attendance_rate: attendance_rate(present, total),
    }
}

pub fn parse_session_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    SESSION_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

#[derive(Debug)]
pub struct StudentOverview {
    pub profile: student_profile::Model,
    pub user: Option<user::Model>,
    pub sessions: Vec<session::Model>,
    pub attendance: AttendanceSummary,
    pub unread_count: u64,
    pub messages: Vec<message::Model>,
}

#[derive(Debug)]
pub struct SupervisorDashboard {
    pub students: Vec<StudentOverview>,
    pub total_unread: u64,
}

/// One of the supervisor dashboard's form actions.
#[derive(Debug, Clone, PartialEq)]
pub enum SupervisorAction {
    AddSession { student_id: Uuid, date: NaiveDateTime },
    UpdateStatus { session_id: Uuid, status: SessionStatus },
    DeleteSession { session_id: Uuid },
    SendMessage { student_id: Uuid, content: String },
    MarkAsRead { student_id: Uuid },
}

fn field<'v>(body: &'v Value, action: &str, name: &str) -> Option<&'v Value> {
    body.get(action)
        .filter(|v| v.is_object())
        .and_then(|nested| nested.get(name))
        .or_else(|| body.get(name))
}

fn uuid_field(body: &Value, action: &str, name: &str) -> AppResult<Uuid> {
    field(body, action, name)
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .ok_or_else(|| AppError::bad_request(format!("A valid {name} is required")))
}

fn str_field<'v>(body: &'v Value, action: &str, name: &str) -> &'v str {
    field(body, action, name).and_then(Value::as_str).unwrap_or_default()
}

impl SupervisorAction {
    /// The first present key wins, in the order add_session, update_status,
    /// delete_session, send_message, mark_as_read.
    pub fn from_json(body: &Value) -> AppResult<Self> {
        if body.get("add_session").is_some() {
            let student_id = uuid_field(body, "add_session", "student_id")?;
            let date = parse_session_date(str_field(body, "add_session", "date"))
                .ok_or_else(|| AppError::bad_request("Invalid session date"))?;
            return Ok(SupervisorAction::AddSession { student_id, date });
        }
        if body.get("update_status").is_some() {
            let session_id = uuid_field(body, "update_status", "session_id")?;
            let status = SessionStatus::parse(str_field(body, "update_status", "status"))
                .ok_or_else(|| AppError::bad_request("Status must be present, absent or empty"))?;
            return Ok(SupervisorAction::UpdateStatus { session_id, status });
        }
        if body.get("delete_session").is_some() {
            let session_id = uuid_field(body, "delete_session", "session_id")?;
            return Ok(SupervisorAction::DeleteSession { session_id });
        }
        if body.get("send_message").is_some() {
            let student_id = uuid_field(body, "send_message", "student_id")?;
            let content = str_field(body, "send_message", "content").to_string();
            return Ok(SupervisorAction::SendMessage { student_id, content });
        }
        if body.get("mark_as_read").is_some() {
            let student_id = uuid_field(body, "mark_as_read", "student_id")?;
            return Ok(SupervisorAction::MarkAsRead { student_id });
        }
        Err(AppError::bad_request("Unknown action"))
    }
}

#[derive(Debug, Clone)]
pub enum ActionOutcome {
    SessionAdded { session: session::Model, student_name: String },
    StatusUpdated(session::Model),
    SessionDeleted { student_name: String },
    MessageSent(message::Model),
    MarkedRead(u64),
}

impl ActionOutcome {
    pub fn message(&self) -> String {
        match self {
            ActionOutcome::SessionAdded { student_name, .. } => {
                format!("Session added for {student_name}")
            }
            ActionOutcome::StatusUpdated(session) => {
                let label = match session.status {
                    SessionStatus::Present => "present",
                    SessionStatus::Absent => "absent",
                    SessionStatus::Unset => "not set",
                };
                format!("Status updated to: {label}")
            }
            ActionOutcome::SessionDeleted { student_name } => {
                format!("Session of {student_name} deleted")
            }
            ActionOutcome::MessageSent(_) => "Message sent".to_string(),
            ActionOutcome::MarkedRead(count) => super::messaging::marked_read_message(*count),
        }
    }
}

pub struct AttendanceService<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AttendanceService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Students supervised by the caller, most unread messages first.
    pub async fn dashboard(&self, actor: &Actor) -> AppResult<SupervisorDashboard> {
        require_staff(actor)?;
        let profiles = StudentProfileRepository::with_connection(self.db)
            .find_by_supervisor(actor.user_id)
            .await?;

        let user_ids = profiles.iter().map(|p| p.user_id).collect();
        let users = UserRepository::with_connection(self.db)
            .find_by_ids(user_ids)
            .await?;

        let sessions_repo = SessionRepository::with_connection(self.db);
        let messages_repo = MessageRepository::with_connection(self.db);
        let mut students = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let sessions = sessions_repo.find_by_profile(profile.id).await?;
            let unread_count = messages_repo
                .unread_count_between(profile.user_id, actor.user_id)
                .await?;
            let messages = messages_repo
                .conversation(actor.user_id, profile.user_id)
                .await?;
            let user = users.iter().find(|u| u.id == profile.user_id).cloned();
            students.push(StudentOverview {
                attendance: attendance_summary(&sessions),
                profile,
                user,
                sessions,
                unread_count,
                messages,
            });
        }
        students.sort_by(|a, b| b.unread_count.cmp(&a.unread_count));

        let total_unread = messages_repo.unread_count_for(actor.user_id).await?;
        Ok(SupervisorDashboard {
            students,
            total_unread,
        })
    }

    async fn supervised_profile(&self, actor: &Actor, student_user_id: Uuid) -> AppResult<student_profile::Model> {
        let profile = StudentProfileRepository::with_connection(self.db)
            .find_by_user_id(student_user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))?;
        ensure_supervises(actor, &profile)?;
        Ok(profile)
    }

    async fn supervised_session(
        &self,
        actor: &Actor,
        session_id: Uuid,
    ) -> AppResult<(session::Model, student_profile::Model)> {
        let session = SessionRepository::with_connection(self.db)
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::not_found("Session not found"))?;
        let profile = StudentProfileRepository::with_connection(self.db)
            .find_by_id(session.student_profile_id)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))?;
        ensure_supervises(actor, &profile)?;
        Ok((session, profile))
    }

    pub async fn mark_student_messages_read(&self, actor: &Actor, student_user_id: Uuid) -> AppResult<u64> {
        self.supervised_profile(actor, student_user_id).await?;
        MessagingService::new(self.db)
            .mark_all_read_from(actor, student_user_id)
            .await
    }

    pub async fn apply(&self, actor: &Actor, action: SupervisorAction) -> AppResult<ActionOutcome> {
        require_staff(actor)?;
        let sessions = SessionRepository::with_connection(self.db);

        match action {
            SupervisorAction::AddSession { student_id, date } => {
                let profile = self.supervised_profile(actor, student_id).await?;
                let session = sessions.create(profile.id, date).await?;
                tracing::info!("Supervisor {} added session {} for {}", actor.user_id, session.id, profile.id);
                Ok(ActionOutcome::SessionAdded {
                    session,
                    student_name: profile.full_name,
                })
            }
            SupervisorAction::UpdateStatus { session_id, status } => {
                let (session, _) = self.supervised_session(actor, session_id).await?;
                let session = sessions.update_status(session, status).await?;
                Ok(ActionOutcome::StatusUpdated(session))
            }
            SupervisorAction::DeleteSession { session_id } => {
                let (session, profile) = self.supervised_session(actor, session_id).await?;
                sessions.delete(session.id).await?;
                Ok(ActionOutcome::SessionDeleted {
                    student_name: profile.full_name,
                })
            }
            SupervisorAction::SendMessage { student_id, content } => {
                let message = MessagingService::new(self.db)
                    .reply_to_student(actor, student_id, &content)
                    .await?;
                Ok(ActionOutcome::MessageSent(message))
            }
            SupervisorAction::MarkAsRead { student_id } => {
                let count = self.mark_student_messages_read(actor, student_id).await?;
                Ok(ActionOutcome::MarkedRead(count))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rate_is_zero_without_sessions() {
        assert_eq!(attendance_rate(0, 0), 0.0);
        assert_eq!(attendance_rate(3, 4), 75.0);
    }

    #[test]
    fn both_date_layouts_are_accepted() {
        assert!(parse_session_date("2025-03-01T18:30").is_some());
        assert!(parse_session_date("2025-03-01 18:30:15").is_some());
        assert!(parse_session_date("01/03/2025").is_none());
    }

    #[test]
    fn first_known_key_selects_the_action() {
        let student = Uuid::new_v4();
        let session = Uuid::new_v4();
        let body = json!({
            "mark_as_read": true,
            "delete_session": true,
            "student_id": student.to_string(),
            "session_id": session.to_string(),
        });
        assert_eq!(
            SupervisorAction::from_json(&body).ok(),
            Some(SupervisorAction::DeleteSession { session_id: session })
        );
    }

    #[test]
    fn nested_fields_are_read_too() {
        let session = Uuid::new_v4();
        let body = json!({ "update_status": { "session_id": session.to_string(), "status": "" } });
        assert_eq!(
            SupervisorAction::from_json(&body).ok(),
            Some(SupervisorAction::UpdateStatus {
                session_id: session,
                status: SessionStatus::Unset,
            })
        );
    }

    #[test]
    fn unknown_bodies_are_rejected() {
        assert!(matches!(
            SupervisorAction::from_json(&json!({ "noop": 1 })),
            Err(AppError::Validation { .. })
        ));
        assert!(SupervisorAction::from_json(&json!({ "update_status": 1, "session_id": Uuid::new_v4().to_string(), "status": "late" })).is_err());
    }
}
