use crate::entities::{message, session, student_profile, user};
use crate::error::{AppError, AppResult};
use crate::middleware::permission::{Actor, ensure_supervises, require_student};
use crate::repositories::{
    MessageRepository, SessionRepository, StudentProfileRepository, UserRepository,
};
use sea_orm::ConnectionTrait;
use uuid::Uuid;

pub struct StudentDashboard {
    pub profile: student_profile::Model,
    pub supervisor: Option<user::Model>,
    pub sessions: Vec<session::Model>,
    pub messages: Vec<message::Model>,
}

pub struct MessagingService<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MessagingService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    async fn own_profile(&self, actor: &Actor) -> AppResult<student_profile::Model> {
        StudentProfileRepository::with_connection(self.db)
            .find_by_user_id(actor.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found. Please register first"))
    }

    pub async fn student_dashboard(&self, actor: &Actor) -> AppResult<StudentDashboard> {
        require_student(actor)?;
        let profile = self.own_profile(actor).await?;
        let sessions = SessionRepository::with_connection(self.db)
            .find_by_profile(profile.id)
            .await?;

        let (supervisor, messages) = match profile.supervisor_id {
            Some(supervisor_id) => {
                let supervisor = UserRepository::with_connection(self.db)
                    .find_by_id(supervisor_id)
                    .await?;
                let messages = MessageRepository::with_connection(self.db)
                    .conversation(actor.user_id, supervisor_id)
                    .await?;
                (supervisor, messages)
            }
            None => (None, Vec::new()),
        };

        Ok(StudentDashboard {
            profile,
            supervisor,
            sessions,
            messages,
        })
    }

    /// Students may only write to the supervisor assigned to them.
    pub async fn send_to_supervisor(&self, actor: &Actor, content: &str) -> AppResult<message::Model> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::bad_request("Message is empty"));
        }
        let profile = self.own_profile(actor).await?;
        let supervisor_id = profile
            .supervisor_id
            .ok_or_else(|| AppError::bad_request("No supervisor has been assigned to you yet"))?;

        let message = MessageRepository::with_connection(self.db)
            .create(actor.user_id, supervisor_id, content.to_string())
            .await?;
        tracing::debug!("Student {} wrote to supervisor {}", actor.user_id, supervisor_id);
        Ok(message)
    }

    pub async fn reply_to_student(
        &self,
        actor: &Actor,
        student_user_id: Uuid,
        content: &str,
    ) -> AppResult<message::Model> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::bad_request("Message is empty"));
        }
        let profile = StudentProfileRepository::with_connection(self.db)
            .find_by_user_id(student_user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))?;
        ensure_supervises(actor, &profile)?;

        Ok(MessageRepository::with_connection(self.db)
            .create(actor.user_id, student_user_id, content.to_string())
            .await?)
    }

    /// Only the recipient can mark a message; anyone else gets a not-found.
    pub async fn mark_read(&self, actor: &Actor, message_id: Uuid) -> AppResult<message::Model> {
        let repo = MessageRepository::with_connection(self.db);
        let message = repo
            .find_by_id(message_id)
            .await?
            .filter(|m| m.recipient_id == actor.user_id)
            .ok_or_else(|| AppError::not_found("Message not found"))?;
        Ok(repo.mark_read(message).await?)
    }

    /// Marks every unread message from `sender_id` to the caller. Returns the count.
    pub async fn mark_all_read_from(&self, actor: &Actor, sender_id: Uuid) -> AppResult<u64> {
        Ok(MessageRepository::with_connection(self.db)
            .mark_all_read_from(sender_id, actor.user_id)
            .await?)
    }

    pub async fn unread_count(&self, actor: &Actor) -> AppResult<u64> {
        Ok(MessageRepository::with_connection(self.db)
            .unread_count_for(actor.user_id)
            .await?)
    }
}

pub fn marked_read_message(count: u64) -> String {
    if count > 0 {
        format!("{count} messages marked as read")
    } else {
        "No new messages".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_read_message_reports_the_count() {
        assert_eq!(marked_read_message(3), "3 messages marked as read");
        assert_eq!(marked_read_message(0), "No new messages");
    }
}
