//! Shared fixtures: a migrated in-memory SQLite database, seeded accounts
//! and a mailer that records instead of queueing.

#![allow(dead_code)]

use academy_service::entities::sea_orm_active_enums::RoleEnum;
use academy_service::entities::{student_profile, user};
use academy_service::middleware::permission::Actor;
use academy_service::repositories::{
    NewUser, ProfileFields, StudentProfileRepository, UserRepository,
};
use academy_service::services::mail::MailSender;
use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Every pooled connection to `sqlite::memory:` is its own database, so the
/// pool is pinned to one connection.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().expect("mailer lock").clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, text: &str) {
        self.sent.lock().expect("mailer lock").push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
        });
    }
}

pub fn actor_for(user: &user::Model) -> Actor {
    Actor::new(user.id, user.username.clone(), user.role)
}

/// Inserts an account directly. The stored hash is not a valid bcrypt hash,
/// so these users cannot log in.
pub async fn seed_user(db: &DatabaseConnection, username: &str, role: RoleEnum) -> user::Model {
    UserRepository::with_connection(db)
        .create(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-hash".to_string(),
            role,
            phone: None,
            country: None,
        })
        .await
        .expect("seed user")
}

pub async fn seed_student(
    db: &DatabaseConnection,
    username: &str,
    supervisor_id: Option<Uuid>,
) -> (user::Model, student_profile::Model) {
    let user = seed_user(db, username, RoleEnum::Student).await;
    let mut fields = ProfileFields::defaults_for(username);
    fields.full_name = format!("Student {username}");
    fields.supervisor_id = supervisor_id;
    let profile = StudentProfileRepository::with_connection(db)
        .create(user.id, fields)
        .await
        .expect("seed profile");
    (user, profile)
}
