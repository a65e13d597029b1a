//! Registration, login and the student messaging flow against SQLite.

mod common;

use academy_service::entities::sea_orm_active_enums::RoleEnum;
use academy_service::entities::user;
use academy_service::error::AppError;
use academy_service::services::accounts::AccountService;
use academy_service::services::messaging::MessagingService;
use academy_service::validation::{RegistrationInput, validate_registration};
use common::{actor_for, seed_student, seed_user, test_db};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

fn registration(username: &str) -> RegistrationInput {
    serde_json::from_value(json!({
        "username": username,
        "email": "parent@example.com",
        "password": "secret123",
        "full_name": "Omar Khaled",
        "country": "Egypt",
        "phone": "+201001234567",
        "parent_phone": "+201007654321",
        "age": "9",
        "lessons_count": 8,
        "session_duration": "40",
        "package_name": "Quran memorization"
    }))
    .expect("valid registration json")
}

#[tokio::test]
async fn registering_creates_user_and_profile_together() {
    let db = test_db().await;
    let service = AccountService::new(&db);

    let input = validate_registration(&registration("omar2015")).expect("valid input");
    let (user, profile) = service.register_student(input).await.expect("registered");

    assert_eq!(user.role, RoleEnum::Student);
    assert_eq!(profile.user_id, user.id);
    assert_eq!(profile.full_name, "Omar Khaled");
    assert_eq!(profile.lessons_count, 8);
    assert_eq!(profile.session_duration, 40);
    assert_eq!(profile.supervisor_id, None);
    assert_ne!(user.password, "secret123");
}

#[tokio::test]
async fn duplicate_username_is_rejected_without_side_effects() {
    let db = test_db().await;
    let service = AccountService::new(&db);

    let first = validate_registration(&registration("omar2015")).expect("valid input");
    service.register_student(first).await.expect("first registration");

    let second = validate_registration(&registration("omar2015")).expect("valid input");
    let err = service.register_student(second).await.expect_err("duplicate");
    assert!(matches!(err, AppError::Conflict(_)));

    let users = user::Entity::find().count(&db).await.expect("count users");
    assert_eq!(users, 1);
}

#[tokio::test]
async fn login_checks_the_password() {
    let db = test_db().await;
    let service = AccountService::new(&db);
    let input = validate_registration(&registration("omar2015")).expect("valid input");
    service.register_student(input).await.expect("registered");

    let user = service
        .authenticate("omar2015", "secret123")
        .await
        .expect("correct password");
    assert_eq!(user.username, "omar2015");

    let wrong = service.authenticate("omar2015", "nope").await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));
    let unknown = service.authenticate("nobody", "secret123").await;
    assert!(matches!(unknown, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn student_without_supervisor_cannot_send_messages() {
    let db = test_db().await;
    let (student, _) = seed_student(&db, "lonely", None).await;

    let err = MessagingService::new(&db)
        .send_to_supervisor(&actor_for(&student), "Hello teacher")
        .await
        .expect_err("no supervisor assigned");
    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn student_messages_reach_the_supervisor_unread() {
    let db = test_db().await;
    let supervisor = seed_user(&db, "sheikh", RoleEnum::Supervisor).await;
    let (student, _) = seed_student(&db, "omar", Some(supervisor.id)).await;
    let messaging = MessagingService::new(&db);

    let sent = messaging
        .send_to_supervisor(&actor_for(&student), "  When is the next lesson?  ")
        .await
        .expect("sent");
    assert_eq!(sent.content, "When is the next lesson?");
    assert_eq!(sent.recipient_id, supervisor.id);
    assert!(!sent.is_read);

    let supervisor_actor = actor_for(&supervisor);
    assert_eq!(messaging.unread_count(&supervisor_actor).await.expect("count"), 1);

    let dashboard = messaging
        .student_dashboard(&actor_for(&student))
        .await
        .expect("dashboard");
    assert_eq!(dashboard.messages.len(), 1);
    assert_eq!(dashboard.supervisor.map(|s| s.id), Some(supervisor.id));
}
