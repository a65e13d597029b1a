//! Supervisor dashboard actions and their ownership checks.

mod common;

use academy_service::entities::sea_orm_active_enums::{RoleEnum, SessionStatus};
use academy_service::error::AppError;
use academy_service::services::attendance::{ActionOutcome, AttendanceService, SupervisorAction};
use academy_service::services::messaging::MessagingService;
use common::{actor_for, seed_student, seed_user, test_db};
use serde_json::json;

#[tokio::test]
async fn supervisors_manage_sessions_of_their_own_students() {
    let db = test_db().await;
    let supervisor = seed_user(&db, "sheikh", RoleEnum::Supervisor).await;
    let (student, _) = seed_student(&db, "omar", Some(supervisor.id)).await;
    let service = AttendanceService::new(&db);
    let actor = actor_for(&supervisor);

    let add = SupervisorAction::from_json(&json!({
        "add_session": true,
        "student_id": student.id.to_string(),
        "date": "2025-03-01T18:30",
    }))
    .expect("add_session parses");
    let ActionOutcome::SessionAdded { session, student_name } =
        service.apply(&actor, add).await.expect("session added")
    else {
        panic!("expected SessionAdded");
    };
    assert_eq!(student_name, "Student omar");
    assert_eq!(session.status, SessionStatus::Unset);

    let update = SupervisorAction::UpdateStatus {
        session_id: session.id,
        status: SessionStatus::Present,
    };
    let outcome = service.apply(&actor, update).await.expect("status updated");
    assert_eq!(outcome.message(), "Status updated to: present");

    let dashboard = service.dashboard(&actor).await.expect("dashboard");
    assert_eq!(dashboard.students.len(), 1);
    let overview = &dashboard.students[0];
    assert_eq!(overview.attendance.attended_sessions, 1);
    assert_eq!(overview.attendance.attendance_rate, 100.0);

    let delete = SupervisorAction::DeleteSession {
        session_id: session.id,
    };
    service.apply(&actor, delete).await.expect("session deleted");
    let dashboard = service.dashboard(&actor).await.expect("dashboard");
    assert!(dashboard.students[0].sessions.is_empty());
}

#[tokio::test]
async fn other_supervisors_students_are_forbidden() {
    let db = test_db().await;
    let owner = seed_user(&db, "owner", RoleEnum::Supervisor).await;
    let intruder = seed_user(&db, "intruder", RoleEnum::Supervisor).await;
    let (student, _) = seed_student(&db, "omar", Some(owner.id)).await;
    let service = AttendanceService::new(&db);

    let add = SupervisorAction::from_json(&json!({
        "add_session": { "student_id": student.id.to_string(), "date": "2025-03-01 18:30:00" }
    }))
    .expect("nested fields parse");
    let err = service
        .apply(&actor_for(&intruder), add)
        .await
        .expect_err("not their student");
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = service
        .mark_student_messages_read(&actor_for(&intruder), student.id)
        .await
        .expect_err("not their student");
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn students_cannot_open_the_supervisor_dashboard() {
    let db = test_db().await;
    let (student, _) = seed_student(&db, "omar", None).await;

    let err = AttendanceService::new(&db)
        .dashboard(&actor_for(&student))
        .await
        .expect_err("students are not staff");
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn marking_a_conversation_read_reports_the_count() {
    let db = test_db().await;
    let supervisor = seed_user(&db, "sheikh", RoleEnum::Supervisor).await;
    let (student, _) = seed_student(&db, "omar", Some(supervisor.id)).await;
    let messaging = MessagingService::new(&db);
    let student_actor = actor_for(&student);
    for text in ["Salam", "Can we move the lesson?"] {
        messaging
            .send_to_supervisor(&student_actor, text)
            .await
            .expect("sent");
    }

    let service = AttendanceService::new(&db);
    let actor = actor_for(&supervisor);
    let dashboard = service.dashboard(&actor).await.expect("dashboard");
    assert_eq!(dashboard.students[0].unread_count, 2);
    assert_eq!(dashboard.total_unread, 2);

    let outcome = service
        .apply(&actor, SupervisorAction::MarkAsRead { student_id: student.id })
        .await
        .expect("marked");
    assert_eq!(outcome.message(), "2 messages marked as read");

    let again = service
        .mark_student_messages_read(&actor, student.id)
        .await
        .expect("nothing left");
    assert_eq!(again, 0);
}

#[tokio::test]
async fn replies_go_to_the_student() {
    let db = test_db().await;
    let supervisor = seed_user(&db, "sheikh", RoleEnum::Supervisor).await;
    let (student, _) = seed_student(&db, "omar", Some(supervisor.id)).await;

    let outcome = AttendanceService::new(&db)
        .apply(
            &actor_for(&supervisor),
            SupervisorAction::SendMessage {
                student_id: student.id,
                content: "See you tomorrow".to_string(),
            },
        )
        .await
        .expect("sent");
    let ActionOutcome::MessageSent(message) = outcome else {
        panic!("expected MessageSent");
    };
    assert_eq!(message.recipient_id, student.id);

    let unread = MessagingService::new(&db)
        .unread_count(&actor_for(&student))
        .await
        .expect("count");
    assert_eq!(unread, 1);
}
