//! Public Q&A lifecycle: moderation, answers, votes and subscriptions.

mod common;

use academy_service::entities::sea_orm_active_enums::{QuestionStatus, RoleEnum};
use academy_service::error::AppError;
use academy_service::repositories::{QuestionListQuery, VoteOutcome, VoteRepository};
use academy_service::routes::qna::dto::{QuestionDetailResponse, QuestionSummary};
use academy_service::services::qna::{QnaService, QnaSettings, ReportInput, Visitor};
use academy_service::validation::{AnswerInput, QuestionInput};
use common::{RecordingMailer, actor_for, seed_user, test_db};
use sea_orm::TransactionTrait;
use std::sync::Arc;

fn settings() -> QnaSettings {
    QnaSettings {
        admin_emails: vec!["moderator@academy.test".to_string()],
        site_url: "https://academy.test/".to_string(),
    }
}

fn visitor(ip: &str) -> Visitor {
    Visitor {
        ip_address: ip.to_string(),
        user_agent: "integration-test".to_string(),
    }
}

fn question(title: &str) -> QuestionInput {
    QuestionInput {
        visitor_name: "محمد أحمد".to_string(),
        visitor_email: "parent@example.com".to_string(),
        visitor_phone: String::new(),
        category_id: None,
        title: title.to_string(),
        question_text: "ابني عمره ست سنوات ويحب القصص كثيرا".to_string(),
        agree_to_terms: true,
    }
}

fn community_answer() -> AnswerInput {
    AnswerInput {
        visitor_name: "Fatima".to_string(),
        visitor_email: String::new(),
        answer_text: "Start with short surahs and repeat them daily".to_string(),
        agree_to_terms: true,
    }
}

#[tokio::test]
async fn new_questions_wait_for_moderation() {
    let db = test_db().await;
    let mailer = RecordingMailer::new();
    let service = QnaService::new(&db, mailer.clone(), settings());

    let outcome = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("question stored");
    assert_eq!(outcome.question.status, QuestionStatus::Pending);
    assert!(!outcome.question.is_frequent);
    assert_eq!(outcome.messages.len(), 3);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "moderator@academy.test");
    assert!(sent[0].subject.starts_with("New question awaiting review"));

    let index = service
        .list(&QuestionListQuery::default(), None)
        .await
        .expect("index");
    assert_eq!(index.total_questions, 0);
    assert!(index.questions.items.is_empty());

    let hidden = service.detail(&outcome.question.slug, None).await;
    assert!(matches!(hidden, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn unknown_category_is_a_field_error() {
    let db = test_db().await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());

    let mut input = question("هل يمكن تعليم الصغار الحفظ؟");
    input.category_id = Some(uuid::Uuid::new_v4());
    let Err(AppError::Validation { errors, .. }) = service.ask(&input, visitor("10.0.0.1")).await
    else {
        panic!("expected validation error");
    };
    assert!(errors.contains_key("category_id"));
}

#[tokio::test]
async fn repeated_questions_are_flagged_frequent() {
    let db = test_db().await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let title = "كيف أبدأ الحفظ مع طفلي الصغير؟";

    let first = service.ask(&question(title), visitor("10.0.0.1")).await.expect("first");
    let second = service.ask(&question(title), visitor("10.0.0.2")).await.expect("second");
    let third = service.ask(&question(title), visitor("10.0.0.3")).await.expect("third");

    assert!(!first.question.is_frequent);
    assert!(!second.question.is_frequent);
    assert!(third.question.is_frequent);
    assert_ne!(first.question.slug, second.question.slug);
    assert_eq!(second.question.slug, format!("{}-1", first.question.slug));
}

#[tokio::test]
async fn official_answer_publishes_the_question_once() {
    let db = test_db().await;
    let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let asked = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("asked");

    let answer = service
        .add_official_answer(
            &actor_for(&admin),
            asked.question.id,
            "Yes, children can start memorizing from the age of five",
            true,
        )
        .await
        .expect("answered");
    assert_eq!(answer.answered_by, Some(admin.id));

    let detail = service.detail(&asked.question.slug, None).await.expect("now public");
    assert_eq!(detail.question.status, QuestionStatus::Approved);
    assert_eq!(detail.question.view_count, 1);
    assert_eq!(detail.official_author.map(|u| u.username), Some("admin".to_string()));
    assert!(detail.schema_markup.contains("acceptedAnswer"));

    let again = service
        .add_official_answer(
            &actor_for(&admin),
            asked.question.id,
            "A second official answer is not allowed here",
            false,
        )
        .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    let index = service
        .list(&QuestionListQuery::default(), None)
        .await
        .expect("index");
    assert_eq!(index.total_questions, 1);
    assert_eq!(index.answered_count, 1);
    assert_eq!(index.featured_count, 1);
    let (_, flags) = &index.questions.items[0];
    assert!(flags.has_official);
    assert!(flags.has_featured);
}

#[tokio::test]
async fn public_views_hide_visitor_contact_details() {
    let db = test_db().await;
    let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let mut input = question("هل يمكن تعليم الصغار الحفظ؟");
    input.visitor_phone = "+966501234567".to_string();
    let asked = service.ask(&input, visitor("203.0.113.9")).await.expect("asked");
    service
        .add_official_answer(
            &actor_for(&admin),
            asked.question.id,
            "Yes, children can start memorizing from the age of five",
            false,
        )
        .await
        .expect("answered");
    let mut answer = community_answer();
    answer.visitor_email = "helper@example.com".to_string();
    service
        .add_community_answer(&asked.question.slug, None, &answer, visitor("198.51.100.7"))
        .await
        .expect("community answer");

    let detail = service.detail(&asked.question.slug, None).await.expect("detail");
    let detail_json = serde_json::to_string(&QuestionDetailResponse::from(detail)).expect("json");
    let index = service
        .list(&QuestionListQuery::default(), None)
        .await
        .expect("index");
    let list_json = serde_json::to_string(&index.questions.map(QuestionSummary::from)).expect("json");

    for body in [&detail_json, &list_json] {
        assert!(body.contains("محمد أحمد"));
        for private in [
            "parent@example.com",
            "+966501234567",
            "203.0.113.9",
            "integration-test",
            "visitor_email",
            "ip_address",
        ] {
            assert!(!body.contains(private), "{private} leaked");
        }
    }
    assert!(detail_json.contains("Fatima"));
    assert!(!detail_json.contains("helper@example.com"));
    assert!(!detail_json.contains("198.51.100.7"));
}

#[tokio::test]
async fn students_cannot_answer_officially() {
    let db = test_db().await;
    let student = seed_user(&db, "omar", RoleEnum::Student).await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let asked = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("asked");

    let result = service
        .add_official_answer(
            &actor_for(&student),
            asked.question.id,
            "I think so, my teacher told me the same",
            false,
        )
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn one_vote_per_address() {
    let db = test_db().await;
    let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let asked = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("asked");
    let answer = service
        .add_official_answer(
            &actor_for(&admin),
            asked.question.id,
            "Yes, children can start memorizing from the age of five",
            false,
        )
        .await
        .expect("answered");

    let first = service.vote_official(answer.id, "192.168.1.5").await.expect("vote");
    let repeat = service.vote_official(answer.id, "192.168.1.5").await.expect("vote");
    let other = service.vote_official(answer.id, "192.168.1.6").await.expect("vote");

    assert_eq!(first, VoteOutcome::Recorded(1));
    assert_eq!(repeat, VoteOutcome::AlreadyVoted);
    assert_eq!(other, VoteOutcome::Recorded(2));

    let community = service
        .add_community_answer(&asked.question.slug, None, &community_answer(), visitor("10.0.0.9"))
        .await
        .expect("community answer");
    let vote = service.vote_community(community.id, "192.168.1.5").await.expect("vote");
    assert_eq!(vote, VoteOutcome::Recorded(1));
    let repeat = service.vote_community(community.id, "192.168.1.5").await.expect("vote");
    assert_eq!(repeat, VoteOutcome::AlreadyVoted);
}

#[tokio::test]
async fn rolled_back_vote_leaves_no_trace() {
    let db = test_db().await;
    let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let asked = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("asked");
    let answer = service
        .add_official_answer(
            &actor_for(&admin),
            asked.question.id,
            "Yes, children can start memorizing from the age of five",
            false,
        )
        .await
        .expect("answered");

    let txn = db.begin().await.expect("begin");
    let inside = VoteRepository::with_connection(&txn)
        .vote_official(answer.id, "192.168.1.5")
        .await
        .expect("vote");
    assert_eq!(inside, VoteOutcome::Recorded(1));
    txn.rollback().await.expect("rollback");

    let vote = service.vote_official(answer.id, "192.168.1.5").await.expect("vote");
    assert_eq!(vote, VoteOutcome::Recorded(1));
}

#[tokio::test]
async fn subscribers_hear_about_new_answers() {
    let db = test_db().await;
    let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
    let reader = seed_user(&db, "reader", RoleEnum::Student).await;
    let mailer = RecordingMailer::new();
    let service = QnaService::new(&db, mailer.clone(), QnaSettings {
        admin_emails: Vec::new(),
        site_url: "https://academy.test".to_string(),
    });
    let asked = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("asked");
    service
        .add_official_answer(
            &actor_for(&admin),
            asked.question.id,
            "Yes, children can start memorizing from the age of five",
            false,
        )
        .await
        .expect("answered");
    let slug = asked.question.slug.clone();

    let anonymous = service
        .toggle_subscription(&slug, None, Some(" follower@example.com "))
        .await
        .expect("subscribed");
    assert!(anonymous);
    let member = service
        .toggle_subscription(&slug, Some(&actor_for(&reader)), None)
        .await
        .expect("subscribed");
    assert!(member);

    service
        .add_community_answer(&slug, None, &community_answer(), visitor("10.0.0.9"))
        .await
        .expect("answered");

    let mut recipients: Vec<String> = mailer.sent().into_iter().map(|m| m.to).collect();
    recipients.sort();
    assert_eq!(recipients, vec!["follower@example.com", "reader@example.com"]);
    let mail = &mailer.sent()[0];
    assert!(mail.text.contains(&format!("https://academy.test/qna/question/{slug}")));

    let unsubscribed = service
        .toggle_subscription(&slug, None, Some("follower@example.com"))
        .await
        .expect("toggled");
    assert!(!unsubscribed);

    let detail = service
        .detail(&slug, Some(&actor_for(&reader)))
        .await
        .expect("detail");
    assert!(detail.is_subscribed);
    assert_eq!(detail.community_answers.len(), 1);
}

#[tokio::test]
async fn anonymous_subscription_needs_an_email() {
    let db = test_db().await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let asked = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("asked");

    let result = service
        .toggle_subscription(&asked.question.slug, None, Some("   "))
        .await;
    assert!(matches!(result, Err(AppError::Validation { .. })));

    let malformed = service
        .toggle_subscription(&asked.question.slug, None, Some("abc"))
        .await;
    assert!(matches!(malformed, Err(AppError::Validation { .. })));
}

#[tokio::test]
async fn community_answers_need_a_published_question() {
    let db = test_db().await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let asked = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("asked");

    let result = service
        .add_community_answer(&asked.question.slug, None, &community_answer(), visitor("10.0.0.9"))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn staff_community_answer_approves_a_pending_question() {
    let db = test_db().await;
    let supervisor = seed_user(&db, "teacher", RoleEnum::Supervisor).await;
    let student = seed_user(&db, "pupil", RoleEnum::Student).await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let asked = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("asked");
    let slug = asked.question.slug.clone();

    let by_student = service
        .add_community_answer(&slug, Some(&actor_for(&student)), &community_answer(), visitor("10.0.0.8"))
        .await;
    assert!(matches!(by_student, Err(AppError::NotFound(_))));

    let answer = service
        .add_community_answer(&slug, Some(&actor_for(&supervisor)), &community_answer(), visitor("10.0.0.9"))
        .await
        .expect("staff answer");
    assert_eq!(answer.answered_by, Some(supervisor.id));

    let detail = service.detail(&slug, None).await.expect("now public");
    assert_eq!(detail.question.status, QuestionStatus::Approved);
    assert_eq!(detail.community_answers.len(), 1);
    assert!(detail.official_answer.is_none());
}

#[tokio::test]
async fn reports_validate_type_and_description() {
    let db = test_db().await;
    let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let asked = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("asked");
    let slug = asked.question.slug.clone();

    let bad = service
        .report(
            &slug,
            ReportInput {
                report_type: "rude".to_string(),
                description: "Something is wrong".to_string(),
                answer_id: None,
                reporter_email: String::new(),
            },
            "10.0.0.7",
        )
        .await;
    assert!(matches!(bad, Err(AppError::Validation { .. })));

    let malformed = service
        .report(
            &slug,
            ReportInput {
                report_type: "spam".to_string(),
                description: "Advertising".to_string(),
                answer_id: None,
                reporter_email: "abc".to_string(),
            },
            "10.0.0.7",
        )
        .await;
    assert!(matches!(malformed, Err(AppError::Validation { .. })));

    let report = service
        .report(
            &slug,
            ReportInput {
                report_type: "duplicate".to_string(),
                description: "Asked twice this week".to_string(),
                answer_id: None,
                reporter_email: "reporter@example.com".to_string(),
            },
            "10.0.0.7",
        )
        .await
        .expect("report stored");
    assert!(!report.is_resolved);

    let admin = actor_for(&admin);
    let open = service.reports(&admin, Some(false)).await.expect("reports");
    assert_eq!(open.len(), 1);
    let resolved = service.resolve_reports(&admin, vec![report.id]).await.expect("resolved");
    assert_eq!(resolved, 1);
    assert!(service.reports(&admin, Some(false)).await.expect("reports").is_empty());
}

#[tokio::test]
async fn pending_is_not_a_bulk_status() {
    let db = test_db().await;
    let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
    let service = QnaService::new(&db, RecordingMailer::new(), settings());
    let asked = service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor("10.0.0.1"))
        .await
        .expect("asked");
    let admin = actor_for(&admin);

    let result = service
        .set_question_status(&admin, vec![asked.question.id], QuestionStatus::Pending)
        .await;
    assert!(matches!(result, Err(AppError::Validation { .. })));

    let changed = service
        .set_question_status(&admin, vec![asked.question.id], QuestionStatus::Approved)
        .await
        .expect("approved");
    assert_eq!(changed, 1);
    let approved = service
        .all_questions(&admin, Some(QuestionStatus::Approved))
        .await
        .expect("listed");
    assert_eq!(approved.len(), 1);
}

#[tokio::test]
async fn service_accepts_any_mailer() {
    let db = test_db().await;
    let mailer: Arc<RecordingMailer> = RecordingMailer::new();
    let service = QnaService::new(&db, mailer.clone(), QnaSettings::default());

    service
        .ask(&question("هل يمكن تعليم الصغار الحفظ؟"), visitor(""))
        .await
        .expect("asked");
    assert!(mailer.sent().is_empty());
}
