//! Finance dashboard figures over a small seeded ledger.

mod common;

use academy_service::entities::sea_orm_active_enums::{JobTitle, PaymentType, RoleEnum};
use academy_service::error::AppError;
use academy_service::middleware::permission::Actor;
use academy_service::repositories::{NewExpense, NewFinanceStudent, NewTeacher};
use academy_service::services::finance::{DashboardQuery, FinanceService};
use chrono::NaiveDate;
use common::{actor_for, seed_user, test_db};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn today() -> NaiveDate {
    date(2025, 3, 10)
}

/// One teacher on 3000 a month, two students and two expenses.
async fn seed_ledger(db: &DatabaseConnection) -> Actor {
    let admin = actor_for(&seed_user(db, "admin", RoleEnum::Admin).await);
    let finance = FinanceService::new(db);

    let teacher = finance
        .create_teacher(
            &admin,
            NewTeacher {
                name: "Ustadh Kareem".to_string(),
                job_title: JobTitle::Senior,
                salary: Decimal::from(2900),
                working_hours: 120,
                bonus: Decimal::from(150),
                deduction: Decimal::from(50),
                notes: None,
                start_date: date(2024, 9, 1),
            },
        )
        .await
        .expect("teacher");

    finance
        .create_student(
            &admin,
            NewFinanceStudent {
                teacher_id: Some(teacher.id),
                name: "Omar".to_string(),
                session_duration: 30,
                lessons_count: 8,
                payment_type: PaymentType::PerLesson,
                paid_amount: Decimal::new(125, 1),
                join_date: today(),
            },
        )
        .await
        .expect("per-lesson student");
    finance
        .create_student(
            &admin,
            NewFinanceStudent {
                teacher_id: None,
                name: "Maryam".to_string(),
                session_duration: 40,
                lessons_count: 12,
                payment_type: PaymentType::Monthly,
                paid_amount: Decimal::from(50),
                join_date: date(2025, 3, 9),
            },
        )
        .await
        .expect("monthly student");

    for (title, amount, day) in [("Zoom", 20, today()), ("Ads", 40, date(2025, 1, 15))] {
        finance
            .create_expense(
                &admin,
                NewExpense {
                    title: title.to_string(),
                    amount: Decimal::from(amount),
                    date: day,
                    notes: None,
                },
            )
            .await
            .expect("expense");
    }
    admin
}

#[tokio::test]
async fn day_filter_prorates_salaries() {
    let db = test_db().await;
    let admin = seed_ledger(&db).await;
    let query = DashboardQuery {
        filter_type: Some("day".to_string()),
        date: Some("2025-03-10".to_string()),
        ..DashboardQuery::default()
    };

    let dashboard = FinanceService::new(&db)
        .dashboard(&admin, query, today())
        .await
        .expect("dashboard");

    assert_eq!(dashboard.total_income, Decimal::from(100));
    assert_eq!(dashboard.total_expenses, Decimal::from(20));
    assert_eq!(dashboard.total_salaries, Decimal::from(100));
    assert_eq!(dashboard.net_profit, Decimal::from(-20));

    assert_eq!(dashboard.income_change.percent, Decimal::from(100));
    assert!(dashboard.income_change.up);
    assert_eq!(dashboard.expenses_change.percent, Decimal::ZERO);
    assert!(dashboard.expenses_change.up);
    assert_eq!(dashboard.profit_change.percent, Decimal::from(60));
    assert!(!dashboard.profit_change.up);
    assert_eq!(dashboard.filters.date.as_deref(), Some("2025-03-10"));
}

#[tokio::test]
async fn trailing_series_cover_the_week_and_six_months() {
    let db = test_db().await;
    let admin = seed_ledger(&db).await;

    let dashboard = FinanceService::new(&db)
        .dashboard(&admin, DashboardQuery::default(), today())
        .await
        .expect("dashboard");

    assert_eq!(dashboard.total_income, Decimal::from(150));
    assert_eq!(dashboard.total_expenses, Decimal::from(60));
    assert_eq!(dashboard.total_salaries, Decimal::from(3000));

    assert_eq!(dashboard.daily_revenue.len(), 7);
    assert_eq!(dashboard.daily_revenue[6].date, "10 Mar");
    assert_eq!(dashboard.daily_revenue[6].total, 100.0);
    assert_eq!(dashboard.daily_revenue[5].total, 50.0);
    assert_eq!(dashboard.daily_revenue[0].total, 0.0);

    let months: Vec<&str> = dashboard
        .monthly_comparison
        .iter()
        .map(|m| m.month.as_str())
        .collect();
    assert_eq!(
        months,
        vec!["Oct 2024", "Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025", "Mar 2025"]
    );
    let march = &dashboard.monthly_comparison[5];
    assert_eq!(march.income, 150.0);
    assert_eq!(march.expenses, 20.0);
    assert_eq!(march.profit, 150.0 - (3000.0 + 20.0));
    assert_eq!(dashboard.monthly_comparison[3].expenses, 40.0);
}

#[tokio::test]
async fn invalid_range_falls_back_to_everything() {
    let db = test_db().await;
    let admin = seed_ledger(&db).await;
    let query = DashboardQuery {
        filter_type: Some("range".to_string()),
        start_date: Some("2025-03-10".to_string()),
        end_date: Some("2025-03-01".to_string()),
        ..DashboardQuery::default()
    };

    let dashboard = FinanceService::new(&db)
        .dashboard(&admin, query, today())
        .await
        .expect("dashboard");
    assert_eq!(dashboard.total_income, Decimal::from(150));
    assert_eq!(dashboard.total_salaries, Decimal::from(3000));
}

#[tokio::test]
async fn finance_is_admin_only() {
    let db = test_db().await;
    let supervisor = actor_for(&seed_user(&db, "sheikh", RoleEnum::Supervisor).await);

    let result = FinanceService::new(&db)
        .dashboard(&supervisor, DashboardQuery::default(), today())
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn records_can_be_removed() {
    let db = test_db().await;
    let admin = seed_ledger(&db).await;
    let finance = FinanceService::new(&db);

    let expenses = finance.expenses(&admin).await.expect("expenses");
    assert_eq!(expenses.len(), 2);
    finance
        .delete_expense(&admin, expenses[0].id)
        .await
        .expect("deleted");
    assert_eq!(finance.expenses(&admin).await.expect("expenses").len(), 1);

    let missing = finance.delete_teacher(&admin, uuid::Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let orphan = finance
        .create_student(
            &admin,
            NewFinanceStudent {
                teacher_id: Some(uuid::Uuid::new_v4()),
                name: "Hamza".to_string(),
                session_duration: 30,
                lessons_count: 4,
                payment_type: PaymentType::Monthly,
                paid_amount: Decimal::from(40),
                join_date: today(),
            },
        )
        .await;
    assert!(matches!(orphan, Err(AppError::Validation { .. })));
}
