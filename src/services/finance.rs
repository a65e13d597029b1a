use crate::entities::sea_orm_active_enums::PaymentType;
use crate::entities::{expense, finance_student, teacher};
use crate::error::{AppError, AppResult};
use crate::middleware::permission::{Actor, require_admin};
use crate::repositories::{DateWindow, FinanceRepository, NewExpense, NewFinanceStudent, NewTeacher};
use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

pub const DAYS_PER_SALARY_MONTH: i64 = 30;
pub const DAILY_REVENUE_DAYS: u64 = 7;
pub const MONTHLY_COMPARISON_MONTHS: u32 = 6;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw dashboard query string, echoed back to the caller.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[serde(default)]
pub struct DashboardQuery {
    pub filter_type: Option<String>,
    pub date: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardFilter {
    All,
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    Range { start: NaiveDate, end: NaiveDate },
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v.trim(), DATE_FORMAT).ok())
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

impl DashboardFilter {
    /// Missing or unparsable parameters fall back to `All`.
    pub fn from_query(query: &DashboardQuery) -> Self {
        let parsed = match query.filter_type.as_deref().map(str::trim) {
            Some("day") => parse_date(query.date.as_deref()).map(DashboardFilter::Day),
            Some("month") => {
                let month = query.month.as_deref().and_then(|m| m.trim().parse::<u32>().ok());
                let year = query.year.as_deref().and_then(|y| y.trim().parse::<i32>().ok());
                match (year, month) {
                    (Some(year), Some(month)) if month_bounds(year, month).is_some() => {
                        Some(DashboardFilter::Month { year, month })
                    }
                    _ => None,
                }
            }
            Some("range") => match (
                parse_date(query.start_date.as_deref()),
                parse_date(query.end_date.as_deref()),
            ) {
                (Some(start), Some(end)) if start <= end => Some(DashboardFilter::Range { start, end }),
                _ => None,
            },
            _ => None,
        };
        parsed.unwrap_or(DashboardFilter::All)
    }

    pub fn window(&self) -> DateWindow {
        match *self {
            DashboardFilter::All => None,
            DashboardFilter::Day(day) => Some((day, day)),
            DashboardFilter::Month { year, month } => month_bounds(year, month),
            DashboardFilter::Range { start, end } => Some((start, end)),
        }
    }

    /// Monthly payroll scaled to the filtered period.
    pub fn salaries(&self, teachers: &[teacher::Model]) -> Decimal {
        let monthly = monthly_payroll(teachers);
        let per_day = Decimal::from(DAYS_PER_SALARY_MONTH);
        match *self {
            DashboardFilter::Day(_) => monthly / per_day,
            DashboardFilter::Range { start, end } => {
                let days = (end - start).num_days() + 1;
                monthly * Decimal::from(days) / per_day
            }
            DashboardFilter::All | DashboardFilter::Month { .. } => monthly,
        }
    }
}

pub fn teacher_cost(teacher: &teacher::Model) -> Decimal {
    teacher.salary + teacher.bonus - teacher.deduction
}

pub fn monthly_payroll(teachers: &[teacher::Model]) -> Decimal {
    teachers.iter().map(teacher_cost).sum()
}

pub fn total_paid(student: &finance_student::Model) -> Decimal {
    match student.payment_type {
        PaymentType::PerLesson => student.paid_amount * Decimal::from(student.lessons_count),
        PaymentType::Monthly => student.paid_amount,
    }
}

fn income_between(students: &[finance_student::Model], from: NaiveDate, to: NaiveDate) -> Decimal {
    students
        .iter()
        .filter(|s| s.join_date >= from && s.join_date <= to)
        .map(total_paid)
        .sum()
}

fn expenses_between(expenses: &[expense::Model], from: NaiveDate, to: NaiveDate) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.date >= from && e.date <= to)
        .map(|e| e.amount)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Change {
    pub percent: Decimal,
    pub up: bool,
}

/// Percentage change rounded to two places; a zero baseline reports no change.
pub fn percent_change(current: Decimal, previous: Decimal) -> Change {
    if previous.is_zero() {
        return Change {
            percent: Decimal::ZERO,
            up: current >= Decimal::ZERO,
        };
    }
    let change = ((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(2);
    Change {
        percent: change.abs(),
        up: change >= Decimal::ZERO,
    }
}

/// First day of each of the trailing months, oldest first, ending with the
/// current month.
pub fn trailing_month_starts(today: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let current = today.with_day(1).unwrap_or(today);
    (0..count)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyRevenue {
    pub date: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyComparison {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub salaries: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FinanceDashboard {
    pub total_salaries: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub income_change: Change,
    pub expenses_change: Change,
    pub profit_change: Change,
    pub daily_revenue: Vec<DailyRevenue>,
    pub monthly_comparison: Vec<MonthlyComparison>,
    pub filters: DashboardQuery,
}

fn as_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

pub struct FinanceService<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FinanceService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn dashboard(
        &self,
        actor: &Actor,
        query: DashboardQuery,
        today: NaiveDate,
    ) -> AppResult<FinanceDashboard> {
        require_admin(actor)?;
        let repo = FinanceRepository::with_connection(self.db);
        let filter = DashboardFilter::from_query(&query);
        let window = filter.window();

        let teachers = repo.teachers().await?;
        let students = repo.students(window).await?;
        let expenses = repo.expenses(window).await?;

        let total_salaries = filter.salaries(&teachers);
        let total_income: Decimal = students.iter().map(total_paid).sum();
        let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();
        let net_profit = total_income - (total_salaries + total_expenses);

        // Trailing series and yesterday's figures come from one unfiltered window.
        let month_starts = trailing_month_starts(today, MONTHLY_COMPARISON_MONTHS);
        let week_start = today - Days::new(DAILY_REVENUE_DAYS - 1);
        let history_start = month_starts
            .first()
            .copied()
            .map_or(week_start, |m| m.min(week_start))
            .min(today - Days::new(1));
        let history_window = Some((history_start, today));
        let history_students = repo.students(history_window).await?;
        let history_expenses = repo.expenses(history_window).await?;

        let yesterday = today - Days::new(1);
        let yesterday_income = income_between(&history_students, yesterday, yesterday);
        let yesterday_expenses = expenses_between(&history_expenses, yesterday, yesterday);
        let yesterday_profit = yesterday_income - (total_salaries + yesterday_expenses);

        let daily_revenue = (0..DAILY_REVENUE_DAYS)
            .rev()
            .map(|back| {
                let day = today - Days::new(back);
                DailyRevenue {
                    date: day.format("%d %b").to_string(),
                    total: as_f64(income_between(&history_students, day, day)),
                }
            })
            .collect();

        let monthly_comparison = month_starts
            .iter()
            .filter_map(|first| {
                let (from, to) = month_bounds(first.year(), first.month())?;
                let income = income_between(&history_students, from, to);
                let spent = expenses_between(&history_expenses, from, to);
                Some(MonthlyComparison {
                    month: first.format("%b %Y").to_string(),
                    income: as_f64(income),
                    expenses: as_f64(spent),
                    salaries: as_f64(total_salaries),
                    profit: as_f64(income - (total_salaries + spent)),
                })
            })
            .collect();

        tracing::debug!("Finance dashboard built for filter {:?}", filter);
        Ok(FinanceDashboard {
            total_salaries,
            total_income,
            total_expenses,
            net_profit,
            income_change: percent_change(total_income, yesterday_income),
            expenses_change: percent_change(total_expenses, yesterday_expenses),
            profit_change: percent_change(net_profit, yesterday_profit),
            daily_revenue,
            monthly_comparison,
            filters: query,
        })
    }

    pub async fn teachers(&self, actor: &Actor) -> AppResult<Vec<teacher::Model>> {
        require_admin(actor)?;
        Ok(FinanceRepository::with_connection(self.db).teachers().await?)
    }

    pub async fn create_teacher(&self, actor: &Actor, input: NewTeacher) -> AppResult<teacher::Model> {
        require_admin(actor)?;
        if input.name.trim().is_empty() {
            return Err(AppError::bad_request("Teacher name is required"));
        }
        Ok(FinanceRepository::with_connection(self.db)
            .create_teacher(input)
            .await?)
    }

    pub async fn delete_teacher(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        require_admin(actor)?;
        if !FinanceRepository::with_connection(self.db).delete_teacher(id).await? {
            return Err(AppError::not_found("Teacher not found"));
        }
        Ok(())
    }

    pub async fn students(&self, actor: &Actor) -> AppResult<Vec<finance_student::Model>> {
        require_admin(actor)?;
        Ok(FinanceRepository::with_connection(self.db)
            .students(None)
            .await?)
    }

    pub async fn create_student(
        &self,
        actor: &Actor,
        input: NewFinanceStudent,
    ) -> AppResult<finance_student::Model> {
        require_admin(actor)?;
        if input.name.trim().is_empty() {
            return Err(AppError::bad_request("Student name is required"));
        }
        let repo = FinanceRepository::with_connection(self.db);
        if let Some(teacher_id) = input.teacher_id {
            repo.find_teacher(teacher_id)
                .await?
                .ok_or_else(|| AppError::bad_request("Select a valid teacher"))?;
        }
        Ok(repo.create_student(input).await?)
    }

    pub async fn delete_student(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        require_admin(actor)?;
        if !FinanceRepository::with_connection(self.db).delete_student(id).await? {
            return Err(AppError::not_found("Student not found"));
        }
        Ok(())
    }

    pub async fn expenses(&self, actor: &Actor) -> AppResult<Vec<expense::Model>> {
        require_admin(actor)?;
        Ok(FinanceRepository::with_connection(self.db)
            .expenses(None)
            .await?)
    }

    pub async fn create_expense(&self, actor: &Actor, input: NewExpense) -> AppResult<expense::Model> {
        require_admin(actor)?;
        if input.title.trim().is_empty() {
            return Err(AppError::bad_request("Expense title is required"));
        }
        Ok(FinanceRepository::with_connection(self.db)
            .create_expense(input)
            .await?)
    }

    pub async fn delete_expense(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        require_admin(actor)?;
        if !FinanceRepository::with_connection(self.db).delete_expense(id).await? {
            return Err(AppError::not_found("Expense not found"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::JobTitle;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn teacher(salary: &str, bonus: &str, deduction: &str) -> teacher::Model {
        teacher::Model {
            id: Uuid::new_v4(),
            name: "T".to_string(),
            job_title: JobTitle::Senior,
            salary: dec(salary),
            working_hours: 40,
            bonus: dec(bonus),
            deduction: dec(deduction),
            notes: None,
            start_date: date("2024-01-01"),
        }
    }

    fn student(payment_type: PaymentType, paid: &str, lessons: i32) -> finance_student::Model {
        finance_student::Model {
            id: Uuid::new_v4(),
            teacher_id: None,
            name: "S".to_string(),
            session_duration: 30,
            lessons_count: lessons,
            payment_type,
            paid_amount: dec(paid),
            join_date: date("2025-03-10"),
        }
    }

    fn query(filter_type: &str) -> DashboardQuery {
        DashboardQuery {
            filter_type: Some(filter_type.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn per_lesson_students_pay_per_lesson() {
        assert_eq!(total_paid(&student(PaymentType::PerLesson, "12.50", 8)), dec("100.00"));
        assert_eq!(total_paid(&student(PaymentType::Monthly, "90", 8)), dec("90"));
    }

    #[test]
    fn filters_fall_back_to_all_on_bad_input() {
        let mut day = query("day");
        assert_eq!(DashboardFilter::from_query(&day), DashboardFilter::All);
        day.date = Some("2025-02-30".to_string());
        assert_eq!(DashboardFilter::from_query(&day), DashboardFilter::All);

        let mut month = query("month");
        month.month = Some("13".to_string());
        month.year = Some("2025".to_string());
        assert_eq!(DashboardFilter::from_query(&month), DashboardFilter::All);

        assert_eq!(DashboardFilter::from_query(&query("weekly")), DashboardFilter::All);
    }

    #[test]
    fn month_filter_covers_the_calendar_month() {
        let mut month = query("month");
        month.month = Some("2".to_string());
        month.year = Some("2024".to_string());
        let filter = DashboardFilter::from_query(&month);
        assert_eq!(filter.window(), Some((date("2024-02-01"), date("2024-02-29"))));
    }

    #[test]
    fn salaries_are_prorated_for_day_and_range() {
        let teachers = vec![teacher("3000", "150", "50"), teacher("1500", "0", "0")];
        assert_eq!(monthly_payroll(&teachers), dec("4600"));

        let day = DashboardFilter::Day(date("2025-03-10"));
        assert_eq!(day.salaries(&teachers), dec("4600") / dec("30"));

        let range = DashboardFilter::Range {
            start: date("2025-03-01"),
            end: date("2025-03-15"),
        };
        assert_eq!(range.salaries(&teachers), dec("2300"));

        let month = DashboardFilter::Month { year: 2025, month: 3 };
        assert_eq!(month.salaries(&teachers), dec("4600"));
    }

    #[test]
    fn percent_change_guards_zero_baseline() {
        assert_eq!(
            percent_change(dec("50"), Decimal::ZERO),
            Change { percent: Decimal::ZERO, up: true }
        );
        assert_eq!(
            percent_change(dec("-5"), Decimal::ZERO),
            Change { percent: Decimal::ZERO, up: false }
        );
        assert_eq!(
            percent_change(dec("75"), dec("100")),
            Change { percent: dec("25.00"), up: false }
        );
        assert_eq!(
            percent_change(dec("100"), dec("30")),
            Change { percent: dec("233.33"), up: true }
        );
    }

    #[test]
    fn trailing_months_step_by_calendar_month() {
        let starts = trailing_month_starts(date("2025-03-31"), 6);
        let labels: Vec<String> = starts.iter().map(|d| d.format("%b %Y").to_string()).collect();
        assert_eq!(
            labels,
            vec!["Oct 2024", "Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025", "Mar 2025"]
        );
    }
}
