use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, Select,
};
use serde::Serialize;
use utoipa::ToSchema;

pub mod answer_repository;
pub mod blog_category_repository;
pub mod comment_repository;
pub mod finance_repository;
pub mod message_repository;
pub mod post_repository;
pub mod question_category_repository;
pub mod question_repository;
pub mod report_repository;
pub mod session_repository;
pub mod student_profile_repository;
pub mod subscription_repository;
pub mod trial_booking_repository;
pub mod user_repository;
pub mod vote_repository;

pub use answer_repository::{AnswerRepository, NewCommunityAnswer};
pub use blog_category_repository::BlogCategoryRepository;
pub use comment_repository::CommentRepository;
pub use finance_repository::{
    DateWindow, FinanceRepository, NewExpense, NewFinanceStudent, NewTeacher,
};
pub use message_repository::MessageRepository;
pub use post_repository::{POSTS_PER_PAGE, PostRepository, PostSort, PostWrite};
pub use question_category_repository::QuestionCategoryRepository;
pub use question_repository::{
    NewQuestion, QuestionFilter, QuestionFlags, QuestionListQuery, QuestionRepository, QuestionSort,
};
pub use report_repository::{NewReport, ReportRepository};
pub use session_repository::SessionRepository;
pub use student_profile_repository::{ProfileFields, StudentProfileRepository};
pub use subscription_repository::{Subscriber, SubscriptionRepository};
pub use trial_booking_repository::{NewBooking, TrialBookingRepository};
pub use user_repository::{NewUser, UserRepository};
pub use vote_repository::{VoteOutcome, VoteRepository};

/// Case-insensitive `LIKE '%term%'` with `%`, `_` and `\` escaped.
pub(crate) fn icontains<Col: ColumnTrait>(col: Col, term: &str) -> SimpleExpr {
    let mut escaped = String::with_capacity(term.len());
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    Expr::expr(Func::lower(Expr::col((col.entity_name(), col))))
        .like(LikeExpr::new(format!("%{escaped}%")).escape('\\'))
}

/// Unique-constraint violations, across the Postgres and SQLite drivers.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    if let Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return true;
    }
    let text = err.to_string().to_lowercase();
    text.contains("unique constraint") || text.contains("duplicate key")
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Parses a 1-based page number: unparsable input selects the first page,
/// numbers past the end select the last page.
pub fn clamp_page(requested: Option<&str>, total_pages: u64) -> u64 {
    let last = total_pages.max(1);
    match requested.and_then(|raw| raw.trim().parse::<i64>().ok()) {
        Some(n) if n < 1 => 1,
        Some(n) => (n as u64).min(last),
        None => 1,
    }
}

pub(crate) async fn fetch_page<C, E, M>(
    db: &C,
    query: Select<E>,
    requested: Option<&str>,
    page_size: u64,
) -> Result<Page<M>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait<Model = M>,
    M: FromQueryResult + Sized + Send + Sync + 'static,
{
    let paginator = query.paginate(db, page_size);
    let counts = paginator.num_items_and_pages().await?;
    let total_pages = counts.number_of_pages.max(1);
    let page = clamp_page(requested, total_pages);
    let items = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        items,
        page,
        total_pages,
        total_items: counts.number_of_items,
        has_next: page < total_pages,
        has_previous: page > 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_is_clamped_into_range() {
        assert_eq!(clamp_page(None, 5), 1);
        assert_eq!(clamp_page(Some("abc"), 5), 1);
        assert_eq!(clamp_page(Some("0"), 5), 1);
        assert_eq!(clamp_page(Some("3"), 5), 3);
        assert_eq!(clamp_page(Some("99"), 5), 5);
        assert_eq!(clamp_page(Some("2"), 0), 1);
    }
}
