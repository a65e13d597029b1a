use crate::entities::sea_orm_active_enums::QuestionStatus;
use crate::entities::{community_answer, public_question, question_answer, question_category};
use crate::repositories::{Page, fetch_page, icontains};
use crate::utils::slug::{question_meta_description, question_slug_base, slug_candidate, truncate_chars};
use anyhow::Result;
use sea_orm::sea_query::{Expr, Query, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub const QUESTIONS_PER_PAGE: u64 = 15;
pub const RELATED_QUESTIONS: u64 = 5;
/// Prefix lengths used by the duplicate-question heuristic.
pub const DUPLICATE_TITLE_PREFIX: usize = 30;
pub const DUPLICATE_TEXT_PREFIX: usize = 100;
pub const FREQUENT_THRESHOLD: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFilter {
    Featured,
    Unanswered,
    Frequent,
    Answered,
}

impl QuestionFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "featured" => Some(QuestionFilter::Featured),
            "unanswered" => Some(QuestionFilter::Unanswered),
            "frequent" => Some(QuestionFilter::Frequent),
            "answered" => Some(QuestionFilter::Answered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionFilter::Featured => "featured",
            QuestionFilter::Unanswered => "unanswered",
            QuestionFilter::Frequent => "frequent",
            QuestionFilter::Answered => "answered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionSort {
    #[default]
    Newest,
    Oldest,
    MostViewed,
}

impl QuestionSort {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "oldest" => QuestionSort::Oldest,
            "most_viewed" => QuestionSort::MostViewed,
            _ => QuestionSort::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionSort::Newest => "newest",
            QuestionSort::Oldest => "oldest",
            QuestionSort::MostViewed => "most_viewed",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuestionListQuery {
    pub search: Option<String>,
    pub category_slug: Option<String>,
    pub filter: Option<QuestionFilter>,
    pub sort: QuestionSort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionFlags {
    pub has_official: bool,
    pub has_featured: bool,
    pub has_community_answers: bool,
}

pub struct NewQuestion {
    pub visitor_name: String,
    pub visitor_email: String,
    pub visitor_phone: String,
    pub title: String,
    pub question_text: String,
    pub category_id: Option<Uuid>,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub is_frequent: bool,
}

fn official_answer_exists(featured_only: bool) -> SimpleExpr {
    let mut sub = Query::select();
    sub.expr(Expr::val(1))
        .from(question_answer::Entity)
        .and_where(
            Expr::col((question_answer::Entity, question_answer::Column::QuestionId))
                .equals((public_question::Entity, public_question::Column::Id)),
        );
    if featured_only {
        sub.and_where(
            Expr::col((question_answer::Entity, question_answer::Column::IsFeatured)).eq(true),
        );
    }
    Expr::exists(sub.take())
}

fn community_answer_exists() -> SimpleExpr {
    let mut sub = Query::select();
    sub.expr(Expr::val(1))
        .from(community_answer::Entity)
        .and_where(
            Expr::col((community_answer::Entity, community_answer::Column::QuestionId))
                .equals((public_question::Entity, public_question::Column::Id)),
        )
        .and_where(
            Expr::col((community_answer::Entity, community_answer::Column::IsSpam)).eq(false),
        );
    Expr::exists(sub.take())
}

fn answered_condition() -> Condition {
    Condition::any()
        .add(official_answer_exists(false))
        .add(community_answer_exists())
}

pub struct QuestionRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> QuestionRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<public_question::Model>> {
        Ok(public_question::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<public_question::Model>> {
        Ok(public_question::Entity::find()
            .filter(public_question::Column::Slug.eq(slug))
            .one(self.db)
            .await?)
    }

    pub async fn find_approved_by_slug(&self, slug: &str) -> Result<Option<public_question::Model>> {
        Ok(public_question::Entity::find()
            .filter(public_question::Column::Slug.eq(slug))
            .filter(public_question::Column::Status.eq(QuestionStatus::Approved))
            .one(self.db)
            .await?)
    }

    /// Existing approved or pending questions whose title contains the first
    /// 30 characters of `title`, or whose text contains the first 100
    /// characters of `text`.
    pub async fn count_similar(&self, title: &str, text: &str) -> Result<u64> {
        let title_prefix = truncate_chars(title, DUPLICATE_TITLE_PREFIX);
        let text_prefix = truncate_chars(text, DUPLICATE_TEXT_PREFIX);
        Ok(public_question::Entity::find()
            .filter(
                Condition::any()
                    .add(icontains(public_question::Column::Title, &title_prefix))
                    .add(icontains(public_question::Column::QuestionText, &text_prefix)),
            )
            .filter(
                public_question::Column::Status
                    .is_in([QuestionStatus::Approved, QuestionStatus::Pending]),
            )
            .count(self.db)
            .await?)
    }

    pub async fn unique_slug(&self, title: &str) -> Result<String> {
        let base = question_slug_base(title);
        let mut attempt = 0;
        let mut candidate = slug_candidate(&base, attempt);
        while self.find_by_slug(&candidate).await?.is_some() {
            attempt += 1;
            candidate = slug_candidate(&base, attempt);
        }
        Ok(candidate)
    }

    /// Stores a new question in `pending` state.
    pub async fn create(&self, input: NewQuestion) -> Result<public_question::Model> {
        let slug = self.unique_slug(&input.title).await?;
        let now = chrono::Utc::now().naive_utc();
        let model = public_question::ActiveModel {
            id: Set(Uuid::new_v4()),
            visitor_name: Set(input.visitor_name),
            visitor_email: Set(input.visitor_email),
            visitor_phone: Set(input.visitor_phone),
            title: Set(input.title),
            meta_description: Set(question_meta_description(&input.question_text)),
            question_text: Set(input.question_text),
            category_id: Set(input.category_id),
            ip_address: Set(input.ip_address),
            user_agent: Set(input.user_agent),
            status: Set(QuestionStatus::Pending),
            view_count: Set(0),
            is_frequent: Set(input.is_frequent),
            slug: Set(slug),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn list_approved(
        &self,
        query: &QuestionListQuery,
        page: Option<&str>,
    ) -> Result<Page<public_question::Model>> {
        let mut select = public_question::Entity::find()
            .filter(public_question::Column::Status.eq(QuestionStatus::Approved));

        if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(icontains(public_question::Column::Title, term))
                    .add(icontains(public_question::Column::QuestionText, term))
                    .add(icontains(public_question::Column::VisitorName, term)),
            );
        }
        if let Some(slug) = query.category_slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            select = select.filter(
                public_question::Column::CategoryId.in_subquery(
                    Query::select()
                        .column(question_category::Column::Id)
                        .from(question_category::Entity)
                        .and_where(Expr::col(question_category::Column::Slug).eq(slug))
                        .to_owned(),
                ),
            );
        }

        select = match query.filter {
            Some(QuestionFilter::Featured) => select.filter(official_answer_exists(true)),
            Some(QuestionFilter::Unanswered) => select.filter(answered_condition().not()),
            Some(QuestionFilter::Frequent) => {
                select.filter(public_question::Column::IsFrequent.eq(true))
            }
            Some(QuestionFilter::Answered) => select.filter(answered_condition()),
            None => select,
        };

        select = match query.sort {
            QuestionSort::Oldest => select.order_by_asc(public_question::Column::CreatedAt),
            QuestionSort::MostViewed => select
                .order_by_desc(public_question::Column::ViewCount)
                .order_by_desc(public_question::Column::CreatedAt),
            QuestionSort::Newest => select.order_by_desc(public_question::Column::CreatedAt),
        };

        Ok(fetch_page(self.db, select, page, QUESTIONS_PER_PAGE).await?)
    }

    /// Answer presence flags for each question id.
    pub async fn flags_for(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, QuestionFlags>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let official = question_answer::Entity::find()
            .filter(question_answer::Column::QuestionId.is_in(ids.to_vec()))
            .all(self.db)
            .await?;
        let community: HashSet<Uuid> = community_answer::Entity::find()
            .select_only()
            .column(community_answer::Column::QuestionId)
            .filter(community_answer::Column::QuestionId.is_in(ids.to_vec()))
            .filter(community_answer::Column::IsSpam.eq(false))
            .into_tuple::<Uuid>()
            .all(self.db)
            .await?
            .into_iter()
            .collect();

        let mut flags: HashMap<Uuid, QuestionFlags> = ids
            .iter()
            .map(|id| {
                let entry = QuestionFlags {
                    has_community_answers: community.contains(id),
                    ..Default::default()
                };
                (*id, entry)
            })
            .collect();
        for answer in official {
            if let Some(entry) = flags.get_mut(&answer.question_id) {
                entry.has_official = true;
                entry.has_featured = answer.is_featured;
            }
        }
        Ok(flags)
    }

    pub async fn count_approved(&self) -> Result<u64> {
        Ok(public_question::Entity::find()
            .filter(public_question::Column::Status.eq(QuestionStatus::Approved))
            .count(self.db)
            .await?)
    }

    pub async fn count_answered(&self) -> Result<u64> {
        Ok(public_question::Entity::find()
            .filter(public_question::Column::Status.eq(QuestionStatus::Approved))
            .filter(answered_condition())
            .count(self.db)
            .await?)
    }

    pub async fn count_featured(&self) -> Result<u64> {
        Ok(public_question::Entity::find()
            .filter(public_question::Column::Status.eq(QuestionStatus::Approved))
            .filter(official_answer_exists(true))
            .count(self.db)
            .await?)
    }

    pub async fn increment_views(&self, id: Uuid) -> Result<()> {
        public_question::Entity::update_many()
            .col_expr(
                public_question::Column::ViewCount,
                Expr::col(public_question::Column::ViewCount).add(1),
            )
            .filter(public_question::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Same category by views, or the latest approved questions when uncategorized.
    pub async fn related(&self, question: &public_question::Model) -> Result<Vec<public_question::Model>> {
        let select = public_question::Entity::find()
            .filter(public_question::Column::Status.eq(QuestionStatus::Approved))
            .filter(public_question::Column::Id.ne(question.id));
        let select = match question.category_id {
            Some(category_id) => select
                .filter(public_question::Column::CategoryId.eq(category_id))
                .order_by_desc(public_question::Column::ViewCount),
            None => select.order_by_desc(public_question::Column::CreatedAt),
        };
        Ok(select.limit(RELATED_QUESTIONS).all(self.db).await?)
    }

    /// Moves a pending question to approved. Other states are left untouched.
    pub async fn approve_if_pending(&self, id: Uuid) -> Result<bool> {
        let result = public_question::Entity::update_many()
            .col_expr(
                public_question::Column::Status,
                Expr::value(QuestionStatus::Approved),
            )
            .col_expr(
                public_question::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().naive_utc()),
            )
            .filter(public_question::Column::Id.eq(id))
            .filter(public_question::Column::Status.eq(QuestionStatus::Pending))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn set_status(&self, ids: Vec<Uuid>, status: QuestionStatus) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = public_question::Entity::update_many()
            .col_expr(public_question::Column::Status, Expr::value(status))
            .col_expr(
                public_question::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().naive_utc()),
            )
            .filter(public_question::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn find_all(&self, status: Option<QuestionStatus>) -> Result<Vec<public_question::Model>> {
        let mut select = public_question::Entity::find();
        if let Some(status) = status {
            select = select.filter(public_question::Column::Status.eq(status));
        }
        Ok(select
            .order_by_desc(public_question::Column::CreatedAt)
            .all(self.db)
            .await?)
    }
}
