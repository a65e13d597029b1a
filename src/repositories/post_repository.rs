use crate::entities::{blog_category, post};
use crate::entities::sea_orm_active_enums::PostStatus;
use crate::repositories::{Page, fetch_page, icontains};
use crate::utils::slug::{auto_excerpt, reading_time_minutes, slug_candidate, slugify_unicode};
use anyhow::Result;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub const POSTS_PER_PAGE: u64 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    #[default]
    Latest,
    Popular,
    Oldest,
}

impl PostSort {
    pub fn parse(value: &str) -> Self {
        match value {
            "popular" => PostSort::Popular,
            "oldest" => PostSort::Oldest,
            _ => PostSort::Latest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostSort::Latest => "latest",
            PostSort::Popular => "popular",
            PostSort::Oldest => "oldest",
        }
    }
}

/// Editable fields of a post. Derived fields are computed on save.
#[derive(Debug, Clone)]
pub struct PostWrite {
    pub title: String,
    pub slug: Option<String>,
    pub category_id: Option<Uuid>,
    pub excerpt: String,
    pub content: String,
    pub cloud_url: Option<String>,
    pub status: PostStatus,
    pub meta_description: String,
    pub keywords: String,
    pub is_featured: bool,
    pub allow_comments: bool,
}

pub struct PostRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PostRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<post::Model>> {
        Ok(post::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn find_published_by_slug(&self, slug: &str) -> Result<Option<post::Model>> {
        Ok(post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Status.eq(PostStatus::Published))
            .one(self.db)
            .await?)
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool> {
        let mut query = post::Entity::find().filter(post::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(post::Column::Id.ne(id));
        }
        Ok(query.count(self.db).await? > 0)
    }

    pub async fn unique_slug(&self, base: &str, exclude: Option<Uuid>) -> Result<String> {
        let mut attempt = 0;
        let mut candidate = slug_candidate(base, attempt);
        while self.slug_taken(&candidate, exclude).await? {
            attempt += 1;
            candidate = slug_candidate(base, attempt);
        }
        Ok(candidate)
    }

    pub async fn create(&self, author_id: Uuid, input: PostWrite) -> Result<post::Model> {
        let base = input
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| slugify_unicode(&input.title));
        let slug = self.unique_slug(&base, None).await?;

        let now = chrono::Utc::now().naive_utc();
        let excerpt = if input.excerpt.trim().is_empty() && !input.content.is_empty() {
            auto_excerpt(&input.content)
        } else {
            input.excerpt
        };
        let published_at = (input.status == PostStatus::Published).then_some(now);

        let model = post::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            slug: Set(slug),
            author_id: Set(author_id),
            category_id: Set(input.category_id),
            excerpt: Set(excerpt),
            reading_time: Set(reading_time_minutes(&input.content)),
            content: Set(input.content),
            cloud_url: Set(input.cloud_url),
            status: Set(input.status),
            views_count: Set(0),
            meta_description: Set(input.meta_description),
            keywords: Set(input.keywords),
            is_featured: Set(input.is_featured),
            allow_comments: Set(input.allow_comments),
            created_at: Set(now),
            updated_at: Set(now),
            published_at: Set(published_at),
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn update(&self, id: Uuid, input: PostWrite) -> Result<Option<post::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let slug = match input.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(explicit) if explicit != existing.slug => {
                Some(self.unique_slug(explicit, Some(id)).await?)
            }
            _ => None,
        };
        let back_to_published =
            input.status == PostStatus::Published && existing.published_at.is_none();

        let now = chrono::Utc::now().naive_utc();
        let excerpt = if input.excerpt.trim().is_empty() && !input.content.is_empty() {
            auto_excerpt(&input.content)
        } else {
            input.excerpt
        };

        let mut active: post::ActiveModel = existing.into();
        if let Some(slug) = slug {
            active.slug = Set(slug);
        }
        if back_to_published {
            active.published_at = Set(Some(now));
        }
        active.title = Set(input.title);
        active.category_id = Set(input.category_id);
        active.excerpt = Set(excerpt);
        active.reading_time = Set(reading_time_minutes(&input.content));
        active.content = Set(input.content);
        active.cloud_url = Set(input.cloud_url);
        active.status = Set(input.status);
        active.meta_description = Set(input.meta_description);
        active.keywords = Set(input.keywords);
        active.is_featured = Set(input.is_featured);
        active.allow_comments = Set(input.allow_comments);
        active.updated_at = Set(now);

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn list_published(
        &self,
        search: Option<&str>,
        category_slug: Option<&str>,
        sort: PostSort,
        page: Option<&str>,
    ) -> Result<Page<post::Model>> {
        let mut query = post::Entity::find().filter(post::Column::Status.eq(PostStatus::Published));

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(icontains(post::Column::Title, term))
                    .add(icontains(post::Column::Content, term))
                    .add(icontains(post::Column::Excerpt, term)),
            );
        }
        if let Some(slug) = category_slug.map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                post::Column::CategoryId.in_subquery(
                    Query::select()
                        .column(blog_category::Column::Id)
                        .from(blog_category::Entity)
                        .and_where(Expr::col(blog_category::Column::Slug).eq(slug))
                        .to_owned(),
                ),
            );
        }

        query = match sort {
            PostSort::Popular => query.order_by_desc(post::Column::ViewsCount),
            PostSort::Oldest => query.order_by_asc(post::Column::PublishedAt),
            PostSort::Latest => query.order_by_desc(post::Column::PublishedAt),
        };

        Ok(fetch_page(self.db, query, page, POSTS_PER_PAGE).await?)
    }

    pub async fn list_published_in_category(
        &self,
        category_id: Uuid,
        page: Option<&str>,
    ) -> Result<Page<post::Model>> {
        let query = post::Entity::find()
            .filter(post::Column::Status.eq(PostStatus::Published))
            .filter(post::Column::CategoryId.eq(category_id))
            .order_by_desc(post::Column::PublishedAt);
        Ok(fetch_page(self.db, query, page, POSTS_PER_PAGE).await?)
    }

    pub async fn featured(&self, limit: u64) -> Result<Vec<post::Model>> {
        Ok(post::Entity::find()
            .filter(post::Column::Status.eq(PostStatus::Published))
            .filter(post::Column::IsFeatured.eq(true))
            .order_by_desc(post::Column::PublishedAt)
            .limit(limit)
            .all(self.db)
            .await?)
    }

    pub async fn most_viewed(&self, limit: u64) -> Result<Vec<post::Model>> {
        Ok(post::Entity::find()
            .filter(post::Column::Status.eq(PostStatus::Published))
            .order_by_desc(post::Column::ViewsCount)
            .limit(limit)
            .all(self.db)
            .await?)
    }

    /// Published posts sharing the category of `post` (uncategorized posts match each other).
    pub async fn related(&self, post: &post::Model, limit: u64) -> Result<Vec<post::Model>> {
        let mut query = post::Entity::find()
            .filter(post::Column::Status.eq(PostStatus::Published))
            .filter(post::Column::Id.ne(post.id));
        query = match post.category_id {
            Some(category_id) => query.filter(post::Column::CategoryId.eq(category_id)),
            None => query.filter(post::Column::CategoryId.is_null()),
        };
        Ok(query
            .order_by_desc(post::Column::PublishedAt)
            .limit(limit)
            .all(self.db)
            .await?)
    }

    /// Single `UPDATE ... SET views_count = views_count + 1`.
    pub async fn increment_views(&self, id: Uuid) -> Result<()> {
        post::Entity::update_many()
            .col_expr(
                post::Column::ViewsCount,
                Expr::col(post::Column::ViewsCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<post::Model>> {
        Ok(post::Entity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(self.db)
            .await?)
    }

    pub async fn publish(&self, ids: Vec<Uuid>) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let now = chrono::Utc::now().naive_utc();
        let result = post::Entity::update_many()
            .col_expr(post::Column::Status, Expr::value(PostStatus::Published))
            .col_expr(post::Column::PublishedAt, Expr::value(now))
            .filter(post::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn make_draft(&self, ids: Vec<Uuid>) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = post::Entity::update_many()
            .col_expr(post::Column::Status, Expr::value(PostStatus::Draft))
            .filter(post::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn set_featured(&self, ids: Vec<Uuid>, featured: bool) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = post::Entity::update_many()
            .col_expr(post::Column::IsFeatured, Expr::value(featured))
            .filter(post::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
