use crate::entities::sea_orm_active_enums::PostStatus;
use crate::entities::{blog_category, post};
use crate::utils::slug::{slug_candidate, slugify_unicode};
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

pub struct BlogCategoryRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BlogCategoryRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<blog_category::Model>> {
        Ok(blog_category::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<blog_category::Model>> {
        Ok(blog_category::Entity::find()
            .filter(blog_category::Column::Slug.eq(slug))
            .one(self.db)
            .await?)
    }

    pub async fn find_all(&self) -> Result<Vec<blog_category::Model>> {
        Ok(blog_category::Entity::find()
            .order_by_asc(blog_category::Column::Name)
            .all(self.db)
            .await?)
    }

    /// Categories that have at least one published post, with that count.
    pub async fn with_published_counts(&self) -> Result<Vec<(blog_category::Model, i64)>> {
        let counts: Vec<(Option<Uuid>, i64)> = post::Entity::find()
            .select_only()
            .column(post::Column::CategoryId)
            .column_as(Expr::col(post::Column::Id).count(), "posts_count")
            .filter(post::Column::Status.eq(PostStatus::Published))
            .filter(post::Column::CategoryId.is_not_null())
            .group_by(post::Column::CategoryId)
            .into_tuple()
            .all(self.db)
            .await?;

        let counts: HashMap<Uuid, i64> = counts
            .into_iter()
            .filter_map(|(id, count)| id.map(|id| (id, count)))
            .collect();

        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter_map(|cat| {
                let count = counts.get(&cat.id).copied().unwrap_or(0);
                (count > 0).then_some((cat, count))
            })
            .collect())
    }

    async fn slug_taken(&self, slug: &str) -> Result<bool> {
        let count = blog_category::Entity::find()
            .filter(blog_category::Column::Slug.eq(slug))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(
        &self,
        name: String,
        slug: Option<String>,
        description: String,
        icon: String,
    ) -> Result<blog_category::Model> {
        let base = match slug.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            Some(explicit) => explicit,
            None => slugify_unicode(&name),
        };

        let mut attempt = 0;
        let mut candidate = slug_candidate(&base, attempt);
        while self.slug_taken(&candidate).await? {
            attempt += 1;
            candidate = slug_candidate(&base, attempt);
        }

        let model = blog_category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            slug: Set(candidate),
            description: Set(description),
            icon: Set(icon),
        };
        Ok(model.insert(self.db).await?)
    }
}
