use crate::entities::sea_orm_active_enums::QuestionStatus;
use crate::entities::{public_question, question_category};
use crate::utils::slug::{slug_candidate, slugify_unicode};
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

pub struct QuestionCategoryRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> QuestionCategoryRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<question_category::Model>> {
        Ok(question_category::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<question_category::Model>> {
        Ok(question_category::Entity::find()
            .filter(question_category::Column::Slug.eq(slug))
            .one(self.db)
            .await?)
    }

    pub async fn find_all(&self) -> Result<Vec<question_category::Model>> {
        Ok(question_category::Entity::find()
            .order_by_asc(question_category::Column::SortOrder)
            .order_by_asc(question_category::Column::Name)
            .all(self.db)
            .await?)
    }

    pub async fn with_approved_counts(&self) -> Result<Vec<(question_category::Model, i64)>> {
        let counts: Vec<(Option<Uuid>, i64)> = public_question::Entity::find()
            .select_only()
            .column(public_question::Column::CategoryId)
            .column_as(Expr::col(public_question::Column::Id).count(), "question_count")
            .filter(public_question::Column::Status.eq(QuestionStatus::Approved))
            .filter(public_question::Column::CategoryId.is_not_null())
            .group_by(public_question::Column::CategoryId)
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

    pub async fn create(
        &self,
        name: String,
        slug: Option<String>,
        icon: String,
        description: String,
        sort_order: i32,
    ) -> Result<question_category::Model> {
        let base = match slug.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            Some(explicit) => explicit,
            None => slugify_unicode(&name),
        };

        let mut attempt = 0;
        let mut candidate = slug_candidate(&base, attempt);
        while question_category::Entity::find()
            .filter(question_category::Column::Slug.eq(candidate.as_str()))
            .count(self.db)
            .await?
            > 0
        {
            attempt += 1;
            candidate = slug_candidate(&base, attempt);
        }

        let model = question_category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            slug: Set(candidate),
            icon: Set(icon),
            description: Set(description),
            sort_order: Set(sort_order),
        };
        Ok(model.insert(self.db).await?)
    }
}
