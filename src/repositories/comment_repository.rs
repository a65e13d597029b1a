use crate::entities::comment;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct CommentRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommentRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    /// New comments wait for moderation.
    pub async fn create(
        &self,
        post_id: Uuid,
        author_name: String,
        author_email: String,
        content: String,
    ) -> Result<comment::Model> {
        let model = comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            post_id: Set(post_id),
            author_name: Set(author_name),
            author_email: Set(author_email),
            content: Set(content),
            is_approved: Set(false),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn approved_for_post(&self, post_id: Uuid) -> Result<Vec<comment::Model>> {
        Ok(comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::IsApproved.eq(true))
            .order_by_desc(comment::Column::CreatedAt)
            .all(self.db)
            .await?)
    }

    pub async fn find_all(&self, approved: Option<bool>) -> Result<Vec<comment::Model>> {
        let mut query = comment::Entity::find();
        if let Some(flag) = approved {
            query = query.filter(comment::Column::IsApproved.eq(flag));
        }
        Ok(query
            .order_by_desc(comment::Column::CreatedAt)
            .all(self.db)
            .await?)
    }

    pub async fn set_approved(&self, ids: Vec<Uuid>, approved: bool) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = comment::Entity::update_many()
            .col_expr(comment::Column::IsApproved, Expr::value(approved))
            .filter(comment::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
