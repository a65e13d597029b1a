use crate::entities::{community_answer, question_answer};
use crate::repositories::is_unique_violation;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

pub struct NewCommunityAnswer {
    pub question_id: Uuid,
    pub answer_text: String,
    pub answered_by: Option<Uuid>,
    pub visitor_name: String,
    pub visitor_email: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
}

pub struct AnswerRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AnswerRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_official(&self, question_id: Uuid) -> Result<Option<question_answer::Model>> {
        Ok(question_answer::Entity::find()
            .filter(question_answer::Column::QuestionId.eq(question_id))
            .one(self.db)
            .await?)
    }

    pub async fn find_official_by_id(&self, id: Uuid) -> Result<Option<question_answer::Model>> {
        Ok(question_answer::Entity::find_by_id(id).one(self.db).await?)
    }

    /// Returns `None` when the question already has its official answer.
    pub async fn create_official(
        &self,
        question_id: Uuid,
        answer_text: String,
        answered_by: Uuid,
        is_featured: bool,
    ) -> Result<Option<question_answer::Model>> {
        let now = chrono::Utc::now().naive_utc();
        let model = question_answer::ActiveModel {
            id: Set(Uuid::new_v4()),
            question_id: Set(question_id),
            answer_text: Set(answer_text),
            answered_by: Set(Some(answered_by)),
            is_featured: Set(is_featured),
            likes: Set(0),
            answered_at: Set(now),
            updated_at: Set(now),
        };
        match model.insert(self.db).await {
            Ok(answer) => Ok(Some(answer)),
            Err(err) if is_unique_violation(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn official_count(&self) -> Result<u64> {
        Ok(question_answer::Entity::find().count(self.db).await?)
    }

    pub async fn increment_official_likes(&self, id: Uuid) -> Result<i32> {
        question_answer::Entity::update_many()
            .col_expr(
                question_answer::Column::Likes,
                Expr::col(question_answer::Column::Likes).add(1),
            )
            .filter(question_answer::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        let likes = self
            .find_official_by_id(id)
            .await?
            .map(|answer| answer.likes)
            .unwrap_or_default();
        Ok(likes)
    }

    pub async fn find_community_by_id(&self, id: Uuid) -> Result<Option<community_answer::Model>> {
        Ok(community_answer::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn create_community(&self, input: NewCommunityAnswer) -> Result<community_answer::Model> {
        let now = chrono::Utc::now().naive_utc();
        let model = community_answer::ActiveModel {
            id: Set(Uuid::new_v4()),
            question_id: Set(input.question_id),
            answer_text: Set(input.answer_text),
            answered_by: Set(input.answered_by),
            visitor_name: Set(input.visitor_name),
            visitor_email: Set(input.visitor_email),
            is_verified: Set(false),
            is_spam: Set(false),
            likes: Set(0),
            ip_address: Set(input.ip_address),
            user_agent: Set(input.user_agent),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(self.db).await?)
    }

    /// Visible community answers: verified first, then most liked, then newest.
    pub async fn community_for_question(&self, question_id: Uuid) -> Result<Vec<community_answer::Model>> {
        Ok(community_answer::Entity::find()
            .filter(community_answer::Column::QuestionId.eq(question_id))
            .filter(community_answer::Column::IsSpam.eq(false))
            .order_by_desc(community_answer::Column::IsVerified)
            .order_by_desc(community_answer::Column::Likes)
            .order_by_desc(community_answer::Column::CreatedAt)
            .all(self.db)
            .await?)
    }

    pub async fn community_count(&self) -> Result<u64> {
        Ok(community_answer::Entity::find()
            .filter(community_answer::Column::IsSpam.eq(false))
            .count(self.db)
            .await?)
    }

    pub async fn find_all_community(&self) -> Result<Vec<community_answer::Model>> {
        Ok(community_answer::Entity::find()
            .order_by_desc(community_answer::Column::CreatedAt)
            .all(self.db)
            .await?)
    }

    pub async fn toggle_verified(&self, answer: community_answer::Model) -> Result<community_answer::Model> {
        let verified = !answer.is_verified;
        let mut active: community_answer::ActiveModel = answer.into();
        active.is_verified = Set(verified);
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        Ok(active.update(self.db).await?)
    }

    pub async fn mark_spam(&self, answer: community_answer::Model) -> Result<community_answer::Model> {
        let mut active: community_answer::ActiveModel = answer.into();
        active.is_spam = Set(true);
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        Ok(active.update(self.db).await?)
    }

    pub async fn set_community_verified(&self, ids: Vec<Uuid>, verified: bool) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = community_answer::Entity::update_many()
            .col_expr(community_answer::Column::IsVerified, Expr::value(verified))
            .filter(community_answer::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn set_community_spam(&self, ids: Vec<Uuid>, spam: bool) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = community_answer::Entity::update_many()
            .col_expr(community_answer::Column::IsSpam, Expr::value(spam))
            .filter(community_answer::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn increment_community_likes(&self, id: Uuid) -> Result<i32> {
        community_answer::Entity::update_many()
            .col_expr(
                community_answer::Column::Likes,
                Expr::col(community_answer::Column::Likes).add(1),
            )
            .filter(community_answer::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        let likes = self
            .find_community_by_id(id)
            .await?
            .map(|answer| answer.likes)
            .unwrap_or_default();
        Ok(likes)
    }
}
