use crate::entities::{question_subscription, user};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Who a subscription belongs to.
#[derive(Debug, Clone)]
pub enum Subscriber {
    User(Uuid),
    Email(String),
}

pub struct SubscriptionRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriptionRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    async fn find(
        &self,
        question_id: Uuid,
        subscriber: &Subscriber,
    ) -> Result<Option<question_subscription::Model>> {
        let query = question_subscription::Entity::find()
            .filter(question_subscription::Column::QuestionId.eq(question_id));
        let query = match subscriber {
            Subscriber::User(user_id) => {
                query.filter(question_subscription::Column::UserId.eq(*user_id))
            }
            Subscriber::Email(email) => {
                query.filter(question_subscription::Column::Email.eq(email.as_str()))
            }
        };
        Ok(query.one(self.db).await?)
    }

    /// First call subscribes; later calls flip `is_active`. Returns the new state.
    pub async fn toggle(&self, question_id: Uuid, subscriber: Subscriber) -> Result<bool> {
        if let Some(existing) = self.find(question_id, &subscriber).await? {
            let active_now = !existing.is_active;
            let mut active: question_subscription::ActiveModel = existing.into();
            active.is_active = Set(active_now);
            active.update(self.db).await?;
            return Ok(active_now);
        }

        let (user_id, email) = match subscriber {
            Subscriber::User(user_id) => (Some(user_id), None),
            Subscriber::Email(email) => (None, Some(email)),
        };
        let model = question_subscription::ActiveModel {
            id: Set(Uuid::new_v4()),
            question_id: Set(question_id),
            user_id: Set(user_id),
            email: Set(email),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        model.insert(self.db).await?;
        Ok(true)
    }

    pub async fn is_subscribed(&self, question_id: Uuid, user_id: Uuid) -> Result<bool> {
        let count = question_subscription::Entity::find()
            .filter(question_subscription::Column::QuestionId.eq(question_id))
            .filter(question_subscription::Column::UserId.eq(user_id))
            .filter(question_subscription::Column::IsActive.eq(true))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    /// Addresses of every active subscriber: the account e-mail for user
    /// subscriptions, the stored e-mail otherwise. Blank addresses are skipped.
    pub async fn active_emails(&self, question_id: Uuid) -> Result<Vec<String>> {
        let subscriptions = question_subscription::Entity::find()
            .filter(question_subscription::Column::QuestionId.eq(question_id))
            .filter(question_subscription::Column::IsActive.eq(true))
            .all(self.db)
            .await?;

        let user_ids: Vec<Uuid> = subscriptions.iter().filter_map(|s| s.user_id).collect();
        let user_emails: HashMap<Uuid, String> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(user_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u.email))
                .collect()
        };

        Ok(subscriptions
            .into_iter()
            .filter_map(|s| match s.user_id {
                Some(user_id) => user_emails.get(&user_id).cloned(),
                None => s.email,
            })
            .filter(|email| !email.trim().is_empty())
            .collect())
    }
}
