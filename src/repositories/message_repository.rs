use crate::entities::message;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct MessageRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MessageRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<message::Model>> {
        Ok(message::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn create(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: String,
    ) -> Result<message::Model> {
        let model = message::ActiveModel {
            id: Set(Uuid::new_v4()),
            sender_id: Set(sender_id),
            recipient_id: Set(recipient_id),
            content: Set(content),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        Ok(model.insert(self.db).await?)
    }

    /// Both directions between two users, oldest first.
    pub async fn conversation(&self, a: Uuid, b: Uuid) -> Result<Vec<message::Model>> {
        let messages = message::Entity::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(message::Column::SenderId.eq(a))
                            .add(message::Column::RecipientId.eq(b)),
                    )
                    .add(
                        Condition::all()
                            .add(message::Column::SenderId.eq(b))
                            .add(message::Column::RecipientId.eq(a)),
                    ),
            )
            .order_by_asc(message::Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(messages)
    }

    pub async fn mark_read(&self, message: message::Model) -> Result<message::Model> {
        if message.is_read {
            return Ok(message);
        }
        let mut active: message::ActiveModel = message.into();
        active.is_read = Set(true);
        Ok(active.update(self.db).await?)
    }

    /// Marks every unread message from `sender_id` to `recipient_id`; returns how many changed.
    pub async fn mark_all_read_from(&self, sender_id: Uuid, recipient_id: Uuid) -> Result<u64> {
        let result = message::Entity::update_many()
            .col_expr(message::Column::IsRead, Expr::value(true))
            .filter(message::Column::SenderId.eq(sender_id))
            .filter(message::Column::RecipientId.eq(recipient_id))
            .filter(message::Column::IsRead.eq(false))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn unread_count_for(&self, recipient_id: Uuid) -> Result<u64> {
        let count = message::Entity::find()
            .filter(message::Column::RecipientId.eq(recipient_id))
            .filter(message::Column::IsRead.eq(false))
            .count(self.db)
            .await?;
        Ok(count)
    }

    pub async fn unread_count_between(&self, sender_id: Uuid, recipient_id: Uuid) -> Result<u64> {
        let count = message::Entity::find()
            .filter(message::Column::SenderId.eq(sender_id))
            .filter(message::Column::RecipientId.eq(recipient_id))
            .filter(message::Column::IsRead.eq(false))
            .count(self.db)
            .await?;
        Ok(count)
    }
}
