use crate::entities::sea_orm_active_enums::SessionStatus;
use crate::entities::session;
use anyhow::Result;
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct SessionRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SessionRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<session::Model>> {
        Ok(session::Entity::find_by_id(id).one(self.db).await?)
    }

    /// Latest first.
    pub async fn find_by_profile(&self, profile_id: Uuid) -> Result<Vec<session::Model>> {
        let sessions = session::Entity::find()
            .filter(session::Column::StudentProfileId.eq(profile_id))
            .order_by_desc(session::Column::Date)
            .all(self.db)
            .await?;
        Ok(sessions)
    }

    pub async fn create(&self, profile_id: Uuid, date: NaiveDateTime) -> Result<session::Model> {
        let model = session::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_profile_id: Set(profile_id),
            date: Set(date),
            status: Set(SessionStatus::Unset),
            notes: Set(None),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn update_status(
        &self,
        session: session::Model,
        status: SessionStatus,
    ) -> Result<session::Model> {
        let mut active: session::ActiveModel = session.into();
        active.status = Set(status);
        Ok(active.update(self.db).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = session::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected)
    }
}
