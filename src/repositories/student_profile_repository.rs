use crate::entities::student_profile;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub const DEFAULT_AGE: i32 = 10;
pub const DEFAULT_LESSONS_COUNT: i32 = 4;
pub const DEFAULT_SESSION_DURATION: i32 = 30;

#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub full_name: String,
    pub age: i32,
    pub country: String,
    pub phone: String,
    pub parent_phone: String,
    pub package_name: String,
    pub lessons_count: i32,
    pub session_duration: i32,
    pub supervisor_id: Option<Uuid>,
}

impl ProfileFields {
    /// Blank profile used when a student account is created without details.
    pub fn defaults_for(username: &str) -> Self {
        Self {
            full_name: username.to_string(),
            age: DEFAULT_AGE,
            lessons_count: DEFAULT_LESSONS_COUNT,
            session_duration: DEFAULT_SESSION_DURATION,
            ..Default::default()
        }
    }
}

pub struct StudentProfileRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentProfileRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<student_profile::Model>> {
        Ok(student_profile::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<student_profile::Model>> {
        let profile = student_profile::Entity::find()
            .filter(student_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;
        Ok(profile)
    }

    pub async fn find_by_supervisor(&self, supervisor_id: Uuid) -> Result<Vec<student_profile::Model>> {
        let profiles = student_profile::Entity::find()
            .filter(student_profile::Column::SupervisorId.eq(supervisor_id))
            .order_by_asc(student_profile::Column::FullName)
            .all(self.db)
            .await?;
        Ok(profiles)
    }

    pub async fn find_all(&self) -> Result<Vec<student_profile::Model>> {
        let profiles = student_profile::Entity::find()
            .order_by_asc(student_profile::Column::FullName)
            .all(self.db)
            .await?;
        Ok(profiles)
    }

    pub async fn create(&self, user_id: Uuid, fields: ProfileFields) -> Result<student_profile::Model> {
        let now = chrono::Utc::now().naive_utc();
        let profile = student_profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            full_name: Set(fields.full_name),
            age: Set(fields.age),
            country: Set(fields.country),
            phone: Set(fields.phone),
            parent_phone: Set(fields.parent_phone),
            package_name: Set(fields.package_name),
            lessons_count: Set(fields.lessons_count),
            session_duration: Set(fields.session_duration),
            supervisor_id: Set(fields.supervisor_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(profile.insert(self.db).await?)
    }

    /// Returns the existing profile for `user_id`, creating it from `fields` otherwise.
    pub async fn get_or_create(
        &self,
        user_id: Uuid,
        fields: ProfileFields,
    ) -> Result<(student_profile::Model, bool)> {
        if let Some(existing) = self.find_by_user_id(user_id).await? {
            return Ok((existing, false));
        }
        let created = self.create(user_id, fields).await?;
        Ok((created, true))
    }

    pub async fn set_supervisor(
        &self,
        profile_id: Uuid,
        supervisor_id: Option<Uuid>,
    ) -> Result<student_profile::Model> {
        let profile = self
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Student profile not found"))?;

        let mut active: student_profile::ActiveModel = profile.into();
        active.supervisor_id = Set(supervisor_id);
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        Ok(active.update(self.db).await?)
    }
}
