use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Already hashed with bcrypt
    pub password_hash: String,
    pub role: RoleEnum,
    pub phone: Option<String>,
    pub country: Option<String>,
}

pub struct UserRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn with_connection(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>> {
        let user = user::Entity::find_by_id(user_id).one(self.db).await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db)
            .await?;
        Ok(user)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn find_by_role(&self, role: RoleEnum) -> Result<Vec<user::Model>> {
        let users = user::Entity::find()
            .filter(user::Column::Role.eq(role))
            .order_by_asc(user::Column::Username)
            .all(self.db)
            .await?;
        Ok(users)
    }

    pub async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<user::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(self.db)
            .await?;
        Ok(users)
    }

    pub async fn create(&self, new_user: NewUser) -> Result<user::Model> {
        let now = chrono::Utc::now().naive_utc();
        let user_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password: Set(new_user.password_hash),
            role: Set(new_user.role),
            phone: Set(new_user.phone),
            country: Set(new_user.country),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = user_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn update_role(&self, user_id: Uuid, role: RoleEnum) -> Result<user::Model> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let mut active_user: user::ActiveModel = user.into();
        active_user.role = Set(role);
        active_user.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active_user.update(self.db).await?;
        Ok(result)
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<u64> {
        let result = user::Entity::delete_by_id(user_id).exec(self.db).await?;
        Ok(result.rows_affected)
    }
}
