use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::config::APP_CONFIG;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::repositories::user_repository::{NewUser, UserRepository};

/// Seeds the administrator account from configuration when it is missing.
pub async fn initialize_admin_user(db: &DatabaseConnection) -> Result<()> {
    let username: &str = &APP_CONFIG.admin_username;
    let repo = UserRepository::with_connection(db);

    if repo
        .username_exists(username)
        .await
        .context("Failed to check existing admin")?
    {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating default admin user...");

    let password_hash = bcrypt::hash(&APP_CONFIG.admin_password, bcrypt::DEFAULT_COST)
        .context("Failed to hash admin password")?;

    let admin = repo
        .create(NewUser {
            username: username.to_string(),
            email: APP_CONFIG.admin_email.clone(),
            password_hash,
            role: RoleEnum::Admin,
            phone: None,
            country: None,
        })
        .await
        .context("Failed to insert admin user")?;

    tracing::info!(user_id = %admin.id, username = %admin.username, "Admin user created");
    tracing::warn!("Please change the default admin password after first login");

    Ok(())
}
