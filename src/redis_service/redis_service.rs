use crate::config::APP_CONFIG;
use anyhow::{Context, Result};
use chrono::Utc;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::OnceCell;

static REDIS_MANAGER: OnceCell<ConnectionManager> = OnceCell::const_new();

pub async fn init_redis_connection() -> Result<()> {
    let mut conn = get_redis().await?;

    let _: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .context("Failed to ping Redis")?;

    Ok(())
}

pub async fn get_redis() -> Result<ConnectionManager> {
    let manager = REDIS_MANAGER
        .get_or_try_init(|| async {
            let client = redis::Client::open(APP_CONFIG.redis_url.as_str())
                .context("Failed to create Redis client")?;
            client
                .get_connection_manager()
                .await
                .context("Failed to get Redis connection")
        })
        .await?;
    Ok(manager.clone())
}

pub struct JwtBlacklist;

impl JwtBlacklist {
    fn key(user_id: &str, jwt: &str) -> String {
        format!("jwt:blacklist:{}:{}", user_id, jwt)
    }

    pub async fn add_jwt_to_blacklist(user_id: &str, jwt: &str, ttl_seconds: u64) -> Result<()> {
        let mut redis = get_redis().await?;

        let now = Utc::now().timestamp();
        let _: () = redis
            .set_ex(Self::key(user_id, jwt), now, ttl_seconds.max(1))
            .await?;
        Ok(())
    }

    pub async fn check_jwt_in_blacklist(user_id: &str, jwt: &str) -> Result<bool> {
        let mut redis = get_redis().await?;

        let exists: bool = redis.exists(Self::key(user_id, jwt)).await?;
        Ok(exists)
    }

    /// Fails open: an unreachable Redis is logged and the token is accepted.
    pub async fn is_revoked(user_id: &str, jwt: &str) -> bool {
        match Self::check_jwt_in_blacklist(user_id, jwt).await {
            Ok(revoked) => revoked,
            Err(e) => {
                tracing::warn!("JWT blacklist unavailable, accepting token: {}", e);
                false
            }
        }
    }
}
