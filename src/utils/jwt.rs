use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: String,
    pub username: String,
    pub role: RoleEnum,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn user_uuid(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.user_id).context("Invalid user id in token")
    }

    /// Seconds until the token expires, never negative.
    pub fn remaining_ttl(&self) -> u64 {
        (self.exp - Utc::now().timestamp()).max(0) as u64
    }
}

pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn create_jwt(
        &self,
        user_id: &str,
        username: &str,
        role: RoleEnum,
        expires_in: i64,
    ) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            user_id: user_id.to_string(),
            username: username.to_string(),
            role,
            iat: now,
            exp: now + expires_in,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to encode token")
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenClaims> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .context("Failed to decode token")?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_decodes_with_same_secret() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .create_jwt("7f1c", "teacher1", RoleEnum::Supervisor, 3600)
            .unwrap();

        let claims = manager.decode_jwt(&token).unwrap();
        assert_eq!(claims.username, "teacher1");
        assert_eq!(claims.role, RoleEnum::Supervisor);
        assert!(claims.remaining_ttl() > 3500);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = JwtManager::new("a")
            .create_jwt("1", "x", RoleEnum::Student, 60)
            .unwrap();
        assert!(JwtManager::new("b").decode_jwt(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = JwtManager::new("a")
            .create_jwt("1", "x", RoleEnum::Student, -3600)
            .unwrap();
        assert!(JwtManager::new("a").decode_jwt(&token).is_err());
    }
}
