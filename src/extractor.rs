use axum::extract::{ConnectInfo, FromRequestParts};
use http::{HeaderMap, header, request::Parts};
use std::net::SocketAddr;

use crate::config::APP_CONFIG;
use crate::error::AppError;
use crate::middleware::permission::Actor;
use crate::redis_service::JwtBlacklist;
use crate::utils::jwt::{JwtManager, TokenClaims};

pub const USER_AGENT_MAX_CHARS: usize = 500;

pub struct AuthClaims(pub TokenClaims);

impl AuthClaims {
    pub fn actor(&self) -> Result<Actor, AppError> {
        Actor::from_claims(&self.0)
    }
}

/// Claims when a valid bearer token is present, `None` for anonymous callers.
pub struct MaybeAuthClaims(pub Option<TokenClaims>);

impl MaybeAuthClaims {
    pub fn actor(&self) -> Option<Actor> {
        self.0
            .as_ref()
            .and_then(|claims| Actor::from_claims(claims).ok())
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn verify_token(token: &str) -> Result<TokenClaims, AppError> {
    let claims = JwtManager::new(APP_CONFIG.jwt_secret.as_str())
        .decode_jwt(token)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    if JwtBlacklist::is_revoked(&claims.user_id, token).await {
        return Err(AppError::Unauthorized("Token has been revoked".to_string()));
    }

    Ok(claims)
}

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;
        let claims = verify_token(token).await?;
        Ok(AuthClaims(claims))
    }
}

impl<S> FromRequestParts<S> for MaybeAuthClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = match bearer_token(&parts.headers) {
            Some(token) => verify_token(token).await.ok(),
            None => None,
        };
        Ok(MaybeAuthClaims(claims))
    }
}

/// First `X-Forwarded-For` entry, else the peer address, else `"unknown"`.
pub struct ClientIp(pub String);

pub fn client_ip_from(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => "unknown".to_string(),
    }
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientIp(client_ip_from(&parts.headers, peer)))
    }
}

/// `User-Agent` header truncated to [`USER_AGENT_MAX_CHARS`].
pub struct UserAgent(pub String);

impl<S> FromRequestParts<S> for UserAgent
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .chars()
            .take(USER_AGENT_MAX_CHARS)
            .collect();
        Ok(UserAgent(agent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn forwarded_for_wins_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let peer: SocketAddr = "127.0.0.1:9000".parse().unwrap();

        assert_eq!(client_ip_from(&headers, Some(peer)), "203.0.113.7");
    }

    #[test]
    fn peer_address_used_without_proxy_header() {
        let peer: SocketAddr = "192.168.1.5:4000".parse().unwrap();
        assert_eq!(client_ip_from(&HeaderMap::new(), Some(peer)), "192.168.1.5");
        assert_eq!(client_ip_from(&HeaderMap::new(), None), "unknown");
    }

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }
}
