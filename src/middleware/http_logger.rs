use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;

use crate::config::APP_CONFIG;

const SENSITIVE_FIELDS: [&str; 9] = [
    "password",
    "password_confirm",
    "token",
    "jwt",
    "access_token",
    "refresh_token",
    "authorization",
    "secret",
    "api_key",
];

const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "cookie", "x-api-key", "x-auth-token"];

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/") || path.starts_with("/swagger-ui")
}

fn filter_sensitive_data(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, val)| {
                    if SENSITIVE_FIELDS.contains(&key.to_lowercase().as_str()) {
                        (key, Value::String("[REDACTED]".to_string()))
                    } else {
                        (key, filter_sensitive_data(val))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(filter_sensitive_data).collect()),
        other => other,
    }
}

fn filter_sensitive_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered_headers = headers.clone();

    for header_name in SENSITIVE_HEADERS {
        if filtered_headers.contains_key(header_name) {
            filtered_headers.insert(header_name, HeaderValue::from_static("[REDACTED]"));
        }
    }

    filtered_headers
}

fn parse_json_body(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(json) => filter_sensitive_data(json),
        Err(_) => Value::Object(serde_json::Map::new()),
    }
}

pub async fn http_logger(
    req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    let start_time = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path().to_string();

    if should_ignore_path(&path) || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (parts, body) = req.into_parts();
    let bytes = buffer_body("request", body).await?;
    let req_body = parse_json_body(&bytes);

    let req = Request::from_parts(parts, Body::from(bytes));

    let mut response = next.run(req).await;

    let latency = start_time.elapsed();
    let status = response.status();

    let should_log_body = matches!(method, Method::POST | Method::PUT | Method::PATCH);
    let res_body = if should_log_body {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let json_body = parse_json_body(&bytes);
        response = Response::from_parts(parts, Body::from(bytes));
        json_body
    } else {
        Value::Object(serde_json::Map::new())
    };

    let filtered_req_headers = filter_sensitive_headers(&req_headers);

    if status.is_server_error() {
        tracing::error!(
            method = ?method,
            path = %path,
            x_request_id = %x_request_id,
            status = ?status,
            latency_ms = latency.as_millis(),
            req_body = %req_body,
            app_env = %APP_CONFIG.app_env,
            "HTTP request failed"
        );
    } else {
        tracing::info!(
            method = ?method,
            uri = ?uri,
            path = %path,
            x_request_id = %x_request_id,
            req_headers = ?filtered_req_headers,
            req_body = %req_body,
            status = ?status,
            latency_ms = latency.as_millis(),
            res_body = %res_body,
            app_env = %APP_CONFIG.app_env,
            "HTTP request completed"
        );
    }

    Ok(response)
}

pub async fn buffer_body<B>(
    direction: &str,
    body: B,
) -> std::result::Result<Bytes, (StatusCode, String)>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    match body.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) => Err((
            StatusCode::BAD_REQUEST,
            format!("failed to read {direction} body: {err}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_secrets_are_redacted() {
        let filtered = filter_sensitive_data(json!({
            "username": "ali",
            "password": "hunter2",
            "data": [{ "token": "abc", "content": "hi" }]
        }));

        assert_eq!(filtered["username"], "ali");
        assert_eq!(filtered["password"], "[REDACTED]");
        assert_eq!(filtered["data"][0]["token"], "[REDACTED]");
        assert_eq!(filtered["data"][0]["content"], "hi");
    }

    #[test]
    fn authorization_header_is_masked() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer x"));
        let filtered = filter_sensitive_headers(&headers);
        assert_eq!(filtered["authorization"], "[REDACTED]");
    }

    #[test]
    fn health_and_docs_are_not_logged() {
        assert!(should_ignore_path("/health"));
        assert!(should_ignore_path("/swagger-ui/index.html"));
        assert!(!should_ignore_path("/api/v1/qna"));
    }
}
