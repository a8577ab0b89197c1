use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Unified error type for the bot service.
///
/// Each variant maps to an HTTP status code and produces a JSON response
/// body of the form `{"error": "<kind>", "message": "<details>"}`.
#[derive(Debug)]
pub enum BotError {
    BadRequest(String),
    Unauthorized(String),
    Upstream(String),
    Config(String),
    Internal(String),
}

impl BotError {
    fn kind(&self) -> (StatusCode, &'static str) {
        match self {
            BotError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            BotError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            BotError::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            BotError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            BotError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    fn message(&self) -> &str {
        match self {
            BotError::BadRequest(msg)
            | BotError::Unauthorized(msg)
            | BotError::Upstream(msg)
            | BotError::Config(msg)
            | BotError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            BotError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            BotError::Upstream(msg) => write!(f, "Upstream Error: {msg}"),
            BotError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            BotError::Internal(msg) => write!(f, "Internal Server Error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::Upstream(error.to_string())
    }
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        let (status, error_kind) = self.kind();

        // Config and internal details stay in the logs.
        let message = match &self {
            BotError::Config(_) | BotError::Internal(_) => "An unexpected error occurred",
            _ => self.message(),
        };

        let body = json!({
            "error": error_kind,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unauthorized_maps_to_401_json_body() {
        let response = BotError::Unauthorized("signature mismatch".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "unauthorized");
        assert_eq!(json["message"], "signature mismatch");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = BotError::Internal("db password leaked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal_error");
        assert_eq!(json["message"], "An unexpected error occurred");
    }

    #[test]
    fn test_display_includes_kind_prefix() {
        let error = BotError::Upstream("status 500".into());
        assert_eq!(error.to_string(), "Upstream Error: status 500");
    }
}
