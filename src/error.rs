//! Error types for the DA Admin backend.
//!
//! Defines a unified error type that maps cleanly to HTTP responses, and
//! the panic-to-500 formatter used by the central catch layer.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::Environment;

/// Unified error type for request handling.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request input. Raised locally in handlers and
    /// by the body extractor; never escalated further.
    #[error("{0}")]
    BadRequest(String),

    /// No route matched the request path (or method).
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// The request's declared origin is not permitted in production mode.
    #[error("Not allowed by CORS. Origin: {0}")]
    OriginDenied(String),
}

/// Error response body for API clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// The unmatched path, on routing errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Detail line, on internal errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            path: None,
            message: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ApiError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Route not found".to_string(),
                    path: Some(path),
                    message: None,
                },
            ),
            ApiError::OriginDenied(origin) => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new(format!("Not allowed by CORS. Origin: {}", origin)),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Build the 500 response for a panicking handler.
///
/// The panic payload is always logged; its text only reaches the client in
/// development mode.
pub fn panic_response(environment: Environment, err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(error = %detail, "Handler panicked");

    let message = if environment.is_development() {
        detail
    } else {
        "Internal server error".to_string()
    };

    let body = ErrorResponse {
        error: "Something went wrong!".to_string(),
        path: None,
        message: Some(message),
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Result type alias for handler operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_body() {
        let response = ApiError::BadRequest("Email and password are required".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Email and password are required");
        assert!(body.get("path").is_none());
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_route_not_found_names_path() {
        let response = ApiError::RouteNotFound("/api/nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Route not found");
        assert_eq!(body["path"], "/api/nope");
    }

    #[tokio::test]
    async fn test_origin_denied_names_origin() {
        let response = ApiError::OriginDenied("https://evil.example".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "Not allowed by CORS. Origin: https://evil.example"
        );
    }

    #[tokio::test]
    async fn test_panic_detail_shown_in_development() {
        let err: Box<dyn Any + Send> = Box::new("kaboom".to_string());
        let response = panic_response(Environment::Development, err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Something went wrong!");
        assert_eq!(body["message"], "kaboom");
    }

    #[tokio::test]
    async fn test_panic_detail_hidden_in_production() {
        let err: Box<dyn Any + Send> = Box::new("secret detail");
        let response = panic_response(Environment::Production, err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }
}
