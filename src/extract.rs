//! Request body extraction.
//!
//! Bodies are JSON by default, form-encoded when the content type says so.
//! Either way, a body that fails to parse stops the request with a 400
//! before the handler runs, using the same error envelope as everything
//! else.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Parsed request body.
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        let value = if is_form {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| value)
                .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| value)
                .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?
        };

        Ok(Payload(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct EchoBody {
        name: String,
    }

    fn test_router() -> Router {
        Router::new().route(
            "/echo",
            post(|Payload(body): Payload<EchoBody>| async move { body.name }),
        )
    }

    fn post_request(content_type: &str, body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(Method::POST)
            .uri("/echo")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body_parsed() {
        let response = test_router()
            .oneshot(post_request("application/json", r#"{"name":"Ann"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_form_body_parsed() {
        let response = test_router()
            .oneshot(post_request(
                "application/x-www-form-urlencoded",
                "name=Ann",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = test_router()
            .oneshot(post_request("application/json", r#"{"name": oops"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }
}
