//! Cross-origin policy gate.
//!
//! A per-request origin check that runs before routing. Development mode
//! permits everything and echoes the caller's origin; production mode
//! permits only allowlisted origins (or requests with no origin header at
//! all, i.e. non-browser clients) and fails everything else with an
//! explicit 403 rather than silently omitting the headers. Preflight
//! OPTIONS requests are answered here directly.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::Environment;
use crate::error::ApiError;

/// Origins always permitted in production mode.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://da-admin-five.vercel.app",
    "https://da-admin.vercel.app",
];

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With, Accept";

/// Origin policy, fixed at startup.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    environment: Environment,
    allowed_origins: Vec<String>,
}

/// Outcome of the origin check. `Allowed(None)` means the request proceeds
/// without CORS headers (no origin to echo).
enum CorsDecision {
    Allowed(Option<HeaderValue>),
    Denied(String),
}

impl CorsPolicy {
    pub fn from_config(environment: Environment, frontend_url: Option<&str>) -> Self {
        Self {
            environment,
            allowed_origins: allowed_origins(frontend_url),
        }
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    fn evaluate(&self, origin: Option<&HeaderValue>) -> CorsDecision {
        if self.environment.is_development() {
            let echo = origin
                .cloned()
                .unwrap_or_else(|| HeaderValue::from_static("*"));
            return CorsDecision::Allowed(Some(echo));
        }

        match origin {
            // Requests with no origin (curl, server-to-server) pass.
            None => CorsDecision::Allowed(None),
            Some(value) => {
                let declared = value.to_str().unwrap_or_default();
                if self.allowed_origins.iter().any(|o| o == declared) {
                    CorsDecision::Allowed(Some(value.clone()))
                } else {
                    CorsDecision::Denied(
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                }
            }
        }
    }
}

/// Build the production origin allowlist: the fixed origins plus the
/// optional configured frontend origin, with empty entries dropped and
/// duplicates removed. Order is preserved.
pub fn allowed_origins(frontend_url: Option<&str>) -> Vec<String> {
    let mut origins: Vec<String> = Vec::new();
    for origin in DEFAULT_ALLOWED_ORIGINS.iter().copied().chain(frontend_url) {
        if origin.is_empty() || origins.iter().any(|o| o == origin) {
            continue;
        }
        origins.push(origin.to_string());
    }
    origins
}

/// Middleware enforcing the origin policy and attaching the CORS headers.
pub async fn cors_gate(
    State(policy): State<CorsPolicy>,
    req: Request,
    next: Next,
) -> Response {
    let origin = req.headers().get(header::ORIGIN).cloned();

    let echo = match policy.evaluate(origin.as_ref()) {
        CorsDecision::Denied(origin) => {
            tracing::warn!(origin = %origin, "CORS blocked origin");
            return ApiError::OriginDenied(origin).into_response();
        }
        CorsDecision::Allowed(echo) => echo,
    };

    // Preflights are answered immediately; no route handler is involved.
    if req.method() == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        apply_headers(
            &mut response,
            &echo.unwrap_or_else(|| HeaderValue::from_static("*")),
        );
        return response;
    }

    let mut response = next.run(req).await;
    if let Some(echo) = echo {
        apply_headers(&mut response, &echo);
    }
    response
}

fn apply_headers(response: &mut Response, origin: &HeaderValue) {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request as HttpRequest, routing::get, Router};
    use tower::ServiceExt;

    use super::*;

    fn gated_router(policy: CorsPolicy) -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn_with_state(policy, cors_gate))
    }

    fn dev_policy() -> CorsPolicy {
        CorsPolicy::from_config(Environment::Development, None)
    }

    fn prod_policy() -> CorsPolicy {
        CorsPolicy::from_config(Environment::Production, Some("https://staging.example.com"))
    }

    #[test]
    fn test_allowlist_includes_override() {
        let origins = allowed_origins(Some("https://staging.example.com"));
        assert_eq!(
            origins,
            vec![
                "https://da-admin-five.vercel.app",
                "https://da-admin.vercel.app",
                "https://staging.example.com",
            ]
        );
    }

    #[test]
    fn test_allowlist_drops_empty_and_duplicate_override() {
        assert_eq!(allowed_origins(Some("")).len(), 2);
        assert_eq!(
            allowed_origins(Some("https://da-admin.vercel.app")).len(),
            2
        );
        assert_eq!(allowed_origins(None).len(), 2);
    }

    #[tokio::test]
    async fn test_development_echoes_any_origin() {
        let response = gated_router(dev_policy())
            .oneshot(
                HttpRequest::builder()
                    .uri("/ping")
                    .header("Origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    #[tokio::test]
    async fn test_production_allows_listed_origin() {
        let response = gated_router(prod_policy())
            .oneshot(
                HttpRequest::builder()
                    .uri("/ping")
                    .header("Origin", "https://da-admin.vercel.app")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://da-admin.vercel.app"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            ALLOW_METHODS
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            ALLOW_HEADERS
        );
    }

    #[tokio::test]
    async fn test_production_rejects_unlisted_origin_before_dispatch() {
        let response = gated_router(prod_policy())
            .oneshot(
                HttpRequest::builder()
                    .uri("/ping")
                    .header("Origin", "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["error"],
            "Not allowed by CORS. Origin: https://evil.example"
        );
    }

    #[tokio::test]
    async fn test_production_permits_absent_origin() {
        let response = gated_router(prod_policy())
            .oneshot(
                HttpRequest::builder()
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_preflight_answered_for_any_path() {
        // The path doesn't exist in the router; the gate still answers.
        let response = gated_router(dev_policy())
            .oneshot(
                HttpRequest::builder()
                    .method(Method::OPTIONS)
                    .uri("/no/such/route")
                    .header("Origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }
}
