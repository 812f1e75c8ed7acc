//! Route definitions for the API.

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::cors::{cors_gate, CorsPolicy};
use crate::error::panic_response;
use crate::AppState;

/// Request bodies above this are refused before parsing.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::service_info,
        handlers::health,
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::login,
        handlers::register,
        handlers::dashboard,
        handlers::analytics,
        handlers::api_test,
    ),
    components(schemas(
        crate::api::types::ServiceInfoResponse,
        crate::api::types::HealthResponse,
        crate::api::types::UserRecord,
        crate::api::types::ListUsersResponse,
        crate::api::types::UserResponse,
        crate::api::types::CreateUserRequest,
        crate::api::types::LoginRequest,
        crate::api::types::LoginResponse,
        crate::api::types::RegisterRequest,
        crate::api::types::RegisterResponse,
        crate::api::types::DashboardStats,
        crate::api::types::DashboardResponse,
        crate::api::types::AnalyticsStats,
        crate::api::types::AnalyticsResponse,
        crate::api::types::TestResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "users", description = "Mock user management"),
        (name = "auth", description = "Mock authentication"),
        (name = "data", description = "Dashboard and analytics data"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "DA Admin Backend API",
        version = "1.0.0",
        description = "Mock REST endpoints for users, auth, and dashboard data",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// The route table: one entry per path, registered once at startup.
///
/// Each entry carries the not-found fallback so an unregistered method on
/// a known path gets the same 404 envelope as an unknown path.
fn route_table() -> Vec<(&'static str, MethodRouter<AppState>)> {
    vec![
        ("/", get(handlers::service_info)),
        ("/api/health", get(handlers::health)),
        (
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        ),
        ("/api/users/:id", get(handlers::get_user)),
        ("/api/auth/login", post(handlers::login)),
        ("/api/auth/register", post(handlers::register)),
        ("/api/data/dashboard", get(handlers::dashboard)),
        ("/api/data/analytics", get(handlers::analytics)),
        ("/api/test", get(handlers::api_test)),
    ]
}

/// Build the API router and its middleware stack.
///
/// Layer order, outermost first: CORS gate (so preflights and rejections
/// happen before anything else), request tracing, security headers, panic
/// containment, body size ceiling, then the routes.
pub fn build_router(state: AppState, cors_policy: CorsPolicy) -> Router {
    let environment = state.environment;

    let mut router = Router::new();
    for (path, handler) in route_table() {
        router = router.route(path, handler.fallback(handlers::not_found));
    }

    router
        .fallback(handlers::not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(
            move |err: Box<dyn Any + Send + 'static>| panic_response(environment, err),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(cors_policy, cors_gate))
}
