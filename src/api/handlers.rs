//! HTTP request handlers.
//!
//! Every handler is a pure function of the parsed request: the payloads
//! are canned or trivially derived, and none of them touch the database.

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode, Uri},
    Json,
};
use chrono::Utc;

use crate::api::types::*;
use crate::error::{ApiError, ApiResult};
use crate::extract::Payload;
use crate::AppState;

/// Placeholder token returned by the mock login.
const MOCK_TOKEN: &str = "mock-jwt-token";

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Mock identifier derived from the current time.
fn generated_id() -> i64 {
    Utc::now().timestamp_millis()
}

fn fixed_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: 1,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        },
        UserRecord {
            id: 2,
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
        },
    ]
}

// ==================== Service Metadata ====================

/// Service metadata.
///
/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service metadata", body = ServiceInfoResponse)
    ),
    tag = "health"
)]
pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: "DA Admin Backend API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
        timestamp: now(),
    })
}

/// Health check endpoint.
///
/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: now(),
        environment: state.environment.to_string(),
        database: state.database.status().to_string(),
    })
}

// ==================== Users ====================

/// List users.
///
/// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Fixed user list", body = ListUsersResponse)
    ),
    tag = "users"
)]
pub async fn list_users() -> Json<ListUsersResponse> {
    Json(ListUsersResponse {
        message: "Users endpoint".to_string(),
        users: fixed_users(),
    })
}

/// Get a user by id. Echoes the requested id with constant details.
///
/// GET /api/users/:id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Echoed user", body = UserResponse),
        (status = 400, description = "Non-numeric id", body = crate::error::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user(Path(id): Path<String>) -> ApiResult<Json<UserResponse>> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid user id: {}", id)))?;

    Ok(Json(UserResponse {
        message: format!("User {}", id),
        user: UserRecord {
            id,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        },
    }))
}

/// Create a user. Echoes the submitted fields under a generated id.
///
/// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_user(
    Payload(request): Payload<CreateUserRequest>,
) -> (StatusCode, Json<UserResponse>) {
    let user = UserRecord {
        id: generated_id(),
        name: request.name,
        email: request.email,
    };

    tracing::info!(user_id = user.id, "Mock user created");

    (
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    )
}

// ==================== Authentication ====================

/// Mock login. Presence check only; always succeeds when both fields are
/// non-empty.
///
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(Payload(request): Payload<LoginRequest>) -> ApiResult<Json<LoginResponse>> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    tracing::info!(email = %request.email, "Mock login");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: MOCK_TOKEN.to_string(),
        user: UserRecord {
            id: 1,
            name: "Test User".to_string(),
            email: request.email,
        },
    }))
}

/// Mock registration. Presence check only.
///
/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    Payload(request): Payload<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    if request.name.is_empty() || request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Name, email, and password are required".to_string(),
        ));
    }

    tracing::info!(email = %request.email, "Mock registration");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserRecord {
                id: generated_id(),
                name: request.name,
                email: request.email,
            },
        }),
    ))
}

// ==================== Data ====================

/// Dashboard statistics.
///
/// GET /api/data/dashboard
#[utoipa::path(
    get,
    path = "/api/data/dashboard",
    responses(
        (status = 200, description = "Fixed dashboard stats", body = DashboardResponse)
    ),
    tag = "data"
)]
pub async fn dashboard() -> Json<DashboardResponse> {
    Json(DashboardResponse {
        message: "Dashboard data".to_string(),
        data: DashboardStats {
            total_users: 150,
            total_orders: 45,
            revenue: 12500,
            growth_rate: 15.2,
        },
    })
}

/// Analytics statistics.
///
/// GET /api/data/analytics
#[utoipa::path(
    get,
    path = "/api/data/analytics",
    responses(
        (status = 200, description = "Fixed analytics stats", body = AnalyticsResponse)
    ),
    tag = "data"
)]
pub async fn analytics() -> Json<AnalyticsResponse> {
    Json(AnalyticsResponse {
        message: "Analytics data".to_string(),
        analytics: AnalyticsStats {
            page_views: 1250,
            unique_visitors: 890,
            bounce_rate: 32.5,
            avg_session_duration: "2m 45s".to_string(),
        },
    })
}

// ==================== Test & Fallback ====================

/// Echo endpoint for connectivity checks.
///
/// GET /api/test
#[utoipa::path(
    get,
    path = "/api/test",
    responses(
        (status = 200, description = "Echo of method/path/timestamp", body = TestResponse)
    ),
    tag = "health"
)]
pub async fn api_test(method: Method, uri: Uri) -> Json<TestResponse> {
    Json(TestResponse {
        message: "API test endpoint working!".to_string(),
        timestamp: now(),
        method: method.to_string(),
        path: uri.path().to_string(),
    })
}

/// Fallback for unmatched requests; names the path it couldn't route.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
