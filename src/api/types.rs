//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ==================== Service Metadata ====================

/// Root endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfoResponse {
    /// Service name.
    pub message: String,
    /// Service version.
    pub version: String,
    /// Always "running".
    pub status: String,
    /// Timestamp.
    pub timestamp: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Seconds since process start.
    pub uptime: f64,
    /// Timestamp.
    pub timestamp: String,
    /// Environment name.
    pub environment: String,
    /// Database connectivity.
    pub database: String,
}

// ==================== Users ====================

/// A user record, as the mock handlers shape it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Response for listing users.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub message: String,
    pub users: Vec<UserRecord>,
}

/// Response carrying a single user.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub message: String,
    pub user: UserRecord,
}

/// Request to create a user.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

// ==================== Authentication ====================

/// Login request. Fields default to empty so a bare `{}` body reaches the
/// handler's presence check instead of failing deserialization.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    /// Placeholder token; no real session is created.
    pub token: String,
    pub user: UserRecord,
}

/// Registration request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserRecord,
}

// ==================== Data ====================

/// Fixed dashboard statistics.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_orders: u64,
    pub revenue: u64,
    pub growth_rate: f64,
}

/// Dashboard response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub message: String,
    pub data: DashboardStats,
}

/// Fixed analytics statistics.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub page_views: u64,
    pub unique_visitors: u64,
    pub bounce_rate: f64,
    pub avg_session_duration: String,
}

/// Analytics response.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsResponse {
    pub message: String,
    pub analytics: AnalyticsStats,
}

// ==================== Test ====================

/// Echo response for the test endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestResponse {
    pub message: String,
    pub timestamp: String,
    pub method: String,
    pub path: String,
}
