//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hourbook_core::types::UserId;
use hourbook_entity::user::{User, UserRole};
use hourbook_service::auth::{LoginResult, RefreshResult};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// "First Last".
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar_url: user.avatar_url,
            role: user.role,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
    /// True when this login created the account.
    pub provisioned: bool,
    pub user: UserResponse,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            access_token: result.tokens.access_token,
            refresh_token: result.tokens.refresh_token,
            access_expires_at: result.tokens.access_expires_at,
            refresh_expires_at: result.tokens.refresh_expires_at,
            provisioned: result.provisioned,
            user: result.user.into(),
        }
    }
}

/// Refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub access_expires_at: DateTime<Utc>,
}

impl From<RefreshResult> for RefreshResponse {
    fn from(result: RefreshResult) -> Self {
        Self {
            access_token: result.access_token,
            access_expires_at: result.access_expires_at,
        }
    }
}

/// Count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count value.
    pub count: u64,
}

/// Enrollment check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentCheckResponse {
    pub enrolled: bool,
}

/// Result of a bulk mark-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkedResponse {
    /// Notifications that changed from unread to read.
    pub marked: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    pub version: String,
    /// `postgres` or `memory`.
    pub backend: String,
    pub database: String,
}
