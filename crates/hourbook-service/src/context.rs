//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hourbook_core::types::UserId;
use hourbook_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted by the API layer and passed into service methods so that
/// every operation knows *who* is acting and from *which* session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The login session the token belongs to.
    pub session_id: Uuid,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// The user's email (convenience field from the token).
    pub email: String,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: UserId,
        session_id: Uuid,
        role: UserRole,
        email: String,
        ip_address: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            session_id,
            role,
            email,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Context for operations run outside HTTP, such as the CLI.
    pub fn system(user_id: UserId, role: UserRole) -> Self {
        Self::new(
            user_id,
            Uuid::nil(),
            role,
            String::new(),
            "local".to_string(),
            None,
        )
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the current user reviews requests.
    pub fn is_reviewer(&self) -> bool {
        self.role.is_reviewer()
    }
}
