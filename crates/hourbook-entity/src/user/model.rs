//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hourbook_core::types::UserId;

use super::role::UserRole;

/// A volunteer, supervisor or admin account, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique, lowercased email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar URL supplied by the identity provider.
    pub avatar_url: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// "First Last", used in notification bodies.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address; normalized by [`CreateUser::new`].
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar URL (optional).
    pub avatar_url: Option<String>,
    /// Assigned role.
    pub role: UserRole,
}

impl CreateUser {
    /// Build a create request with a normalized email.
    pub fn new(
        email: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            email: normalize_email(email),
            first_name: first_name.into(),
            last_name: last_name.into(),
            avatar_url: None,
            role,
        }
    }

    /// Set the avatar URL.
    pub fn with_avatar(mut self, avatar_url: Option<String>) -> Self {
        self.avatar_url = avatar_url;
        self
    }
}

/// Lowercase and trim an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Split an identity provider display name into first and last name.
///
/// Everything after the first whitespace run becomes the last name.
pub fn split_display_name(display_name: &str) -> (String, String) {
    let trimmed = display_name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}
