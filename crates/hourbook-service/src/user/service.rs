//! User directory lookups.

use std::sync::Arc;

use hourbook_auth::rbac::RoleGuard;
use hourbook_core::error::AppError;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_database::store::UserStore;
use hourbook_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Read access to user accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Gets the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Looks up a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<User, AppError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No user with email '{}'", email.trim())))
    }

    /// Lists users, optionally restricted to one role. Reviewers only.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        role: Option<UserRole>,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        RoleGuard::require_any(ctx.role, &[UserRole::Supervisor, UserRole::Admin])?;
        self.users.list(role, page).await
    }
}
