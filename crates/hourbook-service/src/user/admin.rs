//! Admin user provisioning.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use hourbook_auth::rbac::RoleGuard;
use hourbook_core::error::AppError;
use hourbook_database::store::UserStore;
use hourbook_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Request to pre-provision a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Email (unique).
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Role assignment.
    pub role: UserRole,
}

/// Handles administrative user management.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User store.
    users: Arc<dyn UserStore>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Creates a user with any role. Admin only.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> Result<User, AppError> {
        RoleGuard::require_role(ctx.role, UserRole::Admin)?;

        let email = req.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        if req.first_name.trim().is_empty() {
            return Err(AppError::validation("First name cannot be empty"));
        }

        let user = self
            .users
            .create(&CreateUser::new(
                email,
                req.first_name.trim(),
                req.last_name.trim(),
                req.role,
            ))
            .await?;

        info!(
            actor_id = %ctx.user_id,
            user_id = %user.id,
            role = %user.role,
            "User provisioned"
        );

        Ok(user)
    }
}
