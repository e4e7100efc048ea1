//! Class catalog reads and admin creation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use hourbook_auth::rbac::RoleGuard;
use hourbook_core::error::AppError;
use hourbook_database::store::ClassStore;
use hourbook_entity::class::{Class, CreateClass};
use hourbook_entity::user::UserRole;

use crate::context::RequestContext;

/// Request to add a class to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassRequest {
    /// Course code, e.g. `RSSW290`.
    pub class_name: String,
    /// Hours a volunteer must log to complete the class.
    pub hour_requirement: f64,
}

/// Manages the class catalog.
#[derive(Debug, Clone)]
pub struct ClassService {
    classes: Arc<dyn ClassStore>,
}

impl ClassService {
    /// Creates a new class service.
    pub fn new(classes: Arc<dyn ClassStore>) -> Self {
        Self { classes }
    }

    /// Lists all classes.
    pub async fn list_classes(&self) -> Result<Vec<Class>, AppError> {
        self.classes.list().await
    }

    /// Gets a class by name.
    pub async fn get_class(&self, class_name: &str) -> Result<Class, AppError> {
        self.classes
            .find_by_name(class_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Class '{}' not found", class_name.trim()))
            })
    }

    /// Adds a class. Admin only.
    pub async fn create_class(
        &self,
        ctx: &RequestContext,
        req: CreateClassRequest,
    ) -> Result<Class, AppError> {
        RoleGuard::require_role(ctx.role, UserRole::Admin)?;

        let class_name = req.class_name.trim().to_string();
        if class_name.is_empty() {
            return Err(AppError::validation("Class name cannot be empty"));
        }
        if !req.hour_requirement.is_finite() || req.hour_requirement <= 0.0 {
            return Err(AppError::validation("Hour requirement must be a positive number"));
        }

        let class = self
            .classes
            .create(&CreateClass {
                class_name,
                hour_requirement: req.hour_requirement,
            })
            .await?;

        info!(actor_id = %ctx.user_id, class_name = %class.class_name, "Class created");
        Ok(class)
    }
}
