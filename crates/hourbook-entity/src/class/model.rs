//! Class entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hourbook_core::types::ClassId;

/// A course that volunteers enroll in and log hours against.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Class {
    /// Unique class identifier.
    pub id: ClassId,
    /// Unique course code, e.g. `RSSW290`.
    pub class_name: String,
    /// Service hours required to complete the class.
    pub hour_requirement: f64,
    /// When the class was added to the catalog.
    pub created_at: DateTime<Utc>,
}

/// Data required to add a class to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClass {
    /// Course code.
    pub class_name: String,
    /// Required service hours.
    pub hour_requirement: f64,
}
