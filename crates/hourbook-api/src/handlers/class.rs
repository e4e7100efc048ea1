//! Class catalog handlers.

use axum::Json;
use axum::extract::{Path, State};

use hourbook_entity::class::Class;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/classes
pub async fn list_classes(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Class>>>, ApiError> {
    let classes = state.class_service.list_classes().await?;
    Ok(Json(ApiResponse::ok(classes)))
}

/// GET /api/classes/{class_name}
pub async fn get_class(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(class_name): Path<String>,
) -> Result<Json<ApiResponse<Class>>, ApiError> {
    let class = state.class_service.get_class(&class_name).await?;
    Ok(Json(ApiResponse::ok(class)))
}
