//! Admin class management.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use hourbook_entity::class::Class;

use crate::dto::request::CreateClassBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/admin/classes
pub async fn create_class(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateClassBody>,
) -> Result<(StatusCode, Json<ApiResponse<Class>>), ApiError> {
    let class = state.class_service.create_class(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(class))))
}
