//! Admin user provisioning.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::CreateUserBody;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateUserBody>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state
        .admin_user_service
        .create_user(&auth, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}
