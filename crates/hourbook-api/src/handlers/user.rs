//! User directory handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use hourbook_core::types::PageResponse;

use crate::dto::request::RoleFilter;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<RoleFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let page = state
        .user_service
        .list_users(&auth, filter.role, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.map(UserResponse::from))))
}

/// GET /api/users/by-email/{email}
pub async fn get_by_email(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.find_by_email(&email).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
