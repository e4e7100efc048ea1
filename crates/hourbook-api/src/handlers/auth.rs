//! Auth handlers: login, refresh, me.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, LoginResponse, RefreshResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// Header carrying the shared key of the token-exchange server.
pub const IDENTITY_KEY_HEADER: &str = "x-identity-key";

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let presented_key = headers
        .get(IDENTITY_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .unwrap_or("unknown");

    let result = state
        .auth_service
        .login(presented_key, &req.into(), ip)
        .await?;

    Ok(Json(ApiResponse::ok(result.into())))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    let result = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(result.into())))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
