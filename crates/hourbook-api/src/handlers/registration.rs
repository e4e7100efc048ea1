//! Registration request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use hourbook_core::types::{PageResponse, RegistrationRequestId};
use hourbook_entity::registration::RegistrationRequest;

use crate::dto::request::{DecisionRequest, RegistrationFilter, SubmitRegistrationBody};
use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson, parse_id};
use crate::state::AppState;

/// POST /api/registration-requests
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<SubmitRegistrationBody>,
) -> Result<(StatusCode, Json<ApiResponse<RegistrationRequest>>), ApiError> {
    let request = state
        .registration_service
        .submit(&auth, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// GET /api/registration-requests
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<RegistrationFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<RegistrationRequest>>>, ApiError> {
    let page = state
        .registration_service
        .list(&auth, filter.status, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/registration-requests/pending/count
pub async fn pending_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.registration_service.pending_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// GET /api/registration-requests/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RegistrationRequest>>, ApiError> {
    let id: RegistrationRequestId = parse_id(&id)?;
    let request = state.registration_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/registration-requests/{id}/decision
pub async fn decide(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<DecisionRequest>,
) -> Result<Json<ApiResponse<RegistrationRequest>>, ApiError> {
    let id: RegistrationRequestId = parse_id(&id)?;
    let request = state
        .registration_review_service
        .decide(&auth, id, body.action)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}
