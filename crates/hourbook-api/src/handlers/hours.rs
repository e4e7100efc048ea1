//! Hours request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use hourbook_core::types::{HoursRequestId, PageResponse};
use hourbook_entity::hours::HoursRequest;

use crate::dto::request::{DecisionRequest, HoursFilter, SubmitHoursBody};
use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson, parse_id};
use crate::state::AppState;

/// POST /api/hours-requests
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<SubmitHoursBody>,
) -> Result<(StatusCode, Json<ApiResponse<HoursRequest>>), ApiError> {
    let request = state.hours_service.submit(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// GET /api/hours-requests
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<HoursFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<HoursRequest>>>, ApiError> {
    let page = state
        .hours_service
        .list(&auth, filter.status, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/hours-requests/pending/count
pub async fn pending_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.hours_service.pending_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// GET /api/hours-requests/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<HoursRequest>>, ApiError> {
    let id: HoursRequestId = parse_id(&id)?;
    let request = state.hours_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/hours-requests/{id}/decision
pub async fn decide(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<DecisionRequest>,
) -> Result<Json<ApiResponse<HoursRequest>>, ApiError> {
    let id: HoursRequestId = parse_id(&id)?;
    let request = state
        .hours_review_service
        .decide(&auth, id, body.action)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}
