//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use hourbook_core::types::{NotificationId, PageResponse};
use hourbook_entity::notification::Notification;

use crate::dto::request::NotificationFilter;
use crate::dto::response::{ApiResponse, CountResponse, MarkedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, parse_id};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<NotificationFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Notification>>>, ApiError> {
    let page = state
        .notification_service
        .list_notifications(&auth, filter.unread_only, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let id: NotificationId = parse_id(&id)?;
    let notification = state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MarkedResponse>>, ApiError> {
    let marked = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(ApiResponse::ok(MarkedResponse { marked })))
}
