//! Direct message handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use hourbook_core::types::PageResponse;
use hourbook_entity::message::Message;

use crate::dto::request::SendMessageBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/messages
pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<SendMessageBody>,
) -> Result<(StatusCode, Json<ApiResponse<Message>>), ApiError> {
    let message = state.message_service.send(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}

/// GET /api/messages/with/{email}
pub async fn conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Message>>>, ApiError> {
    let page = state
        .message_service
        .conversation(&auth, &email, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}
