//! Enrollment, progress and roster handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use hourbook_core::types::UserId;
use hourbook_entity::enrollment::Enrollment;
use hourbook_service::hours::{ProgressReport, VolunteerSummary};
use hourbook_service::roster::RosterEntry;

use crate::dto::request::{EnrollmentCheckQuery, ProgressQuery};
use crate::dto::response::{ApiResponse, EnrollmentCheckResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_id};
use crate::state::AppState;

/// GET /api/enrollments/check
pub async fn check_enrollment(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<EnrollmentCheckQuery>,
) -> Result<Json<ApiResponse<EnrollmentCheckResponse>>, ApiError> {
    let enrolled = state
        .roster_service
        .check_enrollment(&auth, &query.class_name, &query.semester)
        .await?;
    Ok(Json(ApiResponse::ok(EnrollmentCheckResponse { enrolled })))
}

/// GET /api/volunteers/{id}/enrollments
pub async fn enrollments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Enrollment>>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let enrollments = state.roster_service.enrollments_of(&auth, id).await?;
    Ok(Json(ApiResponse::ok(enrollments)))
}

/// GET /api/volunteers/{id}/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VolunteerSummary>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let summary = state.progress_service.summary(&auth, id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/volunteers/{id}/progress
pub async fn progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ApiResponse<ProgressReport>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let report = state
        .progress_service
        .progress(&auth, id, query.class_name.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/volunteers/{id}/supervisors
pub async fn supervisors(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let supervisors = state.roster_service.supervisors_of(&auth, id).await?;
    Ok(Json(ApiResponse::ok(
        supervisors.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/supervisors/{id}/volunteers
pub async fn roster(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<RosterEntry>>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let roster = state.roster_service.volunteers_of(&auth, id).await?;
    Ok(Json(ApiResponse::ok(roster)))
}
