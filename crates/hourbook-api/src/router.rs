//! Route definitions for the Hourbook HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree. State and layers are attached by
/// [`crate::app::build_app`].
pub fn build_router() -> Router<AppState> {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(class_routes())
        .merge(registration_routes())
        .merge(volunteer_routes())
        .merge(hours_routes())
        .merge(message_routes())
        .merge(notification_routes())
        .merge(admin_routes());

    Router::new().nest("/api", api_routes)
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Identity login, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users/by-email/{email}", get(handlers::user::get_by_email))
}

fn class_routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(handlers::class::list_classes))
        .route("/classes/{class_name}", get(handlers::class::get_class))
}

/// Registration workflow
fn registration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/registration-requests",
            post(handlers::registration::submit).get(handlers::registration::list),
        )
        .route(
            "/registration-requests/pending/count",
            get(handlers::registration::pending_count),
        )
        .route(
            "/registration-requests/{id}",
            get(handlers::registration::get),
        )
        .route(
            "/registration-requests/{id}/decision",
            post(handlers::registration::decide),
        )
}

/// Enrollments, progress and rosters
fn volunteer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/enrollments/check",
            get(handlers::volunteer::check_enrollment),
        )
        .route(
            "/volunteers/{id}/enrollments",
            get(handlers::volunteer::enrollments),
        )
        .route(
            "/volunteers/{id}/summary",
            get(handlers::volunteer::summary),
        )
        .route(
            "/volunteers/{id}/progress",
            get(handlers::volunteer::progress),
        )
        .route(
            "/volunteers/{id}/supervisors",
            get(handlers::volunteer::supervisors),
        )
        .route(
            "/supervisors/{id}/volunteers",
            get(handlers::volunteer::roster),
        )
}

/// Hours workflow
fn hours_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/hours-requests",
            post(handlers::hours::submit).get(handlers::hours::list),
        )
        .route(
            "/hours-requests/pending/count",
            get(handlers::hours::pending_count),
        )
        .route("/hours-requests/{id}", get(handlers::hours::get))
        .route(
            "/hours-requests/{id}/decision",
            post(handlers::hours::decide),
        )
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(handlers::message::send))
        .route(
            "/messages/with/{email}",
            get(handlers::message::conversation),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", post(handlers::admin::users::create_user))
        .route(
            "/admin/classes",
            post(handlers::admin::classes::create_class),
        )
}
