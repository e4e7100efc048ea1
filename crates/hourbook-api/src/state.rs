//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use hourbook_auth::{IdentityVerifier, JwtDecoder, JwtEncoder};
use hourbook_core::config::AppConfig;
use hourbook_database::Store;
use hourbook_service::{
    AdminUserService, AuthService, ClassService, HoursReviewService, HoursService,
    MessageService, NotificationRules, NotificationService, ProgressService,
    RegistrationReviewService, RegistrationService, RosterService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Persistence backend (PostgreSQL or in-memory)
    pub store: Store,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub admin_user_service: Arc<AdminUserService>,
    pub class_service: Arc<ClassService>,
    pub registration_service: Arc<RegistrationService>,
    pub registration_review_service: Arc<RegistrationReviewService>,
    pub hours_service: Arc<HoursService>,
    pub hours_review_service: Arc<HoursReviewService>,
    pub progress_service: Arc<ProgressService>,
    pub roster_service: Arc<RosterService>,
    pub message_service: Arc<MessageService>,
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    /// Wires every service on top of an opened store.
    pub fn new(config: AppConfig, store: Store) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let verifier = Arc::new(IdentityVerifier::new(&config.auth));
        let rules = Arc::new(NotificationRules::new(Arc::clone(&store.users)));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&store.users),
            verifier,
            jwt_encoder,
            Arc::clone(&jwt_decoder),
            config.auth.auto_provision,
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&store.users)));
        let admin_user_service = Arc::new(AdminUserService::new(Arc::clone(&store.users)));
        let class_service = Arc::new(ClassService::new(Arc::clone(&store.classes)));
        let registration_service = Arc::new(RegistrationService::new(
            Arc::clone(&store.users),
            Arc::clone(&store.classes),
            Arc::clone(&store.enrollments),
            Arc::clone(&store.registrations),
        ));
        let registration_review_service = Arc::new(RegistrationReviewService::new(
            Arc::clone(&store.registrations),
            Arc::clone(&rules),
        ));
        let hours_service = Arc::new(HoursService::new(
            Arc::clone(&store.users),
            Arc::clone(&store.classes),
            Arc::clone(&store.hours),
        ));
        let hours_review_service = Arc::new(HoursReviewService::new(
            Arc::clone(&store.hours),
            Arc::clone(&rules),
        ));
        let progress_service = Arc::new(ProgressService::new(
            Arc::clone(&store.users),
            Arc::clone(&store.classes),
            Arc::clone(&store.enrollments),
            Arc::clone(&store.hours),
        ));
        let roster_service = Arc::new(RosterService::new(
            Arc::clone(&store.enrollments),
            Arc::clone(&store.hours),
        ));
        let message_service = Arc::new(MessageService::new(
            Arc::clone(&store.users),
            Arc::clone(&store.messages),
            rules,
        ));
        let notification_service =
            Arc::new(NotificationService::new(Arc::clone(&store.notifications)));

        Self {
            config: Arc::new(config),
            store,
            jwt_decoder,
            auth_service,
            user_service,
            admin_user_service,
            class_service,
            registration_service,
            registration_review_service,
            hours_service,
            hours_review_service,
            progress_service,
            roster_service,
            message_service,
            notification_service,
        }
    }
}
