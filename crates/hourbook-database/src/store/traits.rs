//! Persistence traits, one per aggregate.
//!
//! Every method maps backend failures into `AppError` with
//! `ErrorKind::Database`; uniqueness violations become `Conflict`.

use async_trait::async_trait;

use hourbook_core::result::AppResult;
use hourbook_core::types::{
    HoursRequestId, NotificationId, PageRequest, PageResponse, RegistrationRequestId, UserId,
};
use hourbook_entity::class::{Class, CreateClass};
use hourbook_entity::enrollment::Enrollment;
use hourbook_entity::hours::{CreateHoursRequest, HoursQuery, HoursRequest, ProgressEntry};
use hourbook_entity::message::{CreateMessage, Message};
use hourbook_entity::notification::{CreateNotification, Notification};
use hourbook_entity::registration::{
    CreateRegistrationRequest, RegistrationQuery, RegistrationRequest,
};
use hourbook_entity::user::{CreateUser, User, UserRole};

use super::transition::{HoursTransition, RegistrationTransition};

/// User accounts of every role.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a user. Fails with `Conflict` if the email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List users, newest first, optionally restricted to one role.
    async fn list(
        &self,
        role: Option<UserRole>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>>;

    /// Every user with the given role.
    async fn find_all_by_role(&self, role: UserRole) -> AppResult<Vec<User>>;

    /// Stamp a successful login and refresh the avatar.
    async fn record_login(&self, id: UserId, avatar_url: Option<&str>) -> AppResult<User>;
}

/// The class catalog.
#[async_trait]
pub trait ClassStore: Send + Sync + std::fmt::Debug + 'static {
    /// Add a class. Fails with `Conflict` if the name exists.
    async fn create(&self, data: &CreateClass) -> AppResult<Class>;

    /// Find a class by its course code (case-insensitive).
    async fn find_by_name(&self, class_name: &str) -> AppResult<Option<Class>>;

    /// All classes ordered by name.
    async fn list(&self) -> AppResult<Vec<Class>>;
}

/// Enrollments and the supervisor roster derived from them.
#[async_trait]
pub trait EnrollmentStore: Send + Sync + std::fmt::Debug + 'static {
    /// A volunteer's enrollments, newest first.
    async fn list_for_volunteer(&self, volunteer_id: UserId) -> AppResult<Vec<Enrollment>>;

    /// Whether an enrollment exists for `(volunteer, class, semester)`.
    async fn is_enrolled(
        &self,
        volunteer_id: UserId,
        class_name: &str,
        semester: &str,
    ) -> AppResult<bool>;

    /// Volunteers with at least one enrollment approved through this supervisor.
    async fn volunteers_of_supervisor(&self, supervisor_id: UserId) -> AppResult<Vec<User>>;

    /// Supervisors of a volunteer's enrollments.
    async fn supervisors_of_volunteer(&self, volunteer_id: UserId) -> AppResult<Vec<User>>;
}

/// Registration requests and their transitions.
#[async_trait]
pub trait RegistrationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a request in `PendingSupervisorApproval`.
    async fn create(&self, data: &CreateRegistrationRequest) -> AppResult<RegistrationRequest>;

    /// Find a request by primary key.
    async fn find_by_id(&self, id: RegistrationRequestId)
    -> AppResult<Option<RegistrationRequest>>;

    /// List matching requests, newest first.
    async fn list(
        &self,
        query: &RegistrationQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RegistrationRequest>>;

    /// Count matching requests.
    async fn count(&self, query: &RegistrationQuery) -> AppResult<u64>;

    /// Apply a transition atomically.
    ///
    /// Returns `None` when the stored status differs from `transition.from`;
    /// in that case nothing is written.
    async fn apply_transition(
        &self,
        transition: &RegistrationTransition,
    ) -> AppResult<Option<RegistrationRequest>>;
}

/// Hours requests, their transitions and derived totals.
#[async_trait]
pub trait HoursStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a request in `Pending`.
    async fn create(&self, data: &CreateHoursRequest) -> AppResult<HoursRequest>;

    /// Find a request by primary key.
    async fn find_by_id(&self, id: HoursRequestId) -> AppResult<Option<HoursRequest>>;

    /// List matching requests, newest first.
    async fn list(
        &self,
        query: &HoursQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HoursRequest>>;

    /// Count matching requests.
    async fn count(&self, query: &HoursQuery) -> AppResult<u64>;

    /// Apply a transition atomically; `None` if the status changed underneath.
    async fn apply_transition(
        &self,
        transition: &HoursTransition,
    ) -> AppResult<Option<HoursRequest>>;

    /// Sum of hours over the volunteer's approved requests.
    async fn approved_total(&self, volunteer_id: UserId) -> AppResult<f64>;

    /// Approved hours grouped by activity, class and date, oldest first.
    async fn progress(
        &self,
        volunteer_id: UserId,
        class_name: Option<&str>,
    ) -> AppResult<Vec<ProgressEntry>>;
}

/// Direct messages.
#[async_trait]
pub trait MessageStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a message and the receiver's notification together.
    async fn send(
        &self,
        message: &CreateMessage,
        notification: &CreateNotification,
    ) -> AppResult<Message>;

    /// Messages exchanged between two users, oldest first.
    async fn conversation(
        &self,
        a: UserId,
        b: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Message>>;
}

/// Notifications addressed to a user.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// List a user's notifications, newest first.
    async fn list_for_user(
        &self,
        receiver_id: UserId,
        unread_only: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count a user's unread notifications.
    async fn unread_count(&self, receiver_id: UserId) -> AppResult<u64>;

    /// Mark one notification read. Already-read notifications keep their
    /// original `read_at`. Returns `None` if it does not belong to the user.
    async fn mark_read(
        &self,
        id: NotificationId,
        receiver_id: UserId,
    ) -> AppResult<Option<Notification>>;

    /// Mark every unread notification of a user read; returns how many changed.
    async fn mark_all_read(&self, receiver_id: UserId) -> AppResult<u64>;
}
