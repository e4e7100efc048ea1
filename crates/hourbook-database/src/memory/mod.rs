//! In-process store using a Tokio mutex.
//!
//! Suitable for tests and single-node demos only. Rows live in insertion
//! order, so reversing a table yields newest-first ordering. Every
//! multi-row write happens under one lock acquisition, which gives the
//! same atomicity the PostgreSQL transactions provide.

mod class;
mod enrollment;
mod hours;
mod message;
mod notification;
mod registration;
mod user;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use hourbook_core::types::{EnrollmentId, NotificationId};
use hourbook_entity::class::Class;
use hourbook_entity::enrollment::{CreateEnrollment, Enrollment};
use hourbook_entity::hours::HoursRequest;
use hourbook_entity::message::Message;
use hourbook_entity::notification::{CreateNotification, Notification};
use hourbook_entity::registration::RegistrationRequest;
use hourbook_entity::user::User;

/// Tables held by the memory store.
#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    classes: Vec<Class>,
    enrollments: Vec<Enrollment>,
    registrations: Vec<RegistrationRequest>,
    hours: Vec<HoursRequest>,
    messages: Vec<Message>,
    notifications: Vec<Notification>,
}

impl MemoryState {
    fn push_notification(&mut self, data: &CreateNotification) {
        self.notifications.push(Notification {
            id: NotificationId::new(),
            receiver_id: data.receiver_id,
            sender_id: data.sender_id,
            kind: data.kind,
            body: data.body.clone(),
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        });
    }

    /// Insert unless the `(volunteer, class, semester)` key exists.
    fn push_enrollment(&mut self, data: &CreateEnrollment) -> bool {
        let exists = self.enrollments.iter().any(|e| {
            e.volunteer_id == data.volunteer_id
                && e.class_name == data.class_name
                && e.semester == data.semester
        });
        if exists {
            return false;
        }
        self.enrollments.push(Enrollment {
            id: EnrollmentId::new(),
            volunteer_id: data.volunteer_id,
            class_name: data.class_name.clone(),
            semester: data.semester.clone(),
            year: data.year,
            organization: data.organization.clone(),
            supervisor_id: data.supervisor_id,
            registration_request_id: data.registration_request_id,
            created_at: Utc::now(),
        });
        true
    }
}

/// Store implementation that keeps every table in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}
