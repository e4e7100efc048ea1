use async_trait::async_trait;
use chrono::Utc;

use hourbook_core::error::AppError;
use hourbook_core::result::AppResult;
use hourbook_core::types::RegistrationRequestId;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_entity::registration::{
    CreateRegistrationRequest, RegistrationQuery, RegistrationRequest, RegistrationStatus,
};

use super::MemoryStore;
use crate::store::{RegistrationStore, RegistrationTransition};

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn create(&self, data: &CreateRegistrationRequest) -> AppResult<RegistrationRequest> {
        let mut state = self.state.lock().await;
        if state.registrations.iter().any(|r| {
            !r.status.is_terminal()
                && r.volunteer_id == data.volunteer_id
                && r.semester == data.semester
                && r.course_name.eq_ignore_ascii_case(&data.course_name)
        }) {
            return Err(AppError::conflict(format!(
                "An open registration request for {} in {} already exists",
                data.course_name, data.semester
            )));
        }
        let now = Utc::now();
        let request = RegistrationRequest {
            id: RegistrationRequestId::new(),
            volunteer_id: data.volunteer_id,
            volunteer_email: data.volunteer_email.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            course_name: data.course_name.clone(),
            semester: data.semester.clone(),
            year: data.year,
            organization: data.organization.clone(),
            supervisor_id: data.supervisor_id,
            supervisor_email: data.supervisor_email.clone(),
            status: RegistrationStatus::PendingSupervisorApproval,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        };
        state.registrations.push(request.clone());
        Ok(request)
    }

    async fn find_by_id(
        &self,
        id: RegistrationRequestId,
    ) -> AppResult<Option<RegistrationRequest>> {
        let state = self.state.lock().await;
        Ok(state.registrations.iter().find(|r| r.id == id).cloned())
    }

    async fn list(
        &self,
        query: &RegistrationQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<RegistrationRequest>> {
        let state = self.state.lock().await;
        let items = state
            .registrations
            .iter()
            .rev()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        Ok(PageResponse::from_items(items, page))
    }

    async fn count(&self, query: &RegistrationQuery) -> AppResult<u64> {
        let state = self.state.lock().await;
        Ok(state.registrations.iter().filter(|r| query.matches(r)).count() as u64)
    }

    async fn apply_transition(
        &self,
        transition: &RegistrationTransition,
    ) -> AppResult<Option<RegistrationRequest>> {
        let mut state = self.state.lock().await;

        let Some(request) = state
            .registrations
            .iter_mut()
            .find(|r| r.id == transition.id && r.status == transition.from)
        else {
            return Ok(None);
        };
        request.status = transition.to;
        if transition.reviewed_by.is_some() {
            request.reviewed_by = transition.reviewed_by;
        }
        request.updated_at = Utc::now();
        let updated = request.clone();

        if let Some(enrollment) = &transition.enrollment {
            state.push_enrollment(enrollment);
        }
        for notification in &transition.notifications {
            state.push_notification(notification);
        }

        Ok(Some(updated))
    }
}
