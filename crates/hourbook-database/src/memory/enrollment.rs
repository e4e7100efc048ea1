use std::collections::HashSet;

use async_trait::async_trait;

use hourbook_core::result::AppResult;
use hourbook_core::types::UserId;
use hourbook_entity::enrollment::Enrollment;
use hourbook_entity::user::User;

use super::MemoryStore;
use crate::store::EnrollmentStore;

fn sort_by_name(users: &mut [User]) {
    users.sort_by(|a, b| {
        (a.last_name.as_str(), a.first_name.as_str())
            .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
    });
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn list_for_volunteer(&self, volunteer_id: UserId) -> AppResult<Vec<Enrollment>> {
        let state = self.state.lock().await;
        Ok(state
            .enrollments
            .iter()
            .rev()
            .filter(|e| e.volunteer_id == volunteer_id)
            .cloned()
            .collect())
    }

    async fn is_enrolled(
        &self,
        volunteer_id: UserId,
        class_name: &str,
        semester: &str,
    ) -> AppResult<bool> {
        let state = self.state.lock().await;
        Ok(state.enrollments.iter().any(|e| {
            e.volunteer_id == volunteer_id && e.class_name == class_name && e.semester == semester
        }))
    }

    async fn volunteers_of_supervisor(&self, supervisor_id: UserId) -> AppResult<Vec<User>> {
        let state = self.state.lock().await;
        let ids: HashSet<UserId> = state
            .enrollments
            .iter()
            .filter(|e| e.supervisor_id == supervisor_id)
            .map(|e| e.volunteer_id)
            .collect();
        let mut users: Vec<User> = state
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect();
        sort_by_name(&mut users);
        Ok(users)
    }

    async fn supervisors_of_volunteer(&self, volunteer_id: UserId) -> AppResult<Vec<User>> {
        let state = self.state.lock().await;
        let ids: HashSet<UserId> = state
            .enrollments
            .iter()
            .filter(|e| e.volunteer_id == volunteer_id)
            .map(|e| e.supervisor_id)
            .collect();
        let mut users: Vec<User> = state
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect();
        sort_by_name(&mut users);
        Ok(users)
    }
}
