use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use hourbook_core::result::AppResult;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_core::types::{HoursRequestId, UserId};
use hourbook_entity::hours::{
    CreateHoursRequest, HoursQuery, HoursRequest, HoursStatus, ProgressEntry,
};

use super::MemoryStore;
use crate::store::{HoursStore, HoursTransition};

#[async_trait]
impl HoursStore for MemoryStore {
    async fn create(&self, data: &CreateHoursRequest) -> AppResult<HoursRequest> {
        let now = Utc::now();
        let request = HoursRequest {
            id: HoursRequestId::new(),
            volunteer_id: data.volunteer_id,
            supervisor_id: data.supervisor_id,
            class_name: data.class_name.clone(),
            date: data.date,
            from_time: data.from_time,
            to_time: data.to_time,
            activity: data.activity.clone(),
            hours: data.hours,
            status: HoursStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().await.hours.push(request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: HoursRequestId) -> AppResult<Option<HoursRequest>> {
        let state = self.state.lock().await;
        Ok(state.hours.iter().find(|h| h.id == id).cloned())
    }

    async fn list(
        &self,
        query: &HoursQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<HoursRequest>> {
        let state = self.state.lock().await;
        let items = state
            .hours
            .iter()
            .rev()
            .filter(|h| query.matches(h))
            .cloned()
            .collect();
        Ok(PageResponse::from_items(items, page))
    }

    async fn count(&self, query: &HoursQuery) -> AppResult<u64> {
        let state = self.state.lock().await;
        Ok(state.hours.iter().filter(|h| query.matches(h)).count() as u64)
    }

    async fn apply_transition(
        &self,
        transition: &HoursTransition,
    ) -> AppResult<Option<HoursRequest>> {
        let mut state = self.state.lock().await;

        let Some(request) = state
            .hours
            .iter_mut()
            .find(|h| h.id == transition.id && h.status == transition.from)
        else {
            return Ok(None);
        };
        request.status = transition.to;
        request.updated_at = Utc::now();
        let updated = request.clone();

        for notification in &transition.notifications {
            state.push_notification(notification);
        }

        Ok(Some(updated))
    }

    async fn approved_total(&self, volunteer_id: UserId) -> AppResult<f64> {
        let state = self.state.lock().await;
        Ok(state
            .hours
            .iter()
            .filter(|h| h.volunteer_id == volunteer_id && h.status == HoursStatus::Approved)
            .map(|h| h.hours)
            .sum())
    }

    async fn progress(
        &self,
        volunteer_id: UserId,
        class_name: Option<&str>,
    ) -> AppResult<Vec<ProgressEntry>> {
        let state = self.state.lock().await;
        let mut groups: BTreeMap<(NaiveDate, String, String), f64> = BTreeMap::new();
        for h in state.hours.iter().filter(|h| {
            h.volunteer_id == volunteer_id
                && h.status == HoursStatus::Approved
                && class_name.is_none_or(|c| c == h.class_name)
        }) {
            *groups
                .entry((h.date, h.activity.clone(), h.class_name.clone()))
                .or_default() += h.hours;
        }
        Ok(groups
            .into_iter()
            .map(|((activity_date, activity, class_name), total_hours)| ProgressEntry {
                activity,
                class_name,
                activity_date,
                total_hours,
            })
            .collect())
    }
}
