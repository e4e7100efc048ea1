use async_trait::async_trait;
use chrono::Utc;

use hourbook_core::error::AppError;
use hourbook_core::result::AppResult;
use hourbook_core::types::ClassId;
use hourbook_entity::class::{Class, CreateClass};

use super::MemoryStore;
use crate::store::ClassStore;

#[async_trait]
impl ClassStore for MemoryStore {
    async fn create(&self, data: &CreateClass) -> AppResult<Class> {
        let mut state = self.state.lock().await;
        if state
            .classes
            .iter()
            .any(|c| c.class_name.eq_ignore_ascii_case(&data.class_name))
        {
            return Err(AppError::conflict(format!(
                "Class '{}' already exists",
                data.class_name
            )));
        }
        let class = Class {
            id: ClassId::new(),
            class_name: data.class_name.clone(),
            hour_requirement: data.hour_requirement,
            created_at: Utc::now(),
        };
        state.classes.push(class.clone());
        Ok(class)
    }

    async fn find_by_name(&self, class_name: &str) -> AppResult<Option<Class>> {
        let class_name = class_name.trim();
        let state = self.state.lock().await;
        Ok(state
            .classes
            .iter()
            .find(|c| c.class_name.eq_ignore_ascii_case(class_name))
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Class>> {
        let state = self.state.lock().await;
        let mut classes = state.classes.clone();
        classes.sort_by(|a, b| a.class_name.cmp(&b.class_name));
        Ok(classes)
    }
}
