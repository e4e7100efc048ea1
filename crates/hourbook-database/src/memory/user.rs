use async_trait::async_trait;
use chrono::Utc;

use hourbook_core::error::AppError;
use hourbook_core::result::AppResult;
use hourbook_core::types::UserId;
use hourbook_core::types::pagination::{PageRequest, PageResponse};
use hourbook_entity::user::{CreateUser, User, UserRole};

use super::MemoryStore;
use crate::store::UserStore;

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(AppError::conflict(format!(
                "A user with email '{}' already exists",
                data.email
            )));
        }
        let user = User {
            id: UserId::new(),
            email: data.email.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            avatar_url: data.avatar_url.clone(),
            role: data.role,
            created_at: Utc::now(),
            last_login_at: None,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim();
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(
        &self,
        role: Option<UserRole>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let state = self.state.lock().await;
        let users = state
            .users
            .iter()
            .rev()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .cloned()
            .collect();
        Ok(PageResponse::from_items(users, page))
    }

    async fn find_all_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state
            .users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn record_login(&self, id: UserId, avatar_url: Option<&str>) -> AppResult<User> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.last_login_at = Some(Utc::now());
        if let Some(url) = avatar_url {
            user.avatar_url = Some(url.to_string());
        }
        Ok(user.clone())
    }
}
