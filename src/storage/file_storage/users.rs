//! 用户记录操作

use chrono::Utc;

use super::FileStorage;
use crate::errors::Result;
use crate::models::common::PaginationInfo;
use crate::models::users::{
    entities::{User, UserRole, UserStatus},
    requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    responses::UserListResponse,
};

fn matches_filters(
    user: &User,
    role: &Option<UserRole>,
    status: &Option<UserStatus>,
    search: Option<&str>,
) -> bool {
    if let Some(role) = role
        && &user.role != role
    {
        return false;
    }
    if let Some(status) = status
        && &user.status != status
    {
        return false;
    }
    if let Some(search) = search {
        let needle = search.to_lowercase();
        if !needle.is_empty()
            && !user.name.to_lowercase().contains(&needle)
            && !user.username.to_lowercase().contains(&needle)
            && !user.email.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    true
}

impl FileStorage {
    pub(crate) async fn create_user_impl(&self, request: CreateUserRequest) -> Result<User> {
        let mut state = self.state.write().await;

        let user = User {
            id: state.next_user_id,
            name: request.name.trim().to_string(),
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
            password_hash: request.password,
            role: request.role,
            status: request.status.unwrap_or(UserStatus::Active),
            created_at: Utc::now(),
            last_login: None,
        };
        state.next_user_id += 1;
        state.users.push(user.clone());

        self.persist_users(&state);
        Ok(user)
    }

    pub(crate) async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    pub(crate) async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username.trim()))
            .cloned())
    }

    pub(crate) async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    pub(crate) async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let state = self.state.read().await;
        let identifier = identifier.trim();
        Ok(state
            .users
            .iter()
            .find(|u| {
                u.username.eq_ignore_ascii_case(identifier)
                    || u.email.eq_ignore_ascii_case(identifier)
            })
            .cloned())
    }

    pub(crate) async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let state = self.state.read().await;

        let filtered: Vec<&User> = state
            .users
            .iter()
            .filter(|u| matches_filters(u, &query.role, &query.status, query.search.as_deref()))
            .collect();

        let page = query.page.unwrap_or(1).max(1);
        let size = query.size.unwrap_or(10).max(1);
        let total = filtered.len() as i64;
        let start = ((page - 1) * size) as usize;

        let items = filtered
            .into_iter()
            .skip(start)
            .take(size as usize)
            .cloned()
            .collect();

        Ok(UserListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub(crate) async fn list_users_for_export_impl(
        &self,
        role: Option<UserRole>,
        status: Option<UserStatus>,
        search: Option<&str>,
    ) -> Result<Vec<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .filter(|u| matches_filters(u, &role, &status, search))
            .cloned()
            .collect())
    }

    pub(crate) async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let mut state = self.state.write().await;

        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            user.email = email.trim().to_string();
        }
        if let Some(password_hash) = update.password {
            user.password_hash = password_hash;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        let updated = user.clone();

        self.persist_users(&state);
        Ok(Some(updated))
    }

    pub(crate) async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;

        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        if state.users.len() == before {
            return Ok(false);
        }

        self.persist_users(&state);
        Ok(true)
    }

    pub(crate) async fn count_users_impl(&self) -> Result<i64> {
        let state = self.state.read().await;
        Ok(state.users.len() as i64)
    }

    pub(crate) async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;

        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };
        user.last_login = Some(Utc::now());

        self.persist_users(&state);
        Ok(true)
    }
}
