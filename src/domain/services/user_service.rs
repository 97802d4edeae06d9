// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::user::{Credentials, NewUser, PasswordChange, ProfileUpdate, User};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// 用户服务
pub struct UserService {
    api: Arc<ApiClient>,
}

impl UserService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// 列出用户
    ///
    /// 依次尝试 `/admin/users` 和 `/users/search`，两者都失败时返回空列表
    pub async fn list_users(&self) -> Vec<User> {
        let admin = self
            .api
            .get::<ApiResponse<Vec<User>>>(
                "/admin/users",
                &[("page", "1".to_string()), ("limit", "50".to_string())],
            )
            .await
            .and_then(ApiResponse::into_data);
        match admin {
            Ok(users) => return users,
            Err(e) => warn!("Admin user listing unavailable, falling back to search: {}", e),
        }

        match self.search("an", Some(0)).await {
            Ok(users) => users,
            Err(e) => {
                warn!("User search fallback failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn search(&self, query: &str, exclude_user_id: Option<i64>) -> Result<Vec<User>, ApiError> {
        let mut params = vec![("query", query.to_string())];
        if let Some(id) = exclude_user_id {
            params.push(("excludeUserId", id.to_string()));
        }
        self.api
            .get::<ApiResponse<Vec<User>>>("/users/search", &params)
            .await?
            .into_data()
    }

    pub async fn register(&self, user: &NewUser) -> Result<Value, ApiError> {
        self.api
            .post::<ApiResponse<Value>, _>("/users", user)
            .await?
            .into_data_or_default()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.api
            .post::<ApiResponse<User>, _>("/users/login", credentials)
            .await?
            .into_data()
    }

    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        self.api
            .get::<ApiResponse<User>>(&format!("/users/{}", id), &[])
            .await?
            .into_data()
    }

    pub async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> Result<Option<String>, ApiError> {
        self.api
            .put::<ApiResponse<Value>, _>(&format!("/users/{}/profile", id), update)
            .await?
            .into_message()
    }

    pub async fn change_password(&self, id: i64, change: &PasswordChange) -> Result<Option<String>, ApiError> {
        self.api
            .put::<ApiResponse<Value>, _>(&format!("/users/{}/password", id), change)
            .await?
            .into_message()
    }

    pub async fn account_summary(&self, id: i64) -> Result<Value, ApiError> {
        self.api
            .get::<ApiResponse<Value>>(&format!("/users/{}/account-summary", id), &[])
            .await?
            .into_data()
    }
}
