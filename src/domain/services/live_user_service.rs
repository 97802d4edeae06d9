// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::live_user::{LiveUser, LiveUsersSnapshot};
use crate::infrastructure::api::ApiClient;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// 在线用户服务
pub struct LiveUserService {
    api: Arc<ApiClient>,
}

impl LiveUserService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// 获取在线用户快照
    ///
    /// 请求失败或响应无数据时返回空列表，`last_update` 总是刷新
    pub async fn snapshot(&self) -> LiveUsersSnapshot {
        let result = self
            .api
            .get::<ApiResponse<Vec<LiveUser>>>("/admin/live-users", &[])
            .await
            .and_then(ApiResponse::into_data);

        match result {
            Ok(users) => {
                debug!("Loaded {} live users", users.len());
                LiveUsersSnapshot {
                    users,
                    last_update: Utc::now(),
                }
            }
            Err(e) => {
                warn!("Live users unavailable, using empty list: {}", e);
                LiveUsersSnapshot::empty(Utc::now())
            }
        }
    }
}
