// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::integration::{Integration, IntegrationForm, SyncReport};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use serde_json::{json, Value};
use std::sync::Arc;

/// 集成服务
pub struct IntegrationService {
    api: Arc<ApiClient>,
}

impl IntegrationService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Integration>, ApiError> {
        self.api
            .get::<ApiResponse<Vec<Integration>>>("/admin/integrations", &[])
            .await?
            .into_data_or_default()
    }

    pub async fn create(&self, form: &IntegrationForm) -> Result<Option<String>, ApiError> {
        self.api
            .post::<ApiResponse<Value>, _>("/admin/integrations", form)
            .await?
            .into_message()
    }

    pub async fn update(&self, id: i64, form: &IntegrationForm) -> Result<Option<String>, ApiError> {
        self.api
            .put::<ApiResponse<Value>, _>(&format!("/admin/integrations/{}", id), form)
            .await?
            .into_message()
    }

    pub async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        self.api
            .delete::<ApiResponse<Value>>(&format!("/admin/integrations/{}", id))
            .await?
            .into_message()
    }

    /// 测试集成连通性
    pub async fn test(&self, id: i64) -> Result<Option<String>, ApiError> {
        self.api
            .post::<ApiResponse<Value>, _>(&format!("/admin/integrations/{}/test", id), &json!({}))
            .await?
            .into_message()
    }

    /// 从市场平台同步订单
    pub async fn sync_orders(&self, id: i64) -> Result<SyncReport, ApiError> {
        self.api
            .post::<ApiResponse<SyncReport>, _>(&format!("/admin/integrations/{}/sync-orders", id), &json!({}))
            .await?
            .into_data_or_default()
    }
}
