// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::business::BusinessData;
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// 抓取结果的持久化目标
#[async_trait]
pub trait ScrapedDataSink: Send + Sync {
    /// 保存结果，返回服务端确认的保存条数
    async fn save(&self, results: &[BusinessData]) -> Result<usize, ApiError>;
}

/// 通过 `/admin/google-maps/scraped-data` 保存抓取结果
pub struct ScrapedDataService {
    api: Arc<ApiClient>,
}

impl ScrapedDataService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ScrapedDataSink for ScrapedDataService {
    async fn save(&self, results: &[BusinessData]) -> Result<usize, ApiError> {
        let data = self
            .api
            .post::<ApiResponse<Value>, _>("/admin/google-maps/scraped-data", results)
            .await?
            .into_data_or_default()?;
        let saved = data
            .get("saved")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(results.len());
        Ok(saved)
    }
}
