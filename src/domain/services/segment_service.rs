// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::segment::{Segment, SegmentForm};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use serde_json::Value;
use std::sync::Arc;

/// 客户分群服务
pub struct SegmentService {
    api: Arc<ApiClient>,
}

impl SegmentService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Segment>, ApiError> {
        self.api
            .get::<ApiResponse<Vec<Segment>>>("/admin/segments", &[])
            .await?
            .into_data_or_default()
    }

    pub async fn create(&self, form: &SegmentForm) -> Result<Option<String>, ApiError> {
        let body = SegmentForm {
            name: form.name.trim().to_string(),
            criteria: form.criteria.trim().to_string(),
            color: form.color.clone(),
        };
        self.api
            .post::<ApiResponse<Value>, _>("/admin/segments", &body)
            .await?
            .into_message()
    }

    pub async fn update(&self, id: i64, form: &SegmentForm) -> Result<Option<String>, ApiError> {
        self.api
            .put::<ApiResponse<Value>, _>(&format!("/admin/segments/{}", id), form)
            .await?
            .into_message()
    }

    pub async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        self.api
            .delete::<ApiResponse<Value>>(&format!("/admin/segments/{}", id))
            .await?
            .into_message()
    }
}
