// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::seo::{normalize_url, SeoAnalysis};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use serde_json::json;
use std::sync::Arc;

/// SEO分析服务
pub struct SeoService {
    api: Arc<ApiClient>,
}

impl SeoService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn analyze(&self, url: &str) -> Result<SeoAnalysis, ApiError> {
        let url = normalize_url(url)
            .ok_or_else(|| ApiError::Validation("Lütfen bir URL girin".to_string()))?;
        self.api
            .post::<ApiResponse<SeoAnalysis>, _>("/admin/seo/analyze", &json!({ "url": url }))
            .await?
            .into_data()
    }
}
