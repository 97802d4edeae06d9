// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::trendyol::{TrendyolProductPage, TrendyolProductQuery};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use std::sync::Arc;

/// Trendyol市场服务
pub struct TrendyolService {
    api: Arc<ApiClient>,
}

impl TrendyolService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn products(&self, query: &TrendyolProductQuery) -> Result<TrendyolProductPage, ApiError> {
        self.api
            .get::<ApiResponse<TrendyolProductPage>>("/admin/trendyol/products", &query.to_params())
            .await?
            .into_data_or_default()
    }
}
