// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::product::{PriceRange, Product, ProductFilter, ProductVariation};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use std::sync::Arc;

/// 商品服务
pub struct ProductService {
    api: Arc<ApiClient>,
}

impl ProductService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.api
            .get::<ApiResponse<Vec<String>>>("/categories", &[])
            .await?
            .into_data_or_default()
    }

    pub async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Vec<Product>, ApiError> {
        self.api
            .get::<ApiResponse<Vec<Product>>>(
                "/products/search",
                &[
                    ("q", query.to_string()),
                    ("page", page.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?
            .into_data_or_default()
    }

    pub async fn get(&self, id: i64) -> Result<Product, ApiError> {
        self.api
            .get::<ApiResponse<Product>>(&format!("/products/{}", id), &[])
            .await?
            .into_data()
    }

    pub async fn variations(&self, id: i64) -> Result<Vec<ProductVariation>, ApiError> {
        self.api
            .get::<ApiResponse<Vec<ProductVariation>>>(&format!("/products/{}/variations", id), &[])
            .await?
            .into_data_or_default()
    }

    pub async fn filter(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        self.api
            .post::<ApiResponse<Vec<Product>>, _>("/products/filter", filter)
            .await?
            .into_data_or_default()
    }

    pub async fn price_range(&self) -> Result<PriceRange, ApiError> {
        self.api
            .get::<ApiResponse<PriceRange>>("/products/price-range", &[])
            .await?
            .into_data_or_default()
    }

    pub async fn low_stock(&self, threshold: Option<u32>) -> Result<Vec<Product>, ApiError> {
        let params: Vec<(&str, String)> = threshold
            .map(|t| vec![("threshold", t.to_string())])
            .unwrap_or_default();
        self.api
            .get::<ApiResponse<Vec<Product>>>("/products/low-stock", &params)
            .await?
            .into_data_or_default()
    }
}
