// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::gift_card::{GiftCard, GiftCardForm, GiftCardStatus};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use serde_json::{json, Value};
use std::sync::Arc;

/// 礼品卡服务
pub struct GiftCardService {
    api: Arc<ApiClient>,
}

impl GiftCardService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<GiftCard>, ApiError> {
        self.api
            .get::<ApiResponse<Vec<GiftCard>>>("/admin/gift-cards", &[])
            .await?
            .into_data_or_default()
    }

    pub async fn create(&self, form: &GiftCardForm) -> Result<Option<String>, ApiError> {
        self.api
            .post::<ApiResponse<Value>, _>("/admin/gift-cards", form)
            .await?
            .into_message()
    }

    pub async fn update_status(&self, id: i64, status: GiftCardStatus) -> Result<Option<String>, ApiError> {
        self.api
            .put::<ApiResponse<Value>, _>(&format!("/admin/gift-cards/{}/status", id), &json!({ "status": status }))
            .await?
            .into_message()
    }

    pub async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        self.api
            .delete::<ApiResponse<Value>>(&format!("/admin/gift-cards/{}", id))
            .await?
            .into_message()
    }
}
