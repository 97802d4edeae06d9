// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::cart::{AddToCart, CartItem, CartTotalDetailed};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// 购物车服务
pub struct CartService {
    api: Arc<ApiClient>,
}

impl CartService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// 获取用户购物车
    ///
    /// 先请求 `/cart/{id}`，失败时回退到旧路径 `/cart/user/{id}`
    pub async fn get_cart(&self, user_id: i64) -> Result<Vec<CartItem>, ApiError> {
        let primary = self
            .api
            .get::<ApiResponse<Vec<CartItem>>>(&format!("/cart/{}", user_id), &[])
            .await;
        let response = match primary {
            Ok(response) => response,
            Err(e) => {
                debug!("Cart path /cart/{} failed, trying legacy path: {}", user_id, e);
                self.api
                    .get::<ApiResponse<Vec<CartItem>>>(&format!("/cart/user/{}", user_id), &[])
                    .await?
            }
        };
        response.into_data_or_default()
    }

    /// 服务端计算的购物车总额
    pub async fn get_cart_total(&self, user_id: i64) -> Result<f64, ApiError> {
        self.api
            .get::<ApiResponse<f64>>(&format!("/cart/user/{}/total", user_id), &[])
            .await?
            .into_data_or_default()
    }

    pub async fn get_cart_total_detailed(&self, user_id: i64) -> Result<CartTotalDetailed, ApiError> {
        self.api
            .get::<ApiResponse<CartTotalDetailed>>(&format!("/cart/user/{}/total-detailed", user_id), &[])
            .await?
            .into_data_or_default()
    }

    pub async fn add(&self, item: &AddToCart) -> Result<Value, ApiError> {
        self.api
            .post::<ApiResponse<Value>, _>("/cart", item)
            .await?
            .into_data_or_default()
    }

    pub async fn update_item(&self, cart_item_id: i64, quantity: u32) -> Result<Option<String>, ApiError> {
        self.api
            .put::<ApiResponse<Value>, _>(&format!("/cart/{}", cart_item_id), &json!({ "quantity": quantity }))
            .await?
            .into_message()
    }

    pub async fn remove_item(&self, cart_item_id: i64) -> Result<Option<String>, ApiError> {
        self.api
            .delete::<ApiResponse<Value>>(&format!("/cart/{}", cart_item_id))
            .await?
            .into_message()
    }

    pub async fn clear_cart(&self, user_id: i64) -> Result<Option<String>, ApiError> {
        self.api
            .delete::<ApiResponse<Value>>(&format!("/cart/user/{}", user_id))
            .await?
            .into_message()
    }
}
