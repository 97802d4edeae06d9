// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::address::{Address, AddressForm, AddressType, NewAddress};
use crate::domain::models::api_response::ApiResponse;
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedAddress {
    address_id: Option<i64>,
}

/// 创建地址的结果
#[derive(Debug, Clone, PartialEq)]
pub struct AddressCreated {
    pub message: String,
    pub address_id: Option<i64>,
}

/// 用户地址服务
pub struct AddressService {
    api: Arc<ApiClient>,
}

impl AddressService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self, user_id: i64, address_type: Option<AddressType>) -> Result<Vec<Address>, ApiError> {
        let mut params = vec![("userId", user_id.to_string())];
        if let Some(kind) = address_type {
            params.push(("addressType", kind.as_str().to_string()));
        }
        self.api
            .get::<ApiResponse<Vec<Address>>>("/user-addresses", &params)
            .await?
            .into_data_or_default()
    }

    pub async fn create(&self, user_id: i64, form: &AddressForm) -> Result<AddressCreated, ApiError> {
        let response = self
            .api
            .post::<ApiResponse<CreatedAddress>, _>("/user-addresses", &NewAddress { user_id, form })
            .await?;
        let message = response
            .message()
            .unwrap_or("Adres kaydedildi")
            .to_string();
        let created = response.into_data_or_default()?;

        Ok(AddressCreated {
            message,
            address_id: created.address_id,
        })
    }

    pub async fn update(&self, id: i64, form: &AddressForm) -> Result<String, ApiError> {
        let message = self
            .api
            .put::<ApiResponse<Value>, _>(&format!("/user-addresses/{}", id), form)
            .await?
            .into_message()?;
        Ok(message.unwrap_or_else(|| "Adres güncellendi".to_string()))
    }

    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let message = self
            .api
            .delete::<ApiResponse<Value>>(&format!("/user-addresses/{}", id))
            .await?
            .into_message()?;
        Ok(message.unwrap_or_else(|| "Adres silindi".to_string()))
    }

    pub async fn set_default(&self, id: i64) -> Result<String, ApiError> {
        let message = self
            .api
            .request::<ApiResponse<Value>>(
                Method::PUT,
                &format!("/user-addresses/{}/set-default", id),
                &[],
                None,
            )
            .await?
            .into_message()?;
        Ok(message.unwrap_or_else(|| "Varsayılan adres ayarlandı".to_string()))
    }
}
