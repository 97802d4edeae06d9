// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::ticimax::{TicimaxImportReport, TicimaxOrder, TicimaxOrderFilter};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use crate::utils::validators::sanitize_file_name;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

const EXCEL_EXTENSIONS: [&str; 2] = [".xls", ".xlsx"];

/// Ticimax订单服务
pub struct TicimaxService {
    api: Arc<ApiClient>,
}

impl TicimaxService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &TicimaxOrderFilter) -> Result<Vec<TicimaxOrder>, ApiError> {
        self.api
            .get::<ApiResponse<Vec<TicimaxOrder>>>("/admin/ticimax-orders", &filter.to_params())
            .await?
            .into_data_or_default()
    }

    pub async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        self.api
            .delete::<ApiResponse<Value>>(&format!("/admin/ticimax-orders/{}", id))
            .await?
            .into_message()
    }

    /// 导入Ticimax导出的Excel订单文件
    pub async fn import(&self, file_name: &str, bytes: Vec<u8>) -> Result<TicimaxImportReport, ApiError> {
        let lower = file_name.to_lowercase();
        if !EXCEL_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return Err(ApiError::Validation(
                "Lütfen Excel dosyası seçin (.xls veya .xlsx)".to_string(),
            ));
        }

        let part = Part::bytes(bytes).file_name(sanitize_file_name(file_name));
        let form = Form::new().part("file", part);
        self.api
            .upload::<TicimaxImportReport>(Method::POST, "/admin/ticimax-orders/import", form)
            .await?
            .into_data_or_default()
    }
}
