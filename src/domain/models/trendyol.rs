// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Trendyol商品分页
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrendyolProductPage {
    pub content: Vec<Value>,
    pub total_pages: u64,
    pub total_elements: u64,
}

/// Trendyol商品查询条件
#[derive(Debug, Clone, Default)]
pub struct TrendyolProductQuery {
    pub integration_id: i64,
    pub page: u32,
    pub size: u32,
    pub approved: Option<String>,
    pub on_sale: Option<String>,
    pub rejected: Option<String>,
    pub blacklisted: Option<String>,
    pub archived: Option<String>,
    pub barcode: Option<String>,
    pub stock_code: Option<String>,
    pub product_main_id: Option<String>,
}

impl TrendyolProductQuery {
    pub fn new(integration_id: i64, page: u32) -> Self {
        Self {
            integration_id,
            page,
            size: 10,
            ..Default::default()
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("integrationId", self.integration_id.to_string()),
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ];
        let optional = [
            ("approved", &self.approved),
            ("onSale", &self.on_sale),
            ("rejected", &self.rejected),
            ("blacklisted", &self.blacklisted),
            ("archived", &self.archived),
            ("barcode", &self.barcode),
            ("stockCode", &self.stock_code),
            ("productMainId", &self.product_main_id),
        ];
        for (key, value) in optional {
            if let Some(v) = value.as_ref().filter(|v| !v.is_empty()) {
                params.push((key, v.clone()));
            }
        }
        params
    }
}
