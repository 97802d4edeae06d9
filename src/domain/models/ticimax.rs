// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// Ticimax订单行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicimaxOrderItem {
    pub id: i64,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
    pub product_sku: Option<String>,
}

/// 从Ticimax导入的订单
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicimaxOrder {
    pub id: i64,
    pub external_order_id: String,
    pub order_number: Option<String>,
    pub total_amount: f64,
    pub status: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub full_address: Option<String>,
    pub cargo_provider_name: Option<String>,
    pub cargo_tracking_number: Option<String>,
    pub barcode: Option<String>,
    pub order_date: Option<String>,
    pub created_at: String,
    pub items: Vec<TicimaxOrderItem>,
}

/// Ticimax订单筛选条件
#[derive(Debug, Clone, Default)]
pub struct TicimaxOrderFilter {
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TicimaxOrderFilter {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        [
            ("status", &self.status),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.as_ref().filter(|v| !v.is_empty()).map(|v| (k, v.clone())))
        .collect()
    }
}

/// 待导入的Excel文件
#[derive(Debug, Clone)]
pub struct TicimaxImportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Excel导入结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicimaxImportReport {
    pub imported: u64,
    pub skipped: u64,
    pub errors: Vec<String>,
}

impl TicimaxImportReport {
    /// 用户可见的摘要，如 `12 sipariş başarıyla yüklendi, 2 sipariş atlandı`
    pub fn summary(&self) -> String {
        if self.skipped > 0 {
            format!(
                "{} sipariş başarıyla yüklendi, {} sipariş atlandı",
                self.imported, self.skipped
            )
        } else {
            format!("{} sipariş başarıyla yüklendi", self.imported)
        }
    }
}
