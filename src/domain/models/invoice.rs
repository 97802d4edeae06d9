// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_ALNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("valid invoice number regex"));

/// 发票
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub order_id: Option<i64>,
    pub amount: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub currency: String,
    pub invoice_date: String,
    pub due_date: Option<String>,
    pub status: String,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub share_token: Option<String>,
    pub share_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 发票列表筛选条件
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl InvoiceFilter {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status.as_ref().filter(|s| !s.is_empty()) {
            params.push(("status", status.clone()));
        }
        if let Some(search) = self.search.as_ref().filter(|s| !s.is_empty()) {
            params.push(("search", search.clone()));
        }
        params
    }
}

/// 待上传的发票PDF
#[derive(Debug, Clone)]
pub struct InvoiceUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 批量上传结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkUploadReport {
    pub uploaded: usize,
    /// 每个失败文件一条 `文件名: 错误`
    pub errors: Vec<String>,
}

impl BulkUploadReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// 由文件名推导发票号
///
/// 去掉 `.pdf` 扩展名，非字母数字字符替换为 `-`；结果为空时使用 `FAT-<毫秒时间戳>`
pub fn derive_invoice_number(file_name: &str, now: DateTime<Utc>) -> String {
    let split = file_name.len().saturating_sub(4);
    let stem = match file_name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => &file_name[..split],
        _ => file_name,
    };
    let number = NON_ALNUM_RE.replace_all(stem, "-").into_owned();
    if number.is_empty() {
        format!("FAT-{}", now.timestamp_millis())
    } else {
        number
    }
}
