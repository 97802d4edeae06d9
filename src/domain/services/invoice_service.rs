// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::invoice::{
    derive_invoice_number, BulkUploadReport, Invoice, InvoiceFilter, InvoiceUpload,
};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// 发票服务
pub struct InvoiceService {
    api: Arc<ApiClient>,
}

impl InvoiceService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, ApiError> {
        self.api
            .get::<ApiResponse<Vec<Invoice>>>("/admin/invoices", &filter.to_params())
            .await?
            .into_data_or_default()
    }

    pub async fn delete(&self, id: i64) -> Result<Option<String>, ApiError> {
        self.api
            .delete::<ApiResponse<Value>>(&format!("/admin/invoices/{}", id))
            .await?
            .into_message()
    }

    /// 上传单个PDF创建发票
    pub async fn upload(&self, file: &InvoiceUpload) -> Result<Option<String>, ApiError> {
        let form = invoice_form(file)?;
        self.api
            .upload::<Value>(Method::POST, "/admin/invoices", form)
            .await?
            .into_message()
    }

    /// 用新PDF替换已有发票
    pub async fn replace(&self, id: i64, file: &InvoiceUpload) -> Result<Option<String>, ApiError> {
        let form = invoice_form(file)?;
        self.api
            .upload::<Value>(Method::PUT, &format!("/admin/invoices/{}", id), form)
            .await?
            .into_message()
    }

    /// 逐个上传PDF，单个文件失败不影响其余文件
    pub async fn bulk_upload(&self, files: &[InvoiceUpload]) -> BulkUploadReport {
        let mut report = BulkUploadReport::default();
        for file in files {
            match self.upload(file).await {
                Ok(_) => report.uploaded += 1,
                Err(e) => {
                    warn!("Invoice upload failed for {}: {}", file.file_name, e);
                    report.errors.push(format!("{}: {}", file.file_name, e));
                }
            }
        }
        info!(
            "Bulk invoice upload finished: {} uploaded, {} failed",
            report.uploaded,
            report.errors.len()
        );
        report
    }
}

fn invoice_form(file: &InvoiceUpload) -> Result<Form, ApiError> {
    let now = Utc::now();
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str("application/pdf")?;

    Ok(Form::new()
        .text("invoiceNumber", derive_invoice_number(&file.file_name, now))
        .text("amount", "0")
        .text("totalAmount", "0")
        .text("currency", "TRY")
        .text("invoiceDate", now.format("%Y-%m-%d").to_string())
        .text("status", "draft")
        .part("file", part))
}
