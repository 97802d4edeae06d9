// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::backup::{FtpConfig, FtpTarget};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use serde_json::{json, Value};
use std::sync::Arc;

/// 备份服务
pub struct BackupService {
    api: Arc<ApiClient>,
}

impl BackupService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// 导出完整备份，原样返回响应JSON
    pub async fn export(&self) -> Result<Value, ApiError> {
        self.api.get("/admin/backup", &[]).await
    }

    /// 发起恢复请求
    pub async fn restore(&self, data: &Value) -> Result<Option<String>, ApiError> {
        self.api
            .post::<ApiResponse<Value>, _>("/admin/restore", &json!({ "data": data }))
            .await?
            .into_message()
    }

    pub async fn test_ftp(&self, target: &FtpTarget) -> Result<Option<String>, ApiError> {
        self.api
            .post::<ApiResponse<Value>, _>("/admin/ftp-backup/test", target)
            .await?
            .into_message()
    }

    /// 保存FTP配置后立即执行一次备份
    pub async fn save_and_run_ftp(&self, target: &FtpTarget) -> Result<Option<String>, ApiError> {
        self.api
            .post::<ApiResponse<Value>, _>(
                "/admin/ftp-backup/config",
                &FtpConfig {
                    enabled: true,
                    target,
                },
            )
            .await?
            .into_message()?;

        self.api
            .post::<ApiResponse<Value>, _>("/admin/ftp-backup/run", target)
            .await?
            .into_message()
    }
}
