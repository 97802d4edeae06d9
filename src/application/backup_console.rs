// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::crud_controller::Banner;
use crate::domain::models::backup::FtpTarget;
use crate::domain::services::backup_service::BackupService;
use crate::utils::errors::BackupError;
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// 本次会话中创建的备份文件
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    pub path: PathBuf,
    pub size_kb: u64,
    pub created_at: DateTime<Utc>,
}

/// 备份与恢复操作
///
/// 服务端没有备份列表接口，只记录本次会话中导出的文件
pub struct BackupConsole {
    service: Arc<BackupService>,
    dir: PathBuf,
    history: RwLock<Vec<BackupRecord>>,
}

impl BackupConsole {
    pub fn new(service: Arc<BackupService>, dir: impl Into<PathBuf>) -> Self {
        Self {
            service,
            dir: dir.into(),
            history: RwLock::new(Vec::new()),
        }
    }

    /// 最新的在前
    pub fn history(&self) -> Vec<BackupRecord> {
        self.history.read().clone()
    }

    /// 导出完整备份并写入 `backup-<时间戳>.json`
    #[instrument(skip(self))]
    pub async fn create_backup(&self) -> Result<BackupRecord, BackupError> {
        let data = self.service.export().await?;
        let json = serde_json::to_string_pretty(&data)?;

        let now = Utc::now();
        let stamp = now
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(format!("backup-{}.json", stamp));
        tokio::fs::write(&path, json.as_bytes()).await?;

        let record = BackupRecord {
            path,
            size_kb: (json.len() as u64 / 1024).max(1),
            created_at: now,
        };
        info!("Backup written to {}", record.path.display());
        self.history.write().insert(0, record.clone());
        Ok(record)
    }

    /// 从备份文件恢复
    ///
    /// 文件可以是导出的完整响应，也可以只包含 `data`
    #[instrument(skip(self))]
    pub async fn restore_from_file(&self, path: &Path) -> Result<Option<String>, BackupError> {
        let bytes = tokio::fs::read(path).await?;
        let value: Value = serde_json::from_slice(&bytes)?;
        let data = match value {
            Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or_default(),
            other => other,
        };
        Ok(self.service.restore(&data).await?)
    }

    pub async fn backup_banner(&self) -> Banner {
        match self.create_backup().await {
            Ok(record) => Banner::Success(format!("Yedek oluşturuldu ({} KB)", record.size_kb)),
            Err(e) => {
                error!("Backup failed: {}", e);
                Banner::Error(e.to_string())
            }
        }
    }

    pub async fn test_ftp(&self, target: &FtpTarget) -> Banner {
        match self.service.test_ftp(target).await {
            Ok(message) => Banner::Success(message.unwrap_or_else(|| "FTP bağlantısı başarılı".to_string())),
            Err(e) => Banner::Error(e.to_string()),
        }
    }

    /// 保存FTP配置并立即执行一次备份
    pub async fn save_and_run_ftp(&self, target: &FtpTarget) -> Banner {
        if target.host.trim().is_empty() || target.user.trim().is_empty() {
            return Banner::Error("Lütfen FTP bilgilerini doldurun".to_string());
        }
        match self.service.save_and_run_ftp(target).await {
            Ok(message) => {
                info!("FTP backup triggered on {}", target.host);
                Banner::Success(message.unwrap_or_else(|| "FTP yedeği başlatıldı".to_string()))
            }
            Err(e) => {
                error!("FTP backup failed: {}", e);
                Banner::Error(e.to_string())
            }
        }
    }
}
