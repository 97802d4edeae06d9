// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 第三方集成配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Integration {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub provider: String,
    pub status: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub webhook_url: Option<String>,
    pub config: Option<Value>,
    pub last_test: Option<String>,
    pub test_result: Option<String>,
    pub description: Option<String>,
}

/// 集成创建/更新表单
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationForm {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 提交时总是 `active`
    pub status: String,
}

impl IntegrationForm {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            provider: provider.into(),
            status: "active".to_string(),
            ..Default::default()
        }
    }
}

/// 订单同步结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncReport {
    pub synced: u64,
    pub skipped: u64,
    pub total: u64,
    pub errors: Vec<Value>,
}

/// 集成监视器快照
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationHealth {
    pub integrations: Vec<Integration>,
    pub total: usize,
    pub active: usize,
    pub warning: usize,
    pub errored: usize,
    /// 其余状态都计为未启用
    pub inactive: usize,
    pub last_update: DateTime<Utc>,
}

impl IntegrationHealth {
    pub fn from_integrations(integrations: Vec<Integration>, now: DateTime<Utc>) -> Self {
        let count = |status: &str| integrations.iter().filter(|i| i.status == status).count();
        let active = count("active");
        let warning = count("warning");
        let errored = count("error");
        let total = integrations.len();

        Self {
            total,
            active,
            warning,
            errored,
            inactive: total - active - warning - errored,
            integrations,
            last_update: now,
        }
    }

    pub fn empty(now: DateTime<Utc>) -> Self {
        Self::from_integrations(Vec::new(), now)
    }

    pub fn has_problems(&self) -> bool {
        self.warning > 0 || self.errored > 0
    }
}
