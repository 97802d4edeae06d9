// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::business::BusinessData;
use serde::Deserialize;

/// 抓取流中的事件，以 `type` 字段区分
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScrapeEvent {
    /// 仅更新进度
    #[serde(rename_all = "camelCase")]
    Status {
        #[serde(default)]
        current: u64,
        #[serde(default)]
        total: u64,
        #[serde(default, alias = "status")]
        message: String,
        #[serde(default)]
        total_found: u64,
    },

    /// 一条商户记录
    #[serde(rename_all = "camelCase")]
    Result {
        #[serde(alias = "business")]
        data: BusinessData,
        #[serde(default)]
        current: Option<u64>,
        #[serde(default)]
        total: Option<u64>,
    },

    /// 抓取结束
    #[serde(rename_all = "camelCase")]
    Complete {
        #[serde(default)]
        total_found: u64,
        #[serde(default)]
        message: Option<String>,
    },

    /// 服务端报告的失败
    Error {
        #[serde(default)]
        message: String,
    },
}
