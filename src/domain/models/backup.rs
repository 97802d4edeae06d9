// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

const DEFAULT_FTP_PORT: u16 = 21;

/// FTP备份目标
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FtpTarget {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub remote_dir: String,
}

impl FtpTarget {
    /// 端口为空或无法解析时使用21
    pub fn new(
        host: impl Into<String>,
        port: &str,
        user: impl Into<String>,
        password: impl Into<String>,
        remote_dir: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: port
                .trim()
                .parse()
                .ok()
                .filter(|p| *p != 0)
                .unwrap_or(DEFAULT_FTP_PORT),
            user: user.into(),
            password: password.into(),
            remote_dir: remote_dir.into(),
        }
    }
}

/// 保存FTP配置时的请求体
#[derive(Debug, Clone, Serialize)]
pub struct FtpConfig<'a> {
    pub enabled: bool,
    #[serde(flatten)]
    pub target: &'a FtpTarget,
}
