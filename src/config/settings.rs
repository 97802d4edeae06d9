// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含远程API、本地存储、轮询、抓取流、服务器和报价表单等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 远程API配置
    pub api: ApiSettings,
    /// 本地持久化配置
    pub storage: StorageSettings,
    /// 轮询配置
    pub polling: PollingSettings,
    /// 抓取流配置
    pub scraper: ScraperSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 报价表单配置
    pub quote: QuoteSettings,
}

/// 远程API配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// API基础地址（包含 `/api` 前缀）
    pub base_url: String,
    /// 租户API密钥，作为 `X-API-Key` 发送
    pub api_key: Option<String>,
    /// 管理员密钥，仅用于文件上传请求
    pub admin_key: Option<String>,
    /// 会话令牌，仅用于文件上传请求
    pub auth_token: Option<String>,
}

/// 本地持久化配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 本地键值存储文件路径，未设置时仅保存在内存中
    pub local_store_path: Option<String>,
    /// 请求审计日志的最大条数
    pub audit_log_capacity: usize,
}

/// 轮询配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct PollingSettings {
    /// 是否启动轮询监视器
    pub enabled: bool,
    /// 启动时是否开启自动刷新
    pub auto_refresh: bool,
    /// 在线用户刷新间隔（秒）
    pub live_users_interval_secs: u64,
    /// 集成监视器刷新间隔（秒）
    pub integration_monitor_interval_secs: u64,
}

impl PollingSettings {
    pub fn live_users_interval(&self) -> Duration {
        Duration::from_secs(self.live_users_interval_secs.max(1))
    }

    pub fn integration_monitor_interval(&self) -> Duration {
        Duration::from_secs(self.integration_monitor_interval_secs.max(1))
    }
}

/// 抓取流配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 流式抓取端点的完整URL
    pub stream_url: String,
    /// 完成后进度信息的展示时长（秒）
    pub completion_display_secs: u64,
}

impl ScraperSettings {
    pub fn completion_display_delay(&self) -> Duration {
        Duration::from_secs(self.completion_display_secs)
    }
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 报价表单配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSettings {
    /// 每个时间窗口内单个IP允许的请求数
    pub max_requests_per_window: u32,
    /// 时间窗口长度（秒）
    pub window_secs: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `PANELRS__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PANELRS").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅使用默认值和显式覆盖项创建配置，不读取文件和环境变量
    pub fn with_overrides(overrides: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        builder.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            // Default API settings
            .set_default("api.base_url", "https://api.zerodaysoftware.tr/api")?
            // Default Storage settings
            .set_default("storage.audit_log_capacity", 200)?
            // Default Polling settings
            .set_default("polling.enabled", true)?
            .set_default("polling.auto_refresh", true)?
            .set_default("polling.live_users_interval_secs", 5)?
            .set_default("polling.integration_monitor_interval_secs", 5)?
            // Default Scraper settings
            .set_default(
                "scraper.stream_url",
                "http://localhost:3000/api/google-maps-scrape",
            )?
            .set_default("scraper.completion_display_secs", 3)?
            // Default server settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default Quote settings
            .set_default("quote.max_requests_per_window", 5)?
            .set_default("quote.window_secs", 60 * 60)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
