// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 远程API调用错误类型
///
/// 分为传输层失败（网络错误、非2xx响应）和应用层失败（`{success:false}`）两类，
/// `Display` 输出即为直接展示给用户的消息。
#[derive(Error, Debug)]
pub enum ApiError {
    /// 网络或传输错误
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// 非2xx响应，消息取自服务端 `message` 字段，缺失时为 `HTTP <status>`
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 服务端返回 `success: false`
    #[error("{0}")]
    Application(String),

    /// 响应体解析失败
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// 无效的请求地址
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// 客户端校验失败
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// 根据状态码和响应体构造HTTP错误
    ///
    /// 响应体是包含 `message` 字段的JSON时使用该字段，否则回退为 `HTTP <status>`
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("HTTP {}", status));

        ApiError::Http { status, message }
    }

    /// 是否为传输层失败
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Http { .. })
    }

    /// HTTP状态码（如果有）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// 流式抓取错误类型
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// 搜索参数校验失败
    #[error("{0}")]
    Validation(String),

    /// 打开或读取流时的网络错误
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// 抓取端点返回非2xx
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 流中的 `error` 事件
    #[error("{0}")]
    Remote(String),
}

impl From<ApiError> for ScrapeError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(e) => ScrapeError::Transport(e),
            ApiError::Http { status, message } => ScrapeError::Http { status, message },
            ApiError::Validation(message) => ScrapeError::Validation(message),
            other => ScrapeError::Remote(other.to_string()),
        }
    }
}

/// 本地持久化存储错误类型
#[derive(Error, Debug)]
pub enum LocalStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 备份导出/恢复错误类型
#[derive(Error, Debug)]
pub enum BackupError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Geçersiz yedek dosyası: {0}")]
    InvalidFile(#[from] serde_json::Error),
}

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Internal error: {0}")]
    InternalError(String),
}
