// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::ApiError;
use serde::{Deserialize, Deserializer};

const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// 远程API的响应信封
///
/// 在边界处将 `{success, data?, message?}` 解析为判别联合，
/// `success` 缺失时按成功处理。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success {
        data: Option<T>,
        message: Option<String>,
    },
    Failure {
        message: String,
    },
}

#[derive(Deserialize)]
struct RawEnvelope<T> {
    success: Option<bool>,
    data: Option<T>,
    message: Option<String>,
    error: Option<String>,
}

impl<'de, T> Deserialize<'de> for ApiResponse<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Empty bodies (204) arrive as null
        let Some(raw) = Option::<RawEnvelope<T>>::deserialize(deserializer)? else {
            return Ok(ApiResponse::Success {
                data: None,
                message: None,
            });
        };
        if raw.success == Some(false) {
            let message = raw
                .message
                .or(raw.error)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            return Ok(ApiResponse::Failure { message });
        }

        Ok(ApiResponse::Success {
            data: raw.data,
            message: raw.message,
        })
    }
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiResponse::Success { message, .. } => message.as_deref(),
            ApiResponse::Failure { message } => Some(message),
        }
    }

    /// 转换为 `Result`，失败信封映射为 `ApiError::Application`
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        match self {
            ApiResponse::Success { data, .. } => Ok(data),
            ApiResponse::Failure { message } => Err(ApiError::Application(message)),
        }
    }

    /// 丢弃数据，仅保留成功消息
    pub fn into_message(self) -> Result<Option<String>, ApiError> {
        match self {
            ApiResponse::Success { message, .. } => Ok(message),
            ApiResponse::Failure { message } => Err(ApiError::Application(message)),
        }
    }

    /// 取出数据，成功但无数据时同样视为失败
    pub fn into_data(self) -> Result<T, ApiError> {
        match self {
            ApiResponse::Success { data: Some(data), .. } => Ok(data),
            ApiResponse::Success { data: None, message } => Err(ApiError::Application(
                message.unwrap_or_else(|| "Response contained no data".to_string()),
            )),
            ApiResponse::Failure { message } => Err(ApiError::Application(message)),
        }
    }
}

impl<T: Default> ApiResponse<T> {
    /// 取出数据，缺失时使用默认值
    pub fn into_data_or_default(self) -> Result<T, ApiError> {
        self.into_result().map(Option::unwrap_or_default)
    }
}
