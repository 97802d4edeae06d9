// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::presentation::middleware::rate_limit_middleware::RateLimitError;
use crate::utils::errors::{ApiError, BackupError, ScrapeError};

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<ApiError>() {
            return match err {
                ApiError::Validation(_) => StatusCode::BAD_REQUEST,
                ApiError::Transport(_) | ApiError::Http { .. } | ApiError::Application(_) => {
                    StatusCode::BAD_GATEWAY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
        }
        if let Some(err) = self.0.downcast_ref::<ScrapeError>() {
            return match err {
                ScrapeError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
        }
        if let Some(BackupError::InvalidFile(_)) = self.0.downcast_ref::<BackupError>() {
            return StatusCode::BAD_REQUEST;
        }
        if self.0.downcast_ref::<RateLimitError>().is_some() {
            return StatusCode::TOO_MANY_REQUESTS;
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
