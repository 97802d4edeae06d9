// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::quote::QuoteRequest;
use crate::presentation::middleware::rate_limit_middleware::{client_ip, RateLimitError};
use crate::presentation::routes::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

const QUOTE_RECEIVED_MESSAGE: &str =
    "Teklifiniz başarıyla alındı. En kısa sürede size dönüş yapacağız.";

/// 报价请求错误类型
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    /// 蜜罐字段被填写
    #[error("Invalid request.")]
    Honeypot,

    #[error("{0}")]
    Validation(&'static str),

    #[error("Bir hata oluştu. Lütfen daha sonra tekrar deneyin.")]
    Malformed(#[from] serde_json::Error),
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        let status = match &self {
            QuoteError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            QuoteError::Honeypot | QuoteError::Validation(_) => StatusCode::BAD_REQUEST,
            QuoteError::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// 提交报价请求
///
/// 依次执行：按IP限流、解析请求体、蜜罐检查、字段校验、清理输入
pub async fn submit_quote(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, QuoteError> {
    let ip = client_ip(&headers);
    if let Err(e) = state.rate_limiter.check(&ip) {
        warn!("Quote rate limit hit for {}", ip);
        return Err(e.into());
    }

    let request: QuoteRequest = serde_json::from_slice(&body).map_err(|e| {
        error!("Unreadable quote request: {}", e);
        QuoteError::from(e)
    })?;

    if request.is_bot() {
        warn!("Honeypot filled, rejecting quote from {}", ip);
        return Err(QuoteError::Honeypot);
    }
    request.validate().map_err(QuoteError::Validation)?;

    let quote = request.sanitize();
    info!(
        reference = %Uuid::new_v4(),
        email = %quote.email,
        product_type = %quote.product_type,
        quantity = quote.quantity,
        ip = %ip,
        timestamp = %Utc::now().to_rfc3339(),
        "Quote request received"
    );

    Ok(Json(json!({
        "success": true,
        "message": QUOTE_RECEIVED_MESSAGE,
    })))
}
