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

use axum::http::HeaderMap;
use dashmap::DashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

/// 速率限制错误类型
#[derive(Error, Debug)]
pub enum RateLimitError {
    /// 请求过多错误
    #[error("Çok fazla istek gönderdiniz. Lütfen 1 saat sonra tekrar deneyin.")]
    TooManyRequests,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// 按客户端IP的固定窗口速率限制器
///
/// 窗口从该IP的第一次请求开始计时，窗口内超出 `limit` 的请求被拒绝
pub struct RateLimiter {
    windows: DashMap<String, Window>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    /// 创建新的速率限制器实例
    ///
    /// # 参数
    ///
    /// * `limit` - 每个窗口允许的请求数
    /// * `window` - 窗口长度
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            limit,
            window,
        }
    }

    /// 检查并记录一次请求
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 请求未超出限制
    /// * `Err(RateLimitError)` - 请求超出限制
    pub fn check(&self, client: &str) -> Result<(), RateLimitError> {
        let now = Instant::now();
        let mut entry = self.windows.entry(client.to_string()).or_insert(Window {
            count: 0,
            reset_at: now + self.window,
        });

        if now > entry.reset_at {
            *entry = Window {
                count: 1,
                reset_at: now + self.window,
            };
            return Ok(());
        }

        if entry.count >= self.limit {
            debug!("Rate limit exceeded for {}", client);
            return Err(RateLimitError::TooManyRequests);
        }

        entry.count += 1;
        Ok(())
    }

    /// 清除已过期的窗口
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.windows.retain(|_, w| w.reset_at >= now);
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

/// 客户端标识：`x-forwarded-for`，其次 `x-real-ip`，否则为 `unknown`
pub fn client_ip(headers: &HeaderMap) -> String {
    ["x-forwarded-for", "x-real-ip"]
        .iter()
        .find_map(|name| {
            headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "unknown".to_string())
}
