// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::session::ScrapeSearch;
use crate::utils::errors::{ApiError, ScrapeError};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, instrument};

/// 抓取响应体的字节流
pub type ByteStream = BoxStream<'static, Result<Bytes, ScrapeError>>;

/// 抓取流的来源
#[async_trait]
pub trait ScrapeStreamSource: Send + Sync {
    /// 提交搜索并返回响应体字节流
    async fn open(&self, search: &ScrapeSearch) -> Result<ByteStream, ScrapeError>;
}

/// 通过HTTP POST打开抓取流
pub struct HttpScrapeSource {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpScrapeSource {
    /// 创建新的HTTP抓取源
    ///
    /// # 参数
    ///
    /// * `url` - 流式抓取端点的完整地址
    /// * `api_key` - 可选的 `X-API-Key`
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }
}

#[async_trait]
impl ScrapeStreamSource for HttpScrapeSource {
    #[instrument(skip(self, search), fields(term = %search.search_term))]
    async fn open(&self, search: &ScrapeSearch) -> Result<ByteStream, ScrapeError> {
        debug!("Opening scrape stream at {}", self.url);

        let mut builder = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/event-stream")
            .json(search);
        if let Some(key) = &self.api_key {
            builder = builder.header("X-API-Key", key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body).into());
        }

        Ok(response.bytes_stream().map_err(ScrapeError::from).boxed())
    }
}
