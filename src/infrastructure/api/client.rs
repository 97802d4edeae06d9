// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::audit_log::{AuditEntry, AuditLog};
use crate::config::settings::ApiSettings;
use crate::domain::models::api_response::ApiResponse;
use crate::infrastructure::local_store::{
    LocalStore, API_BASE_OVERRIDE_KEY, AUTH_TOKEN_KEY, TENANT_API_KEY,
};
use crate::utils::errors::ApiError;
use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, instrument};
use url::Url;

/// 查询参数，按顺序追加到URL
pub type QueryParams<'a> = &'a [(&'a str, String)];

const API_KEY_HEADER: &str = "X-API-Key";
const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// 远程REST API客户端
///
/// 每次调用只尝试一次，不重试、不设超时。所有JSON请求都会写入审计日志。
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    admin_key: Option<String>,
    auth_token: Option<String>,
    audit: Arc<AuditLog>,
}

impl ApiClient {
    /// 创建新的API客户端
    ///
    /// # 参数
    ///
    /// * `base_url` - API基础地址，末尾的 `/` 会被去除
    /// * `api_key` - 作为 `X-API-Key` 发送的租户密钥
    /// * `audit` - 请求审计日志
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, audit: Arc<AuditLog>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.filter(|k| !k.is_empty()),
            admin_key: None,
            auth_token: None,
            audit,
        }
    }

    /// 设置文件上传请求使用的管理员凭据
    pub fn with_admin_credentials(
        mut self,
        admin_key: Option<String>,
        auth_token: Option<String>,
    ) -> Self {
        self.admin_key = admin_key.filter(|k| !k.is_empty());
        self.auth_token = auth_token.filter(|t| !t.is_empty());
        self
    }

    /// 根据配置和本地存储创建客户端
    ///
    /// 本地存储中的 `API_BASE_OVERRIDE`、`TENANT_API_KEY` 和 `authToken`
    /// 优先于配置值
    pub fn from_settings(settings: &ApiSettings, store: &LocalStore, audit: Arc<AuditLog>) -> Self {
        let base_url = store
            .get_string(API_BASE_OVERRIDE_KEY)
            .unwrap_or_else(|| settings.base_url.clone());
        let api_key = store
            .get_string(TENANT_API_KEY)
            .or_else(|| settings.api_key.clone());
        let auth_token = store
            .get_string(AUTH_TOKEN_KEY)
            .or_else(|| settings.auth_token.clone());

        Self::new(base_url, api_key, audit)
            .with_admin_credentials(settings.admin_key.clone(), auth_token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn audit_log(&self) -> &Arc<AuditLog> {
        &self.audit
    }

    /// 拼接基础地址、端点和查询参数
    pub fn build_url(&self, endpoint: &str, params: QueryParams<'_>) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: QueryParams<'_>,
    ) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, params, None).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, endpoint, &[], Some(body)).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, endpoint, &[], Some(body)).await
    }

    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(Method::PATCH, endpoint, &[], Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, endpoint, &[], None).await
    }

    /// 发送JSON请求
    ///
    /// 非2xx响应转换为 `ApiError::Http`，消息优先使用服务端的 `message` 字段。
    /// 无论成功与否，完成的交换都会写入审计日志。
    #[instrument(skip(self, params, body), fields(method = %method))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: QueryParams<'_>,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint, params)?;
        debug!("API request: {} {}", method, url);

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        if let Some(body) = &body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("API request error: {} {}: {}", method, url, e);
                self.audit.record(AuditEntry {
                    method: method.to_string(),
                    url: url.to_string(),
                    status: 0,
                    ok: false,
                    time: Utc::now(),
                    request_body: body,
                    response_body: None,
                });
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("API response read error: {} {}: {}", method, url, e);
                return Err(ApiError::Transport(e));
            }
        };
        let parsed = parse_body(&bytes);

        self.audit.record(AuditEntry {
            method: method.to_string(),
            url: url.to_string(),
            status: status.as_u16(),
            ok: status.is_success(),
            time: Utc::now(),
            request_body: body,
            response_body: parsed.clone(),
        });

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), &bytes);
            error!("API request failed: {} {}: {}", method, url, err);
            return Err(err);
        }

        debug!("API response: {} {} -> {}", method, url, status);
        Ok(serde_json::from_value(parsed.unwrap_or(Value::Null))?)
    }

    /// 发送 `multipart/form-data` 请求
    ///
    /// 不经过JSON封装和审计日志，附带 `X-API-Key`、`X-Admin-Key` 和
    /// `Authorization: Bearer` 头。无论HTTP状态如何都解析响应信封。
    #[instrument(skip(self, form), fields(method = %method))]
    pub async fn upload<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        form: Form,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = self.build_url(endpoint, &[])?;
        debug!("API upload: {} {}", method, url);

        let mut builder = self
            .http
            .request(method, url.clone())
            .header(ACCEPT, "application/json")
            .multipart(form);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        if let Some(key) = &self.admin_key {
            builder = builder.header(ADMIN_KEY_HEADER, key);
        }
        if let Some(token) = &self.auth_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = builder.send().await.map_err(|e| {
            error!("API upload error: {}: {}", url, e);
            ApiError::Transport(e)
        })?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<ApiResponse<T>>(&bytes) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(ApiError::from_status(status.as_u16(), &bytes)),
            Err(e) => Err(ApiError::Decode(e)),
        }
    }
}

fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    )
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
