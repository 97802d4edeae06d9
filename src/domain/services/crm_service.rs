// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::api::{ApiClient, QueryParams};
use crate::utils::errors::ApiError;
use serde_json::Value;
use std::sync::Arc;

/// CRM资源集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrmCollection {
    Leads,
    Contacts,
    Opportunities,
    Activities,
}

impl CrmCollection {
    pub fn endpoint(&self) -> &'static str {
        match self {
            CrmCollection::Leads => "/admin/leads",
            CrmCollection::Contacts => "/admin/contacts",
            CrmCollection::Opportunities => "/admin/opportunities",
            CrmCollection::Activities => "/admin/activities",
        }
    }
}

/// CRM服务
///
/// 响应结构由后端决定，原样返回JSON
pub struct CrmService {
    api: Arc<ApiClient>,
}

impl CrmService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self, collection: CrmCollection, params: QueryParams<'_>) -> Result<Value, ApiError> {
        self.api.get(collection.endpoint(), params).await
    }

    pub async fn create(&self, collection: CrmCollection, payload: &Value) -> Result<Value, ApiError> {
        self.api.post(collection.endpoint(), payload).await
    }

    pub async fn pipeline(&self, params: QueryParams<'_>) -> Result<Value, ApiError> {
        self.api.get("/admin/pipeline", params).await
    }
}
