// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_response::ApiResponse;
use crate::domain::models::chatbot::{ChatbotMessage, Conversation};
use crate::infrastructure::api::ApiClient;
use crate::utils::errors::ApiError;
use serde_json::Value;
use std::sync::Arc;

/// 聊天机器人服务
pub struct ChatbotService {
    api: Arc<ApiClient>,
}

impl ChatbotService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        self.api
            .get::<ApiResponse<Vec<Conversation>>>("/admin/chatbot/conversations", &[])
            .await?
            .into_data_or_default()
    }

    pub async fn send(&self, message: &ChatbotMessage) -> Result<Value, ApiError> {
        self.api
            .post::<ApiResponse<Value>, _>("/chatbot/message", message)
            .await?
            .into_data_or_default()
    }
}
