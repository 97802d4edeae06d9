// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 客服会话
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conversation {
    pub id: Value,
    pub user_name: String,
    pub last_message: String,
    pub unread: u32,
    pub status: String,
    pub updated_at: Option<String>,
}

/// 发送给聊天机器人的消息
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotMessage {
    pub message: String,
    pub action_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl ChatbotMessage {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action_type: "text".to_string(),
            product_id: None,
            user_id: None,
        }
    }
}
