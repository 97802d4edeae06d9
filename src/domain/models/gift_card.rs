// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 礼品卡状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiftCardStatus {
    #[default]
    Active,
    Used,
    Expired,
    Cancelled,
}

/// 礼品卡
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GiftCard {
    pub id: i64,
    pub code: String,
    pub from_user_id: Option<i64>,
    pub recipient: Option<String>,
    pub recipient_user_id: Option<i64>,
    pub amount: f64,
    pub status: GiftCardStatus,
    pub expires_at: String,
    pub used_at: Option<String>,
}

/// 创建礼品卡表单
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardForm {
    pub code: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub expires_at: String,
}
