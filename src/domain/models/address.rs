// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 地址类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    #[default]
    Shipping,
    Billing,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Shipping => "shipping",
            AddressType::Billing => "billing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AddressType::Shipping => "Teslimat Adresi",
            AddressType::Billing => "Fatura Adresi",
        }
    }
}

/// 用户地址
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub address_type: AddressType,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// 地址表单
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressForm {
    pub address_type: AddressType,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl AddressForm {
    /// 检查必填字段，返回第一个缺失字段的提示
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            (self.full_name.as_str(), "Ad soyad gerekli"),
            (self.phone.as_str(), "Telefon gerekli"),
            (self.address.as_str(), "Adres gerekli"),
            (self.city.as_str(), "Şehir gerekli"),
        ]
        .into_iter()
        .find(|(value, _)| value.trim().is_empty())
        .map(|(_, message)| message)
    }
}

/// 创建地址时的请求体：`userId` 与表单字段平铺
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress<'a> {
    pub user_id: i64,
    #[serde(flatten)]
    pub form: &'a AddressForm,
}
