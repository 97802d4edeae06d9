// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::validators::{
    sanitize_input, validate_email, validate_name, validate_phone, validate_quantity,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 报价请求表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub product_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub quantity: String,
    #[serde(deserialize_with = "lenient_string")]
    pub fabric: String,
    #[serde(deserialize_with = "lenient_string")]
    pub color: String,
    #[serde(deserialize_with = "lenient_string")]
    pub size: String,
    pub logo: Value,
    pub embroidery: Value,
    pub urgent_order: Value,
    #[serde(deserialize_with = "lenient_string")]
    pub delivery_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub notes: String,
    /// 蜜罐字段，真实用户不会填写
    pub honeypot: Value,
}

/// 清理后的报价请求
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedQuote {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub product_type: String,
    pub quantity: u64,
    pub fabric: String,
    pub color: String,
    pub size: String,
    pub logo: bool,
    pub embroidery: bool,
    pub urgent_order: bool,
    pub delivery_date: String,
    pub notes: String,
}

/// 字符串原样保留，数字转为字符串，其余（包括 `null`）视为空
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl QuoteRequest {
    pub fn is_bot(&self) -> bool {
        truthy(&self.honeypot)
    }

    /// 按顺序校验字段，返回第一个错误消息
    pub fn validate(&self) -> Result<(), &'static str> {
        if !validate_name(&self.name) {
            return Err("Geçersiz ad soyad.");
        }
        if !validate_email(self.email.trim()) {
            return Err("Geçersiz e-posta adresi.");
        }
        if !validate_phone(&self.phone) {
            return Err("Geçersiz telefon numarası.");
        }
        if self.product_type.trim().is_empty() {
            return Err("Ürün tipi seçilmelidir.");
        }
        if !validate_quantity(&self.quantity) {
            return Err("Geçersiz adet.");
        }
        Ok(())
    }

    /// 清理所有字符串字段，须在 `validate` 通过后调用
    pub fn sanitize(&self) -> SanitizedQuote {
        SanitizedQuote {
            name: sanitize_input(&self.name),
            company: sanitize_input(&self.company),
            email: sanitize_input(&self.email),
            phone: sanitize_input(&self.phone),
            product_type: sanitize_input(&self.product_type),
            quantity: self.quantity.trim().parse().unwrap_or_default(),
            fabric: sanitize_input(&self.fabric),
            color: sanitize_input(&self.color),
            size: sanitize_input(&self.size),
            logo: truthy(&self.logo),
            embroidery: truthy(&self.embroidery),
            urgent_order: truthy(&self.urgent_order),
            delivery_date: sanitize_input(&self.delivery_date),
            notes: sanitize_input(&self.notes),
        }
    }
}
