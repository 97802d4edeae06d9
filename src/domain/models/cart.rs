// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 购物车条目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartItem {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub image: String,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_string: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// 单个用户的购物车
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCart {
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub items: Vec<CartItem>,
    /// 取自 `/cart/user/{id}/total`，不在本地重新计算
    pub total: f64,
}

impl UserCart {
    /// 商品总件数（按数量累加）
    pub fn quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// 按姓名或邮箱匹配（不区分大小写）
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.user_name.to_lowercase().contains(&query)
            || self.user_email.to_lowercase().contains(&query)
    }
}

/// 购物车总览汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// 购物车行数之和
    pub total_items: usize,
    pub total_value: f64,
    pub active_users: usize,
}

impl CartSummary {
    pub fn from_carts(carts: &[UserCart]) -> Self {
        Self {
            total_items: carts.iter().map(|c| c.items.len()).sum(),
            total_value: carts.iter().map(|c| c.total).sum(),
            active_users: carts.len(),
        }
    }
}

/// 详细购物车金额
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartTotalDetailed {
    pub subtotal: f64,
    pub discount: f64,
    pub shipping: f64,
    pub total: f64,
}

/// 加入购物车请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}
