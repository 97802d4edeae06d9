// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::analytics::{
    compute_funnel, AnalyticsReport, AnalyticsStats, FunnelStep, FunnelStepCount,
};
use crate::domain::models::api_response::ApiResponse;
use crate::infrastructure::api::{ApiClient, QueryParams};
use crate::utils::errors::ApiError;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// 分析服务
pub struct AnalyticsService {
    api: Arc<ApiClient>,
}

impl AnalyticsService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// 获取任意分析报表
    pub async fn report(&self, report: AnalyticsReport, params: QueryParams<'_>) -> Result<Value, ApiError> {
        self.api
            .get::<ApiResponse<Value>>(&report.endpoint(), params)
            .await?
            .into_data_or_default()
    }

    /// 仪表盘汇总
    ///
    /// 并发读取订单和用户列表；管理端点不可用时返回全零
    pub async fn stats(&self) -> AnalyticsStats {
        let paging = [("page", "1".to_string()), ("limit", "1000".to_string())];
        let (orders, users) = tokio::join!(
            self.api.get::<ApiResponse<Vec<Value>>>("/admin/orders", &paging),
            self.api.get::<ApiResponse<Vec<Value>>>("/admin/users", &paging),
        );

        let (orders, users) = match (orders, users) {
            (Ok(orders), Ok(users)) => (orders, users),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Dashboard stats unavailable: {}", e);
                return AnalyticsStats::default();
            }
        };

        let mut stats = AnalyticsStats::default();
        if let Ok(Some(orders)) = orders.into_result() {
            stats.total_orders = orders.len() as u64;
            stats.total_revenue = orders.iter().map(order_amount).sum();
        }
        if let Ok(Some(users)) = users.into_result() {
            stats.total_customers = users.len() as u64;
        }
        stats
    }

    /// 获取漏斗步骤计数并计算转化率
    pub async fn funnel(&self, params: QueryParams<'_>) -> Result<Vec<FunnelStep>, ApiError> {
        let counts = self
            .api
            .get::<ApiResponse<Vec<FunnelStepCount>>>(&AnalyticsReport::Funnel.endpoint(), params)
            .await?
            .into_data_or_default()?;
        Ok(compute_funnel(&counts))
    }
}

fn order_amount(order: &Value) -> f64 {
    match order.get("totalAmount") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
