// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 分析报表类型，对应 `/admin/analytics/{kind}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsReport {
    Overview,
    Users,
    Behavior,
    Funnel,
    Performance,
    Segments,
    Products,
    Timeseries,
    Characteristics,
    Export,
    Monthly,
    CustomerBehavior,
    CategoryPerformance,
    CustomerSegments,
    Conversion,
    TopCustomers,
}

impl AnalyticsReport {
    pub fn path(&self) -> &'static str {
        match self {
            AnalyticsReport::Overview => "overview",
            AnalyticsReport::Users => "users",
            AnalyticsReport::Behavior => "behavior",
            AnalyticsReport::Funnel => "funnel",
            AnalyticsReport::Performance => "performance",
            AnalyticsReport::Segments => "segments",
            AnalyticsReport::Products => "products",
            AnalyticsReport::Timeseries => "timeseries",
            AnalyticsReport::Characteristics => "characteristics",
            AnalyticsReport::Export => "export",
            AnalyticsReport::Monthly => "monthly",
            AnalyticsReport::CustomerBehavior => "customer-behavior",
            AnalyticsReport::CategoryPerformance => "category-performance",
            AnalyticsReport::CustomerSegments => "customer-segments",
            AnalyticsReport::Conversion => "conversion",
            AnalyticsReport::TopCustomers => "top-customers",
        }
    }

    pub fn endpoint(&self) -> String {
        format!("/admin/analytics/{}", self.path())
    }
}

/// 仪表盘汇总数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsStats {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub total_customers: u64,
    pub total_products: u64,
}

/// 漏斗步骤的原始计数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStepCount {
    pub name: String,
    pub count: u64,
}

/// 计算后的漏斗步骤
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStep {
    /// 从1开始的序号
    pub step: usize,
    pub name: String,
    pub count: u64,
    /// 相对上一步的转化率（百分比），第一步为100
    pub conversion_rate: f64,
    pub drop_off: i64,
    pub drop_off_rate: f64,
}

/// 计算漏斗各步骤的转化率和流失
///
/// 上一步计数为0时转化率记为100、流失率记为0
pub fn compute_funnel(steps: &[FunnelStepCount]) -> Vec<FunnelStep> {
    let mut previous: Option<u64> = None;
    steps
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (conversion_rate, drop_off, drop_off_rate) = match previous {
                Some(prev) if prev > 0 => {
                    let prev_f = prev as f64;
                    let diff = prev as i64 - s.count as i64;
                    (s.count as f64 / prev_f * 100.0, diff, diff as f64 / prev_f * 100.0)
                }
                Some(prev) => (100.0, prev as i64 - s.count as i64, 0.0),
                None => (100.0, 0, 0.0),
            };
            previous = Some(s.count);

            FunnelStep {
                step: i + 1,
                name: s.name.clone(),
                count: s.count,
                conversion_rate,
                drop_off,
                drop_off_rate,
            }
        })
        .collect()
}
