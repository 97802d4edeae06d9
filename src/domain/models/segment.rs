// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 客户分群
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Segment {
    pub id: i64,
    pub name: String,
    pub count: u64,
    pub revenue: f64,
    pub color: String,
    pub criteria: String,
}

/// 分群表单
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentForm {
    pub name: String,
    pub criteria: String,
    pub color: String,
}
