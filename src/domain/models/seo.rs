// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// SEO分析结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoAnalysis {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub h1_count: u32,
    pub h1_tags: Vec<String>,
    pub h2_count: u32,
    pub h2_tags: Vec<String>,
    pub images_count: u32,
    pub images_without_alt: u32,
    pub links_count: u32,
    pub internal_links: u32,
    pub external_links: u32,
    pub canonical_url: String,
    pub robots: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_type: String,
    pub schema_markup: bool,
    pub mobile_friendly: bool,
    pub load_time: Option<f64>,
    pub status_code: u16,
    pub word_count: u64,
    pub issues: Vec<String>,
    pub score: u32,
}

/// 规范化待分析的URL
///
/// 去除首尾空白，没有 `http://` 或 `https://` 前缀时补上 `https://`；输入为空返回 `None`
pub fn normalize_url(input: &str) -> Option<String> {
    let url = input.trim();
    if url.is_empty() {
        return None;
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Some(url.to_string())
    } else {
        Some(format!("https://{}", url))
    }
}
