// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

const CSV_HEADER: [&str; 6] = ["Ad", "Adres", "Şehir", "Telefon", "Web", "Konum"];

/// 抓取到的商户信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessData {
    pub name: String,
    pub phone: String,
    pub website: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_url: Option<String>,
}

/// 将抓取结果导出为CSV
///
/// 以UTF-8 BOM开头，所有字段加双引号，行之间以 `\n` 分隔
pub fn export_csv(rows: &[BusinessData]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(csv_line(CSV_HEADER.iter().copied()));
    for row in rows {
        lines.push(csv_line(
            [
                row.name.as_str(),
                row.address.as_str(),
                row.city.as_deref().unwrap_or(""),
                row.phone.as_str(),
                row.website.as_str(),
                row.location_url.as_deref().unwrap_or(""),
            ]
            .into_iter(),
        ));
    }

    format!("\u{feff}{}", lines.join("\n"))
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}
