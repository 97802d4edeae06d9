// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 在线用户会话
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveUser {
    pub id: String,
    pub user_id: Option<i64>,
    pub session_id: String,
    pub ip_address: String,
    pub country: String,
    pub city: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub user_agent: String,
    pub device: String,
    pub browser: String,
    pub os: String,
    pub last_activity: String,
    pub is_active: bool,
    pub page: String,
    /// 会话时长（秒）
    pub duration: u64,
    pub referrer: Option<String>,
}

/// 在线用户筛选条件
#[derive(Debug, Clone, Default)]
pub struct LiveUserFilter {
    /// 匹配IP、城市或国家（不区分大小写）
    pub search: String,
    pub country: Option<String>,
    pub device: Option<String>,
}

impl LiveUserFilter {
    pub fn matches(&self, user: &LiveUser) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = user.ip_address.to_lowercase().contains(&search)
            || user.city.to_lowercase().contains(&search)
            || user.country.to_lowercase().contains(&search);
        let matches_country = self
            .country
            .as_ref()
            .filter(|c| !c.is_empty())
            .map_or(true, |c| &user.country == c);
        let matches_device = self
            .device
            .as_ref()
            .filter(|d| !d.is_empty())
            .map_or(true, |d| &user.device == d);

        matches_search && matches_country && matches_device
    }
}

/// 在线用户快照
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveUsersSnapshot {
    pub users: Vec<LiveUser>,
    pub last_update: DateTime<Utc>,
}

impl LiveUsersSnapshot {
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            users: Vec::new(),
            last_update: now,
        }
    }

    pub fn filtered(&self, filter: &LiveUserFilter) -> Vec<&LiveUser> {
        self.users.iter().filter(|u| filter.matches(u)).collect()
    }

    /// 去重排序后的国家列表
    pub fn countries(&self) -> Vec<String> {
        self.users
            .iter()
            .map(|u| u.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 去重排序后的设备列表
    pub fn devices(&self) -> Vec<String> {
        self.users
            .iter()
            .map(|u| u.device.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// 格式化会话时长，如 `1s 2d 5sn`、`3d 0sn`、`42sn`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}s {}d {}sn", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}d {}sn", minutes, secs)
    } else {
        format!("{}sn", secs)
    }
}
