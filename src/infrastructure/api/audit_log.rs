// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::local_store::{LocalStore, API_LOGS_KEY};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;

/// 默认保留的审计条目数
pub const DEFAULT_AUDIT_CAPACITY: usize = 200;

/// 单次请求/响应的审计记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub method: String,
    pub url: String,
    /// 响应状态码，传输失败时为0
    pub status: u16,
    pub ok: bool,
    pub time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<Value>,
}

/// 请求审计日志
///
/// 最新条目在前，超过容量的旧条目被丢弃。每次写入后持久化到本地存储的
/// `apiLogs` 键，并广播给订阅者。
pub struct AuditLog {
    capacity: usize,
    entries: RwLock<VecDeque<AuditEntry>>,
    store: Arc<LocalStore>,
    notifier: broadcast::Sender<AuditEntry>,
}

impl AuditLog {
    /// 创建审计日志并加载已持久化的条目
    pub fn new(store: Arc<LocalStore>, capacity: usize) -> Self {
        let mut entries: VecDeque<AuditEntry> = store
            .get::<Vec<AuditEntry>>(API_LOGS_KEY)
            .unwrap_or_default()
            .into();
        entries.truncate(capacity);
        let (notifier, _) = broadcast::channel(64);

        Self {
            capacity,
            entries: RwLock::new(entries),
            store,
            notifier,
        }
    }

    /// 记录一条审计条目
    ///
    /// 快照在持有写锁时交给本地存储，持久化顺序与记录顺序一致。
    /// 持久化失败只记录警告，不影响调用方
    pub fn record(&self, entry: AuditEntry) {
        {
            let mut entries = self.entries.write();
            entries.push_front(entry.clone());
            entries.truncate(self.capacity);
            if let Err(e) = self.store.set(API_LOGS_KEY, &*entries) {
                warn!("Failed to persist API audit log: {}", e);
            }
        }

        // No receivers is fine
        let _ = self.notifier.send(entry);
    }

    /// 当前条目（最新在前）
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// 订阅新条目通知
    pub fn subscribe(&self) -> broadcast::Receiver<AuditEntry> {
        self.notifier.subscribe()
    }

    /// 清空日志
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();
        if let Err(e) = self.store.remove(API_LOGS_KEY) {
            warn!("Failed to clear persisted API audit log: {}", e);
        }
    }
}
