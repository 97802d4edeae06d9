// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::worker::Worker;
use crate::domain::models::live_user::{LiveUser, LiveUserFilter, LiveUsersSnapshot};
use crate::domain::services::live_user_service::LiveUserService;
use crate::utils::errors::WorkerError;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// 在线用户监视器
///
/// 每次刷新替换整个快照；获取失败时快照为空列表，但 `last_update` 仍会更新
pub struct LiveUsersWorker {
    service: Arc<LiveUserService>,
    snapshot: RwLock<LiveUsersSnapshot>,
    updates: watch::Sender<usize>,
}

impl LiveUsersWorker {
    pub fn new(service: Arc<LiveUserService>) -> Self {
        let (updates, _) = watch::channel(0);
        Self {
            service,
            snapshot: RwLock::new(LiveUsersSnapshot::empty(Utc::now())),
            updates,
        }
    }

    pub fn snapshot(&self) -> LiveUsersSnapshot {
        self.snapshot.read().clone()
    }

    pub fn filtered(&self, filter: &LiveUserFilter) -> Vec<LiveUser> {
        self.snapshot
            .read()
            .filtered(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// 订阅刷新事件，值为最新在线人数
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.updates.subscribe()
    }
}

#[async_trait]
impl Worker for LiveUsersWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        let snapshot = self.service.snapshot().await;
        let count = snapshot.users.len();
        debug!("Live users refreshed: {}", count);

        *self.snapshot.write() = snapshot;
        self.updates.send_replace(count);
        Ok(())
    }

    fn name(&self) -> &str {
        "live-users"
    }
}
