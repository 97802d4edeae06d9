// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::worker::Worker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 固定间隔轮询器
///
/// 启动时无论自动刷新是否开启都立即执行一次。开启时之后每隔 `interval`
/// 执行一次；每次切换开关或调用 [`Poller::refresh_now`] 都会立即执行。
/// 句柄被丢弃时轮询停止。
pub struct Poller {
    name: String,
    auto_refresh: watch::Sender<bool>,
    refresh: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl Poller {
    /// 启动轮询器
    ///
    /// # 参数
    ///
    /// * `worker` - 每次轮询执行的工作器
    /// * `interval` - 两次刷新之间的间隔
    /// * `auto_refresh` - 初始是否开启自动刷新
    pub fn start(worker: Arc<dyn Worker>, interval: Duration, auto_refresh: bool) -> Self {
        let name = worker.name().to_string();
        let (tx, rx) = watch::channel(auto_refresh);
        let refresh = Arc::new(Notify::new());
        info!("Starting poller {} every {:?}", name, interval);
        let handle = tokio::spawn(poll_loop(worker, interval, rx, refresh.clone()));

        Self {
            name,
            auto_refresh: tx,
            refresh,
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_auto_refresh(&self) -> bool {
        *self.auto_refresh.borrow()
    }

    /// 切换自动刷新
    pub fn set_auto_refresh(&self, enabled: bool) {
        let changed = self.auto_refresh.send_if_modified(|current| {
            let changed = *current != enabled;
            *current = enabled;
            changed
        });
        if changed {
            info!("Poller {} auto refresh: {}", self.name, enabled);
        }
    }

    pub fn toggle_auto_refresh(&self) -> bool {
        let enabled = !self.is_auto_refresh();
        self.set_auto_refresh(enabled);
        enabled
    }

    /// 立即执行一次，不影响计时开关
    pub fn refresh_now(&self) {
        debug!("Poller {} manual refresh", self.name);
        self.refresh.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 停止轮询
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        debug!("Stopping poller {}", self.name);
        self.handle.abort();
    }
}

async fn poll_loop(
    worker: Arc<dyn Worker>,
    interval: Duration,
    mut auto_refresh: watch::Receiver<bool>,
    refresh: Arc<Notify>,
) {
    loop {
        let enabled = *auto_refresh.borrow_and_update();

        if let Err(e) = worker.run().await {
            warn!("Poller {} refresh failed: {}", worker.name(), e);
        }

        tokio::select! {
            _ = tokio::time::sleep(interval), if enabled => {}
            changed = auto_refresh.changed() => {
                if changed.is_err() {
                    return;
                }
            }
            _ = refresh.notified() => {}
        }
    }
}

#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;
