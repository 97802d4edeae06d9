// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::poller::Poller;
use super::worker::Worker;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

/// 工作管理器
///
/// 持有所有轮询器，关闭时统一停止
#[derive(Default)]
pub struct WorkerManager {
    pollers: Vec<Poller>,
}

impl WorkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 启动一个轮询工作器
    ///
    /// # 参数
    ///
    /// * `worker` - 要轮询的工作器
    /// * `interval` - 刷新间隔
    /// * `auto_refresh` - 是否立即开启自动刷新
    pub fn start_worker(&mut self, worker: Arc<dyn Worker>, interval: Duration, auto_refresh: bool) {
        self.pollers.push(Poller::start(worker, interval, auto_refresh));
    }

    pub fn len(&self) -> usize {
        self.pollers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pollers.is_empty()
    }

    /// 按名称查找轮询器
    pub fn poller(&self, name: &str) -> Option<&Poller> {
        self.pollers.iter().find(|p| p.name() == name)
    }

    /// 切换所有轮询器的自动刷新
    pub fn set_auto_refresh(&self, enabled: bool) {
        for poller in &self.pollers {
            poller.set_auto_refresh(enabled);
        }
    }

    /// 立即刷新指定轮询器，未找到时返回 `false`
    pub fn refresh_now(&self, name: &str) -> bool {
        match self.poller(name) {
            Some(poller) => {
                poller.refresh_now();
                true
            }
            None => false,
        }
    }

    /// 停止所有轮询器
    pub fn shutdown(&mut self) {
        info!("Shutting down {} pollers...", self.pollers.len());
        self.pollers.clear();
        info!("Workers shut down successfully");
    }

    /// 等待关闭信号并关闭工作进程
    pub async fn wait_for_shutdown(&mut self) {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(err) => error!("Unable to listen for shutdown signal: {}", err),
        }
        self.shutdown();
    }
}
