// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::worker::Worker;
use crate::domain::models::integration::IntegrationHealth;
use crate::domain::services::integration_service::IntegrationService;
use crate::utils::errors::WorkerError;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// 集成监视器
///
/// 轮询 `/admin/integrations` 并汇总各状态数量；
/// 获取失败时保留上一次的快照
pub struct IntegrationMonitorWorker {
    service: Arc<IntegrationService>,
    health: RwLock<IntegrationHealth>,
}

impl IntegrationMonitorWorker {
    pub fn new(service: Arc<IntegrationService>) -> Self {
        Self {
            service,
            health: RwLock::new(IntegrationHealth::empty(Utc::now())),
        }
    }

    pub fn health(&self) -> IntegrationHealth {
        self.health.read().clone()
    }
}

#[async_trait]
impl Worker for IntegrationMonitorWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        let integrations = self.service.list().await?;
        let health = IntegrationHealth::from_integrations(integrations, Utc::now());
        if health.has_problems() {
            warn!(
                "Integrations need attention: {} warning, {} error",
                health.warning, health.errored
            );
        }
        debug!("Integration monitor refreshed: {} integrations", health.total);

        *self.health.write() = health;
        Ok(())
    }

    fn name(&self) -> &str {
        "integration-monitor"
    }
}
