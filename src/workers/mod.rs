// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 固定间隔的轮询监视器：在线用户和集成状态
pub mod integration_monitor_worker;
pub mod live_users_worker;
pub mod manager;
pub mod poller;
pub mod worker;

pub use integration_monitor_worker::IntegrationMonitorWorker;
pub use live_users_worker::LiveUsersWorker;
pub use manager::WorkerManager;
pub use poller::Poller;
pub use worker::Worker;
