// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::WorkerError;
use async_trait::async_trait;

/// Worker trait定义
///
/// 所有轮询监视器都必须实现此trait，每次调用 `run` 执行一次刷新
#[async_trait]
pub trait Worker: Send + Sync {
    /// 执行一次刷新
    async fn run(&self) -> Result<(), WorkerError>;

    /// 获取工作器名称
    fn name(&self) -> &str;
}
