// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 负责与外部系统的交互：远程REST API客户端及其审计日志，
/// 以及保存客户端状态的本地键值存储。
pub mod api;
pub mod local_store;
