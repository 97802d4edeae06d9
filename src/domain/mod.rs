// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// - 领域模型（models）：远程API的数据结构和客户端派生计算
/// - 服务（services）：按资源划分的远程API封装
pub mod models;
pub mod services;
