// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 看板控制器：CRUD、购物车总览以及备份和SEO操作
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含远程API的数据模型和按资源划分的服务
pub mod domain;

/// 基础设施模块
///
/// 远程REST API客户端、请求审计日志和本地键值存储
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和中间件
pub mod presentation;

/// 抓取模块
///
/// Google Maps流式抓取的解码器和会话状态机
pub mod scraper;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现轮询监视器和工作器管理
pub mod workers;
