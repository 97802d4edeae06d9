// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 远程API的线上数据结构（驼峰命名），以及在客户端计算的派生值：
/// 购物车汇总、漏斗转化率、在线用户筛选、CSV导出和发票号推导。
pub mod address;
pub mod analytics;
pub mod api_response;
pub mod backup;
pub mod business;
pub mod cart;
pub mod chatbot;
pub mod gift_card;
pub mod integration;
pub mod invoice;
pub mod live_user;
pub mod product;
pub mod quote;
pub mod scrape_progress;
pub mod segment;
pub mod seo;
pub mod ticimax;
pub mod trendyol;
pub mod user;
