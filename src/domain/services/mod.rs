// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 每个远程资源一个服务，均为 `ApiClient` 之上的类型化封装。
/// 失败信封统一转换为 `ApiError`，少数读取操作带有回退路径。
pub mod address_service;
pub mod analytics_service;
pub mod backup_service;
pub mod cart_service;
pub mod chatbot_service;
pub mod crm_service;
pub mod gift_card_service;
pub mod integration_service;
pub mod invoice_service;
pub mod live_user_service;
pub mod product_service;
pub mod scraped_data_service;
pub mod segment_service;
pub mod seo_service;
pub mod ticimax_service;
pub mod trendyol_service;
pub mod user_service;
