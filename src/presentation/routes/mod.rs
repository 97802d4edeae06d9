// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::api::AuditLog;
use crate::presentation::handlers::{admin_handler, quote_handler};
use crate::presentation::middleware::rate_limit_middleware::RateLimiter;
use crate::scraper::ScrapeSession;
use crate::workers::{IntegrationMonitorWorker, LiveUsersWorker};
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub audit: Arc<AuditLog>,
    pub scrape: Arc<ScrapeSession>,
    pub live_users: Arc<LiveUsersWorker>,
    pub integration_monitor: Arc<IntegrationMonitorWorker>,
    pub rate_limiter: Arc<RateLimiter>,
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/admin/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/api/teklif", post(quote_handler::submit_quote));

    let admin_routes = Router::new()
        .route(
            "/api/admin/audit-log",
            get(admin_handler::audit_log).delete(admin_handler::clear_audit_log),
        )
        .route(
            "/api/admin/scrape",
            get(admin_handler::scrape_status).post(admin_handler::start_scrape),
        )
        .route("/api/admin/scrape/stop", post(admin_handler::stop_scrape))
        .route("/api/admin/scrape/export", get(admin_handler::export_scrape))
        .route("/api/admin/live-users", get(admin_handler::live_users))
        .route(
            "/api/admin/integrations/health",
            get(admin_handler::integration_health),
        );

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}

/// 健康检查端点
pub async fn health_check() -> Json<Value> {
    Json(json!({ "success": true, "status": "ok" }))
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
