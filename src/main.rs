// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use panelrs::config::settings::Settings;
use panelrs::domain::services::integration_service::IntegrationService;
use panelrs::domain::services::live_user_service::LiveUserService;
use panelrs::domain::services::scraped_data_service::ScrapedDataService;
use panelrs::infrastructure::api::{ApiClient, AuditLog};
use panelrs::infrastructure::local_store::LocalStore;
use panelrs::presentation::middleware::rate_limit_middleware::RateLimiter;
use panelrs::presentation::routes::{self, AppState};
use panelrs::scraper::{HttpScrapeSource, ScrapeSession};
use panelrs::utils::telemetry;
use panelrs::workers::{IntegrationMonitorWorker, LiveUsersWorker, WorkerManager};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting panelrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Local state and API client
    let store = Arc::new(match &settings.storage.local_store_path {
        Some(path) => LocalStore::open(path)?,
        None => LocalStore::in_memory(),
    });
    let audit = Arc::new(AuditLog::new(
        store.clone(),
        settings.storage.audit_log_capacity,
    ));
    let api = Arc::new(ApiClient::from_settings(&settings.api, &store, audit.clone()));
    info!("API client targeting {}", api.base_url());

    // 4. Scrape session
    let source = Arc::new(HttpScrapeSource::new(
        settings.scraper.stream_url.clone(),
        api.api_key().map(str::to_string),
    ));
    let sink = Arc::new(ScrapedDataService::new(api.clone()));
    let scrape = Arc::new(ScrapeSession::new(
        source,
        sink,
        settings.scraper.completion_display_delay(),
    ));

    // 5. Start Workers
    let live_users = Arc::new(LiveUsersWorker::new(Arc::new(LiveUserService::new(
        api.clone(),
    ))));
    let integration_monitor = Arc::new(IntegrationMonitorWorker::new(Arc::new(
        IntegrationService::new(api.clone()),
    )));
    let mut worker_manager = WorkerManager::new();
    if settings.polling.enabled {
        worker_manager.start_worker(
            live_users.clone(),
            settings.polling.live_users_interval(),
            settings.polling.auto_refresh,
        );
        worker_manager.start_worker(
            integration_monitor.clone(),
            settings.polling.integration_monitor_interval(),
            settings.polling.auto_refresh,
        );
    }
    info!("{} pollers started", worker_manager.len());

    // 6. Start HTTP server
    let rate_limiter = Arc::new(RateLimiter::new(
        settings.quote.max_requests_per_window,
        Duration::from_secs(settings.quote.window_secs),
    ));
    let state = AppState {
        audit,
        scrape: scrape.clone(),
        live_users,
        integration_monitor,
        rate_limiter,
    };
    let app = routes::routes(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            worker_manager.wait_for_shutdown().await;
            scrape.stop();
        })
        .await?;

    store.flush().await;
    info!("Server stopped");
    Ok(())
}
