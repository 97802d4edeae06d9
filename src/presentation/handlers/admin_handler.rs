// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::integration::IntegrationHealth;
use crate::domain::models::live_user::LiveUsersSnapshot;
use crate::domain::models::scrape_progress::ScrapeProgress;
use crate::infrastructure::api::AuditEntry;
use crate::presentation::errors::AppError;
use crate::presentation::routes::AppState;
use crate::scraper::{ScrapePhase, ScrapeSearch};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

/// 抓取会话状态
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeStatus {
    pub phase: ScrapePhase,
    pub progress: ScrapeProgress,
    pub result_count: usize,
    pub error: Option<String>,
}

pub async fn audit_log(State(state): State<AppState>) -> Json<Vec<AuditEntry>> {
    Json(state.audit.entries())
}

pub async fn clear_audit_log(State(state): State<AppState>) -> Json<Value> {
    state.audit.clear();
    Json(json!({ "success": true }))
}

/// 在后台开始一次抓取
///
/// 抓取在返回202之前已登记，紧随其后的停止请求一定生效；
/// 正在进行的抓取会被新的抓取取代
pub async fn start_scrape(
    State(state): State<AppState>,
    Json(search): Json<ScrapeSearch>,
) -> Result<impl IntoResponse, AppError> {
    let search = ScrapeSearch::new(&search.search_term, search.max_results, &search.exclude_sector);
    let run = state.scrape.begin(search)?;

    let session = state.scrape.clone();
    tokio::spawn(async move {
        let outcome = session.execute(run).await;
        debug!("Background scrape finished: {:?}", outcome.phase);
    });
    info!("Scrape accepted");

    Ok((StatusCode::ACCEPTED, Json(json!({ "success": true }))))
}

pub async fn stop_scrape(State(state): State<AppState>) -> Json<Value> {
    state.scrape.stop();
    Json(json!({ "success": true }))
}

pub async fn scrape_status(State(state): State<AppState>) -> Json<ScrapeStatus> {
    let session = &state.scrape;
    Json(ScrapeStatus {
        phase: session.phase(),
        progress: session.progress(),
        result_count: session.results().len(),
        error: session.error(),
    })
}

/// 以CSV下载当前抓取结果
pub async fn export_scrape(State(state): State<AppState>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"google-maps-results.csv\"",
            ),
        ],
        state.scrape.export_csv(),
    )
}

pub async fn live_users(State(state): State<AppState>) -> Json<LiveUsersSnapshot> {
    Json(state.live_users.snapshot())
}

pub async fn integration_health(State(state): State<AppState>) -> Json<IntegrationHealth> {
    Json(state.integration_monitor.health())
}
