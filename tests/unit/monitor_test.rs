// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::{api_client, create_test_server};
use panelrs::domain::models::live_user::LiveUserFilter;
use panelrs::domain::services::integration_service::IntegrationService;
use panelrs::domain::services::live_user_service::LiveUserService;
use panelrs::workers::{IntegrationMonitorWorker, LiveUsersWorker, Worker, WorkerManager};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn live_users_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/live-users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "id": "a", "ipAddress": "85.1.2.3", "city": "İzmir", "country": "Türkiye", "device": "mobile" },
                { "id": "b", "ipAddress": "91.4.5.6", "city": "Berlin", "country": "Germany", "device": "desktop" }
            ]
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_live_users_poller_publishes_snapshot() {
    let server = live_users_server().await;
    let worker = Arc::new(LiveUsersWorker::new(Arc::new(LiveUserService::new(
        api_client(&server.uri()),
    ))));
    let mut updates = worker.subscribe();

    let mut manager = WorkerManager::new();
    manager.start_worker(worker.clone(), Duration::from_secs(60), true);

    tokio::time::timeout(Duration::from_secs(5), updates.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*updates.borrow(), 2);

    let filter = LiveUserFilter {
        country: Some("Türkiye".to_string()),
        ..Default::default()
    };
    let turks = worker.filtered(&filter);
    assert_eq!(turks.len(), 1);
    assert_eq!(turks[0].city, "İzmir");

    manager.shutdown();
    assert!(manager.is_empty());
}

#[tokio::test]
async fn test_live_users_failure_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/live-users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let worker = LiveUsersWorker::new(Arc::new(LiveUserService::new(api_client(&server.uri()))));
    worker.run().await.unwrap();
    assert!(worker.snapshot().users.is_empty());
}

#[tokio::test]
async fn test_disabled_auto_refresh_still_loads_on_start() {
    let server = live_users_server().await;
    let worker = Arc::new(LiveUsersWorker::new(Arc::new(LiveUserService::new(
        api_client(&server.uri()),
    ))));

    let mut manager = WorkerManager::new();
    manager.start_worker(worker.clone(), Duration::from_millis(10), false);
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert_eq!(worker.snapshot().users.len(), 2);
    assert_eq!(manager.poller("live-users").map(|p| p.is_auto_refresh()), Some(false));
}

#[tokio::test]
async fn test_manager_refresh_now_fetches_again() {
    let server = live_users_server().await;
    let worker = Arc::new(LiveUsersWorker::new(Arc::new(LiveUserService::new(
        api_client(&server.uri()),
    ))));

    let mut manager = WorkerManager::new();
    manager.start_worker(worker, Duration::from_secs(60), false);
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(manager.refresh_now("live-users"));
    assert!(!manager.refresh_now("unknown"));
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_integration_monitor_counts_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/integrations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "id": 1, "name": "Trendyol", "type": "marketplace", "status": "active" },
                { "id": 2, "name": "Iyzico", "type": "payment", "status": "error" },
                { "id": 3, "name": "Aras", "type": "cargo", "status": "warning" }
            ]
        })))
        .mount(&server)
        .await;

    let worker = IntegrationMonitorWorker::new(Arc::new(IntegrationService::new(api_client(
        &server.uri(),
    ))));
    worker.run().await.unwrap();

    let health = worker.health();
    assert_eq!(health.total, 3);
    assert_eq!(health.active, 1);
    assert_eq!(health.errored, 1);
    assert_eq!(health.warning, 1);
    assert!(health.has_problems());
}

#[tokio::test]
async fn test_integration_monitor_propagates_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/integrations"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let worker = IntegrationMonitorWorker::new(Arc::new(IntegrationService::new(api_client(
        &server.uri(),
    ))));
    assert!(worker.run().await.is_err());
    assert_eq!(worker.health().total, 0);
}

#[tokio::test]
async fn test_monitor_routes_serve_latest_snapshots() {
    let server = live_users_server().await;
    let (app, state) = create_test_server(&server.uri());
    state.live_users.run().await.unwrap();

    let body: Value = app.get("/api/admin/live-users").await.json();
    assert_eq!(body["users"].as_array().map(Vec::len), Some(2));

    let health: Value = app.get("/api/admin/integrations/health").await.json();
    assert_eq!(health["total"], 0);
}
