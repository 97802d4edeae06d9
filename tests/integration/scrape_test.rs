// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{api_client, create_test_server, TEST_API_KEY};
use axum::http::StatusCode;
use panelrs::domain::services::scraped_data_service::ScrapedDataService;
use panelrs::scraper::{HttpScrapeSource, ScrapePhase, ScrapeSearch, ScrapeSession};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STREAM_PATH: &str = "/admin/google-maps/scrape-stream";
const PERSIST_PATH: &str = "/admin/google-maps/scraped-data";

fn event_stream(events: &[Value]) -> String {
    events.iter().map(|e| format!("data: {}\n\n", e)).collect()
}

fn business(name: &str, phone: &str) -> Value {
    json!({ "name": name, "phone": phone, "website": "", "address": "Kadıköy, İstanbul" })
}

fn session(server: &MockServer) -> ScrapeSession {
    let source = HttpScrapeSource::new(
        format!("{}{}", server.uri(), STREAM_PATH),
        Some(TEST_API_KEY.to_string()),
    );
    let sink = ScrapedDataService::new(api_client(&server.uri()));
    ScrapeSession::new(Arc::new(source), Arc::new(sink), Duration::ZERO)
}

#[tokio::test]
async fn test_stream_results_are_persisted_once() {
    let server = MockServer::start().await;
    let body = event_stream(&[
        json!({ "type": "status", "current": 0, "total": 2, "message": "Aranıyor", "totalFound": 2 }),
        json!({ "type": "result", "data": business("Kuaför Ayşe", "0216 111 11 11") }),
        json!({ "type": "result", "data": business("Berber Ali", "0216 222 22 22") }),
        json!({ "type": "complete", "totalFound": 2 }),
    ]);
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .and(header("X-API-Key", TEST_API_KEY))
        .and(body_json(json!({ "searchTerm": "kuaför", "maxResults": 2, "excludeSector": "" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(PERSIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "saved": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = session(&server)
        .run(ScrapeSearch::new("  kuaför ", 2, ""))
        .await
        .unwrap();

    assert_eq!(outcome.phase, ScrapePhase::Completed);
    assert_eq!(outcome.total_found, Some(2));
    assert_eq!(outcome.saved, Some(2));
    let names: Vec<&str> = outcome.results.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Kuaför Ayşe", "Berber Ali"]);

    let requests = server.received_requests().await.unwrap();
    let persisted = requests
        .iter()
        .find(|r| r.url.path() == PERSIST_PATH)
        .unwrap();
    let saved: Value = serde_json::from_slice(&persisted.body).unwrap();
    assert_eq!(saved.as_array().map(Vec::len), Some(2));
    assert_eq!(saved[0]["name"], "Kuaför Ayşe");
}

#[tokio::test]
async fn test_error_event_skips_persist() {
    let server = MockServer::start().await;
    let body = event_stream(&[
        json!({ "type": "result", "data": business("Kafe", "") }),
        json!({ "type": "error", "message": "Google Maps erişilemiyor" }),
    ]);
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(PERSIST_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = session(&server)
        .run(ScrapeSearch::new("kafe", 5, ""))
        .await
        .unwrap();

    assert_eq!(outcome.phase, ScrapePhase::Errored);
    assert_eq!(outcome.error.as_deref(), Some("Google Maps erişilemiyor"));
    assert_eq!(outcome.saved, None);
}

#[tokio::test]
async fn test_stream_http_failure_reports_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Geçersiz API anahtarı" })))
        .mount(&server)
        .await;

    let scrape = session(&server);
    let outcome = scrape.run(ScrapeSearch::new("otel", 5, "")).await.unwrap();

    assert_eq!(outcome.phase, ScrapePhase::Errored);
    assert_eq!(outcome.error.as_deref(), Some("Geçersiz API anahtarı"));
    assert_eq!(scrape.error().as_deref(), Some("Geçersiz API anahtarı"));
}

#[tokio::test]
async fn test_scrape_route_rejects_empty_term() {
    let (app, _state) = create_test_server("http://127.0.0.1:9");

    let response = app
        .post("/api/admin/scrape")
        .json(&json!({ "searchTerm": "   ", "maxResults": 10 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Lütfen bir arama terimi girin");
}

#[tokio::test]
async fn test_scrape_route_runs_in_background_and_exports_csv() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(event_stream(&[
            json!({ "type": "result", "data": business("Eczane Şifa", "0212 333 33 33") }),
            json!({ "type": "complete", "totalFound": 1 }),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(PERSIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": { "saved": 1 } })))
        .mount(&server)
        .await;

    let (app, state) = create_test_server(&server.uri());
    let response = app
        .post("/api/admin/scrape")
        .json(&json!({ "searchTerm": "eczane", "maxResults": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::ACCEPTED);

    let mut phase = state.scrape.phase();
    for _ in 0..100 {
        if phase == ScrapePhase::Completed {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        phase = state.scrape.phase();
    }
    assert_eq!(phase, ScrapePhase::Completed);

    let status: Value = app.get("/api/admin/scrape").await.json();
    assert_eq!(status["phase"], "completed");
    assert_eq!(status["resultCount"], 1);

    let export = app.get("/api/admin/scrape/export").await;
    assert_eq!(export.status_code(), StatusCode::OK);
    let csv = export.text();
    assert!(csv.contains("Eczane Şifa"));
    assert!(csv.contains("0212 333 33 33"));
}

#[tokio::test]
async fn test_stop_right_after_start_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(event_stream(&[
                    json!({ "type": "result", "data": business("Geç Gelen", "0212 444 44 44") }),
                    json!({ "type": "complete", "totalFound": 1 }),
                ]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let (app, state) = create_test_server(&server.uri());
    let response = app
        .post("/api/admin/scrape")
        .json(&json!({ "searchTerm": "fırın", "maxResults": 5 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
    assert_eq!(state.scrape.phase(), ScrapePhase::Searching);

    let stopped = app.post("/api/admin/scrape/stop").await;
    assert_eq!(stopped.status_code(), StatusCode::OK);

    let mut phase = state.scrape.phase();
    for _ in 0..100 {
        if phase == ScrapePhase::Aborted {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        phase = state.scrape.phase();
    }
    assert_eq!(phase, ScrapePhase::Aborted);
    assert!(state.scrape.results().is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != PERSIST_PATH));
}
