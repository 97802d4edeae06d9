// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::api_client;
use panelrs::application::{Banner, CrudController};
use panelrs::domain::models::integration::IntegrationForm;
use panelrs::domain::models::segment::SegmentForm;
use panelrs::domain::services::integration_service::IntegrationService;
use panelrs::domain::services::segment_service::SegmentService;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn integrations(server: &MockServer) -> CrudController<IntegrationService> {
    let service = IntegrationService::new(api_client(&server.uri()));
    CrudController::new(Arc::new(service))
}

async fn list_calls(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.to_string() == "GET" && r.url.path() == route)
        .count()
}

#[tokio::test]
async fn test_create_posts_form_and_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/integrations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": 1, "name": "Trendyol", "type": "marketplace", "provider": "trendyol", "status": "active" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/integrations"))
        .and(body_json(json!({
            "name": "Trendyol",
            "type": "marketplace",
            "provider": "trendyol",
            "status": "active"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = integrations(&server);
    let banner = controller
        .create(&IntegrationForm::new("Trendyol", "marketplace", "trendyol"))
        .await;

    assert_eq!(banner, Banner::Success("Entegrasyon eklendi".to_string()));
    assert_eq!(controller.items().len(), 1);
    assert_eq!(controller.items()[0].kind, "marketplace");
    assert_eq!(list_calls(&server, "/admin/integrations").await, 1);
}

#[tokio::test]
async fn test_missing_fields_never_reach_the_server() {
    let server = MockServer::start().await;
    let controller = integrations(&server);

    let banner = controller
        .create(&IntegrationForm::new("Trendyol", "", "trendyol"))
        .await;

    assert_eq!(
        banner,
        Banner::Error("Lütfen zorunlu alanları doldurun".to_string())
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_server_error_shown_verbatim_and_list_still_reloaded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/segments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/segments/4"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Bu segment kampanyada kullanılıyor"
        })))
        .mount(&server)
        .await;

    let controller = CrudController::new(Arc::new(SegmentService::new(api_client(&server.uri()))));
    let banner = controller.delete(4).await;

    assert_eq!(
        banner,
        Banner::Error("Bu segment kampanyada kullanılıyor".to_string())
    );
    assert_eq!(list_calls(&server, "/admin/segments").await, 1);
}

#[tokio::test]
async fn test_segment_create_trims_name_and_uses_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/segments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/segments"))
        .and(body_json(json!({ "name": "Sadık Müşteriler", "criteria": "orders > 5", "color": "#22c55e" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Segment kaydedildi"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = CrudController::new(Arc::new(SegmentService::new(api_client(&server.uri()))));
    let form = SegmentForm {
        name: "  Sadık Müşteriler ".to_string(),
        criteria: "orders > 5 ".to_string(),
        color: "#22c55e".to_string(),
    };
    let banner = controller.create(&form).await;

    assert_eq!(banner, Banner::Success("Segment kaydedildi".to_string()));
}
