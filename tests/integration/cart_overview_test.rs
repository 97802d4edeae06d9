// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::api_client;
use panelrs::application::CartOverview;
use panelrs::domain::services::cart_service::CartService;
use panelrs::domain::services::user_service::UserService;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_json(server: &MockServer, verb: &str, route: &str, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn cart_server() -> MockServer {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/admin/users",
        json!({ "success": true, "data": [
            { "id": 1, "name": "Ayşe Yılmaz", "email": "ayse@example.com" },
            { "id": 2, "name": "Mehmet Kaya", "email": "mehmet@example.com" },
            { "id": 3, "name": "Zeynep Demir", "email": "zeynep@example.com" }
        ]}),
    )
    .await;

    // Two lines, the server applies a discount so the total is not the line sum
    mount_json(
        &server,
        "GET",
        "/cart/1",
        json!({ "success": true, "data": [
            { "id": 10, "productId": 100, "name": "Tişört", "price": 150.0, "quantity": 2 },
            { "id": 11, "productId": 101, "name": "Şapka", "price": 80.0, "quantity": 1 }
        ]}),
    )
    .await;
    mount_json(&server, "GET", "/cart/user/1/total", json!({ "success": true, "data": 342.5 })).await;

    mount_json(&server, "GET", "/cart/2", json!({ "success": true, "data": [] })).await;
    mount_json(&server, "GET", "/cart/user/2/total", json!({ "success": true, "data": 0 })).await;

    // User 3 has no cart endpoints at all and degrades to an empty row
    server
}

fn overview(server: &MockServer) -> CartOverview {
    let api = api_client(&server.uri());
    CartOverview::new(
        Arc::new(UserService::new(api.clone())),
        Arc::new(CartService::new(api)),
    )
}

#[tokio::test]
async fn test_total_comes_from_server_and_empty_carts_are_hidden() {
    let server = cart_server().await;
    let overview = overview(&server);

    let carts = overview.refresh().await;

    assert_eq!(carts.len(), 1);
    assert_eq!(carts[0].user_id, 1);
    assert_eq!(carts[0].total, 342.5);
    assert_eq!(carts[0].quantity(), 3);

    let summary = overview.summary();
    assert_eq!(summary.active_users, 1);
    assert_eq!(summary.total_items, 2);
    assert_eq!(summary.total_value, 342.5);
}

#[tokio::test]
async fn test_legacy_cart_path_is_used_when_primary_fails() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/admin/users",
        json!({ "success": true, "data": [{ "id": 5, "name": "Eski Yol", "email": "eski@example.com" }] }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/cart/5"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_json(
        &server,
        "GET",
        "/cart/user/5",
        json!({ "success": true, "data": [{ "id": 1, "productId": 9, "name": "Kupa", "price": 45.0, "quantity": 1 }] }),
    )
    .await;
    mount_json(&server, "GET", "/cart/user/5/total", json!({ "success": true, "data": 45.0 })).await;

    let carts = overview(&server).refresh().await;
    assert_eq!(carts.len(), 1);
    assert_eq!(carts[0].items[0].name, "Kupa");
}

#[tokio::test]
async fn test_filter_does_not_change_summary() {
    let server = cart_server().await;
    let overview = overview(&server);
    overview.refresh().await;

    assert_eq!(overview.filtered("AYŞE").len(), 1);
    assert!(overview.filtered("mehmet").is_empty());
    assert_eq!(overview.summary().active_users, 1);
}

#[tokio::test]
async fn test_clear_cart_failure_shows_fixed_message() {
    let server = cart_server().await;
    Mock::given(method("DELETE"))
        .and(path("/cart/user/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .expect(1)
        .mount(&server)
        .await;

    let overview = overview(&server);
    overview.refresh().await;
    let banner = overview.clear_user_cart(1).await;

    assert!(banner.is_error());
    assert_eq!(banner.text(), "Sepet temizlenirken hata oluştu");
    assert_eq!(overview.carts().len(), 1);
}

async fn single_user_server(user_id: i64) -> MockServer {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/admin/users",
        json!({ "success": true, "data": [{ "id": user_id, "name": "Deniz Aydın", "email": "deniz@example.com" }] }),
    )
    .await;
    mount_json(
        &server,
        "GET",
        &format!("/cart/{}", user_id),
        json!({ "success": true, "data": [{ "id": 3, "productId": 30, "name": "Defter", "price": 25.0, "quantity": 4 }] }),
    )
    .await;
    server
}

#[tokio::test]
async fn test_total_failure_envelope_keeps_cart_items() {
    let server = single_user_server(7).await;
    mount_json(
        &server,
        "GET",
        "/cart/user/7/total",
        json!({ "success": false, "message": "Toplam hesaplanamadı" }),
    )
    .await;

    let carts = overview(&server).refresh().await;

    assert_eq!(carts.len(), 1);
    assert_eq!(carts[0].items.len(), 1);
    assert_eq!(carts[0].items[0].name, "Defter");
    assert_eq!(carts[0].total, 0.0);
}

#[tokio::test]
async fn test_failed_total_request_degrades_row() {
    let server = single_user_server(8).await;
    Mock::given(method("GET"))
        .and(path("/cart/user/8/total"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let carts = overview(&server).refresh().await;

    assert!(carts.is_empty());
}
