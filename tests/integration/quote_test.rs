// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_server;
use axum::http::StatusCode;
use serde_json::{json, Value};

fn quote() -> Value {
    json!({
        "name": "Ayşe Yılmaz",
        "company": "Yılmaz Tekstil",
        "email": "ayse@example.com",
        "phone": "0532 123 45 67",
        "productType": "tisort",
        "quantity": "250",
        "fabric": "penye",
        "color": "lacivert",
        "size": "M",
        "logo": true,
        "embroidery": false,
        "urgentOrder": false,
        "deliveryDate": "2026-11-01",
        "notes": "<b>Logo</b> göğüs solda",
        "honeypot": ""
    })
}

#[tokio::test]
async fn test_valid_quote_is_accepted() {
    let (server, _state) = create_test_server("http://127.0.0.1:9");

    let response = server
        .post("/api/teklif")
        .add_header("x-forwarded-for", "203.0.113.10")
        .json(&quote())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Teklifiniz başarıyla alındı. En kısa sürede size dönüş yapacağız."
    );
}

#[tokio::test]
async fn test_honeypot_is_rejected() {
    let (server, _state) = create_test_server("http://127.0.0.1:9");
    let mut body = quote();
    body["honeypot"] = json!("http://spam.example");

    let response = server.post("/api/teklif").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body, json!({ "error": "Invalid request." }));
}

#[tokio::test]
async fn test_first_invalid_field_is_reported() {
    let (server, _state) = create_test_server("http://127.0.0.1:9");

    let mut body = quote();
    body["email"] = json!("ayse@");
    body["phone"] = json!("123");
    let response = server.post("/api/teklif").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["error"], "Geçersiz e-posta adresi.");

    let mut body = quote();
    body["quantity"] = json!("0");
    let response = server.post("/api/teklif").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["error"], "Geçersiz adet.");
}

#[tokio::test]
async fn test_numeric_quantity_is_accepted() {
    let (server, _state) = create_test_server("http://127.0.0.1:9");
    let mut body = quote();
    body["quantity"] = json!(40);

    let response = server.post("/api/teklif").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_unreadable_body_is_internal_error() {
    let (server, _state) = create_test_server("http://127.0.0.1:9");

    let response = server
        .post("/api/teklif")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Bir hata oluştu. Lütfen daha sonra tekrar deneyin."
    );
}

#[tokio::test]
async fn test_sixth_request_from_same_client_is_limited() {
    let (server, _state) = create_test_server("http://127.0.0.1:9");

    for _ in 0..5 {
        let response = server
            .post("/api/teklif")
            .add_header("x-forwarded-for", "198.51.100.7")
            .json(&quote())
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let response = server
        .post("/api/teklif")
        .add_header("x-forwarded-for", "198.51.100.7")
        .json(&quote())
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Çok fazla istek gönderdiniz. Lütfen 1 saat sonra tekrar deneyin."
    );

    // Other clients keep their own window
    let response = server
        .post("/api/teklif")
        .add_header("x-forwarded-for", "198.51.100.8")
        .json(&quote())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
