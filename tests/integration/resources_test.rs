// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::api_client;
use panelrs::application::{AddressBook, Banner, CrudController, SeoAudit};
use panelrs::domain::models::address::{AddressForm, AddressType};
use panelrs::domain::models::gift_card::GiftCardStatus;
use panelrs::domain::services::address_service::AddressService;
use panelrs::domain::services::gift_card_service::GiftCardService;
use panelrs::domain::services::seo_service::SeoService;
use panelrs::domain::services::user_service::UserService;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn home_address() -> AddressForm {
    AddressForm {
        address_type: AddressType::Shipping,
        full_name: "Elif Şahin".to_string(),
        phone: "0532 000 00 00".to_string(),
        address: "Bağdat Cad. 12".to_string(),
        city: "İstanbul".to_string(),
        district: Some("Kadıköy".to_string()),
        postal_code: None,
        is_default: None,
    }
}

fn address_book(server: &MockServer, user_id: i64) -> CrudController<AddressBook> {
    let service = Arc::new(AddressService::new(api_client(&server.uri())));
    CrudController::new(Arc::new(AddressBook::new(service, user_id)))
}

async fn mount_address_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/user-addresses"))
        .and(query_param("userId", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": 5, "userId": 42, "addressType": "shipping", "fullName": "Elif Şahin",
                       "phone": "0532 000 00 00", "address": "Bağdat Cad. 12", "city": "İstanbul",
                       "isDefault": false }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_user_listing_falls_back_to_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Yetkisiz" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/search"))
        .and(query_param("query", "an"))
        .and(query_param("excludeUserId", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": 9, "name": "Can Öztürk", "email": "can@example.com" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = UserService::new(api_client(&server.uri())).list_users().await;

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Can Öztürk");
}

#[tokio::test]
async fn test_user_listing_is_empty_when_both_sources_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "Kapalı" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let users = UserService::new(api_client(&server.uri())).list_users().await;

    assert!(users.is_empty());
}

#[tokio::test]
async fn test_address_create_update_delete_reload_list() {
    let server = MockServer::start().await;
    mount_address_list(&server).await;
    Mock::given(method("POST"))
        .and(path("/user-addresses"))
        .and(body_json(json!({
            "userId": 42,
            "addressType": "shipping",
            "fullName": "Elif Şahin",
            "phone": "0532 000 00 00",
            "address": "Bağdat Cad. 12",
            "city": "İstanbul",
            "district": "Kadıköy"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Adres eklendi",
            "data": { "addressId": 5 }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/user-addresses/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/user-addresses/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Silindi" })))
        .expect(1)
        .mount(&server)
        .await;

    let book = address_book(&server, 42);

    let banner = book.create(&home_address()).await;
    assert_eq!(banner, Banner::Success("Adres eklendi".to_string()));
    assert_eq!(book.items().len(), 1);
    assert_eq!(book.items()[0].full_name, "Elif Şahin");

    let banner = book.update(5, &home_address()).await;
    assert_eq!(banner, Banner::Success("Adres güncellendi".to_string()));

    let banner = book.delete(5).await;
    assert_eq!(banner, Banner::Success("Silindi".to_string()));
}

#[tokio::test]
async fn test_address_missing_city_is_rejected_locally() {
    let server = MockServer::start().await;
    let book = address_book(&server, 42);

    let form = AddressForm {
        city: "  ".to_string(),
        ..home_address()
    };
    let banner = book.create(&form).await;

    assert_eq!(banner, Banner::Error("Şehir gerekli".to_string()));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_address_set_default() {
    let server = MockServer::start().await;
    mount_address_list(&server).await;
    Mock::given(method("PUT"))
        .and(path("/user-addresses/5/set-default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let book = address_book(&server, 42);
    let banner = book
        .run_action("set-default", |book: Arc<AddressBook>| async move {
            book.set_default(5).await
        })
        .await;

    assert_eq!(banner, Banner::Success("Varsayılan adres ayarlandı".to_string()));
    assert_eq!(book.items().len(), 1);
}

#[tokio::test]
async fn test_gift_card_status_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/gift-cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": 7, "code": "HEDIYE-7", "amount": 250.0, "status": "cancelled", "expiresAt": "2026-12-31" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/gift-cards/7/status"))
        .and(body_json(json!({ "status": "cancelled" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let cards = CrudController::new(Arc::new(GiftCardService::new(api_client(&server.uri()))));
    let banner = cards.update(7, &GiftCardStatus::Cancelled).await;

    assert_eq!(banner, Banner::Success("Durum güncellendi".to_string()));
    assert_eq!(cards.items()[0].status, GiftCardStatus::Cancelled);
}

#[tokio::test]
async fn test_seo_audit_adds_https_and_keeps_last_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/seo/analyze"))
        .and(body_json(json!({ "url": "https://magaza.example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "url": "https://magaza.example.com", "title": "Mağaza", "score": 82, "issues": ["Meta açıklaması eksik"] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let audit = SeoAudit::new(Arc::new(SeoService::new(api_client(&server.uri()))));
    let banner = audit.analyze("  magaza.example.com ").await;

    assert_eq!(banner, Banner::Success("SEO puanı: 82".to_string()));
    let last = audit.last().unwrap();
    assert_eq!(last.title, "Mağaza");
    assert_eq!(last.issues, vec!["Meta açıklaması eksik".to_string()]);
}

#[tokio::test]
async fn test_seo_audit_rejects_blank_url() {
    let server = MockServer::start().await;
    let audit = SeoAudit::new(Arc::new(SeoService::new(api_client(&server.uri()))));

    let banner = audit.analyze("   ").await;

    assert_eq!(banner, Banner::Error("Lütfen bir URL girin".to_string()));
    assert!(audit.last().is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}
