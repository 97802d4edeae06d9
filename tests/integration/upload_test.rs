// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{api_client, TEST_API_KEY};
use panelrs::domain::models::api_response::ApiResponse;
use panelrs::domain::models::invoice::InvoiceUpload;
use panelrs::domain::models::ticimax::TicimaxImportReport;
use panelrs::domain::services::invoice_service::InvoiceService;
use panelrs::domain::services::ticimax_service::TicimaxService;
use panelrs::infrastructure::api::{ApiClient, AuditLog};
use panelrs::infrastructure::local_store::LocalStore;
use panelrs::utils::errors::ApiError;
use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn admin_client(base_url: &str) -> Arc<ApiClient> {
    let audit = Arc::new(AuditLog::new(Arc::new(LocalStore::in_memory()), 50));
    Arc::new(
        ApiClient::new(base_url, Some(TEST_API_KEY.to_string()), audit)
            .with_admin_credentials(Some("admin-secret".to_string()), Some("jwt-token".to_string())),
    )
}

fn pdf(name: &str) -> InvoiceUpload {
    InvoiceUpload {
        file_name: name.to_string(),
        bytes: b"%PDF-1.4 test".to_vec(),
    }
}

#[tokio::test]
async fn test_upload_sends_admin_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/invoices"))
        .and(header("X-API-Key", TEST_API_KEY))
        .and(header("X-Admin-Key", "admin-secret"))
        .and(header("Authorization", "Bearer jwt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Fatura yüklendi"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client(&server.uri());
    let message = client
        .upload::<Value>(Method::POST, "/admin/invoices", Form::new().text("status", "draft"))
        .await
        .unwrap()
        .into_message()
        .unwrap();

    assert_eq!(message.as_deref(), Some("Fatura yüklendi"));
}

#[tokio::test]
async fn test_upload_reads_envelope_from_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/invoices/3"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "success": false,
            "message": "Fatura numarası zaten mevcut"
        })))
        .mount(&server)
        .await;

    let client = admin_client(&server.uri());
    let response: ApiResponse<Value> = client
        .upload(Method::PUT, "/admin/invoices/3", Form::new())
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(response.message(), Some("Fatura numarası zaten mevcut"));
}

#[tokio::test]
async fn test_upload_unparseable_error_body_maps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/invoices"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = admin_client(&server.uri());
    let result = client
        .upload::<Value>(Method::POST, "/admin/invoices", Form::new())
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_ticimax_import_decodes_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/ticimax-orders/import"))
        .and(body_string_contains("siparisler.xlsx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "imported": 12, "skipped": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = TicimaxService::new(api_client(&server.uri()));
    let report = service
        .import("siparisler.xlsx", b"PK\x03\x04".to_vec())
        .await
        .unwrap();

    assert_eq!(
        report,
        TicimaxImportReport {
            imported: 12,
            skipped: 2,
            errors: Vec::new(),
        }
    );
    assert_eq!(report.summary(), "12 sipariş başarıyla yüklendi, 2 sipariş atlandı");
}

#[tokio::test]
async fn test_ticimax_import_rejects_non_excel_file() {
    let server = MockServer::start().await;

    let service = TicimaxService::new(api_client(&server.uri()));
    let err = service
        .import("orders.csv", b"id;total".to_vec())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.to_string(), "Lütfen Excel dosyası seçin (.xls veya .xlsx)");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ticimax_import_failure_envelope_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/ticimax-orders/import"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Geçersiz Excel formatı"
        })))
        .mount(&server)
        .await;

    let service = TicimaxService::new(api_client(&server.uri()));
    let err = service.import("Siparisler.XLS", vec![0u8; 4]).await.unwrap_err();

    assert_eq!(err.to_string(), "Geçersiz Excel formatı");
}

#[tokio::test]
async fn test_bulk_upload_posts_each_file_and_aggregates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/invoices"))
        .and(body_string_contains("bozuk.pdf"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "PDF okunamadı"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/invoices"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let service = InvoiceService::new(api_client(&server.uri()));
    let report = service
        .bulk_upload(&[pdf("fatura-1.pdf"), pdf("bozuk.pdf"), pdf("fatura-2.pdf")])
        .await;

    assert_eq!(report.uploaded, 2);
    assert_eq!(report.errors, vec!["bozuk.pdf: PDF okunamadı".to_string()]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        let content_type = request
            .headers
            .iter()
            .find(|(name, _)| name.as_str().eq_ignore_ascii_case("content-type"))
            .map(|(_, values)| values.last().as_str().to_string())
            .unwrap_or_default();
        assert!(content_type.starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&request.body);
        assert!(body.contains("name=\"status\""));
        assert!(body.contains("draft"));
        assert!(body.contains("application/pdf"));
    }
}
