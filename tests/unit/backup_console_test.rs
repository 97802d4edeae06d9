// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::api_client;
use panelrs::application::BackupConsole;
use panelrs::domain::models::backup::FtpTarget;
use panelrs::domain::services::backup_service::BackupService;
use panelrs::utils::errors::BackupError;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn console(server: &MockServer, dir: &std::path::Path) -> BackupConsole {
    let service = BackupService::new(api_client(&server.uri()));
    BackupConsole::new(Arc::new(service), dir)
}

#[tokio::test]
async fn test_backup_is_written_to_timestamped_file() {
    let server = MockServer::start().await;
    let export = json!({ "success": true, "data": { "users": [{ "id": 1 }], "products": [] } });
    Mock::given(method("GET"))
        .and(path("/admin/backup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(export.clone()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let console = console(&server, dir.path());
    let record = console.create_backup().await.unwrap();

    let file_name = record.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("backup-"));
    assert!(file_name.ends_with(".json"));
    assert!(!file_name.contains(':'));
    assert_eq!(record.size_kb, 1);

    let written: Value = serde_json::from_slice(&std::fs::read(&record.path).unwrap()).unwrap();
    assert_eq!(written, export);
    assert_eq!(console.history(), vec![record]);
}

#[tokio::test]
async fn test_restore_sends_inner_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/restore"))
        .and(body_json(json!({ "data": { "users": [] } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Geri yükleme tamamlandı"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("backup.json");
    std::fs::write(&file, r#"{"success":true,"data":{"users":[]}}"#).unwrap();

    let message = console(&server, dir.path())
        .restore_from_file(&file)
        .await
        .unwrap();
    assert_eq!(message.as_deref(), Some("Geri yükleme tamamlandı"));
}

#[tokio::test]
async fn test_restore_rejects_invalid_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.json");
    std::fs::write(&file, "not a backup").unwrap();

    let err = console(&server, dir.path())
        .restore_from_file(&file)
        .await
        .unwrap_err();
    assert!(matches!(err, BackupError::InvalidFile(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ftp_requires_host_and_user() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let target = FtpTarget::new("", "", "", "", "/yedek");
    assert_eq!(target.port, 21);

    let banner = console(&server, dir.path()).save_and_run_ftp(&target).await;
    assert!(banner.is_error());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ftp_config_is_saved_before_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/ftp-backup/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/ftp-backup/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Yedek FTP sunucusuna yüklendi"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let target = FtpTarget::new("ftp.example.com", "2121", "yedek", "gizli", "/");
    let banner = console(&server, dir.path()).save_and_run_ftp(&target).await;

    assert_eq!(banner.text(), "Yedek FTP sunucusuna yüklendi");
    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(paths, vec!["/admin/ftp-backup/config", "/admin/ftp-backup/run"]);
}
