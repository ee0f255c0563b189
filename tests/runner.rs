mod common;

use chrono::NaiveDate;
use common::*;
use listing_digest::{Config, Error, Runner};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 21).unwrap()
}

fn config(tmp: &TempDir, server: &MockServer) -> Config {
    Config {
        maildir: tmp.path().join("Casas"),
        dump_dir: tmp.path().join("html"),
        webhook_url: format!("{}/gmah", server.uri()),
        public_base_url: "http://digest.local".into(),
        ..Config::default()
    }
}

fn deliver(maildir: &Path, name: &str, raw: Vec<u8>) {
    let new_dir = maildir.join("new");
    fs::create_dir_all(&new_dir).unwrap();
    fs::write(new_dir.join(name), raw).unwrap();
}

#[tokio::test]
async fn run_writes_digest_marks_seen_and_notifies() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let cfg = config(&tmp, &server);

    deliver(
        &cfg.maildir,
        "0001.eml",
        alert("idealista <noreply@idealista.pt>", "Nova casa", &[IDEALISTA_HTML]),
    );
    deliver(
        &cfg.maildir,
        "0002.eml",
        alert(
            "Casa Sapo <alertas@casa.sapo.pt>",
            "=?UTF-8?Q?Im=C3=B3veis_da_mediadora_Loben?=",
            &[CASA_SAPO_HTML],
        ),
    );

    Mock::given(method("POST"))
        .and(path("/gmah"))
        .and(body_partial_json(json!({
            "lookup": "false",
            "date": "2024-09-21",
            "link": "http://digest.local/dump/2024-09-21_serve.html",
            "count": "2",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = Runner::new(cfg.clone()).unwrap().run(date()).await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.listings, 1);
    assert!(report.notified);
    assert!(report.error.is_none());

    let digest = report.digest_path.expect("digest written");
    assert_eq!(digest, cfg.dump_dir.join("2024-09-21_serve.html"));
    let html = fs::read_to_string(&digest).unwrap();
    assert!(html.contains("https://www.idealista.pt/imovel/123"));
    assert!(html.contains("Apartamento T3 160000€"));
    assert!(!html.contains("Loben"));

    assert_eq!(fs::read_dir(cfg.maildir.join("new")).unwrap().count(), 0);
    assert!(cfg.maildir.join("cur").join("0001.eml:2,S").is_file());
    assert!(cfg.maildir.join("cur").join("0002.eml:2,S").is_file());

    let requests = server.received_requests().await.unwrap();
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(payload.get("error").is_none());
}

#[tokio::test]
async fn missing_maildir_is_reported_to_the_bot() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gmah"))
        .and(body_partial_json(json!({ "lookup": "false", "count": "0" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = Runner::new(config(&tmp, &server)).unwrap().run(date()).await;

    assert!(report.digest_path.is_none());
    assert!(report.error.is_some());
    assert!(report.notified);

    let requests = server.received_requests().await.unwrap();
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(payload["error"].as_str().unwrap().contains("io error"));
}

#[tokio::test]
async fn failed_move_keeps_message_unread_and_others_in_digest() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let cfg = config(&tmp, &server);
    deliver(
        &cfg.maildir,
        "0001.eml",
        alert("idealista <noreply@idealista.pt>", "Nova casa", &[IDEALISTA_HTML]),
    );
    deliver(
        &cfg.maildir,
        "0002.eml",
        alert("CasaYes <alertas@casayes.pt>", "Novo imóvel", &[CASAYES_HTML]),
    );
    // a non-empty directory where 0002 would land makes its rename fail
    fs::create_dir_all(cfg.maildir.join("cur").join("0002.eml:2,S").join("x")).unwrap();

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "lookup": "false", "count": "2" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = Runner::new(cfg.clone()).unwrap().run(date()).await;

    assert!(report.error.is_none());
    assert_eq!(report.processed, 2);
    assert_eq!(report.listings, 2);
    let html = fs::read_to_string(report.digest_path.unwrap()).unwrap();
    assert!(html.contains("https://www.idealista.pt/imovel/123"));
    assert!(html.contains("Moradia T3 Esgueira Aveiro"));

    assert!(cfg.maildir.join("cur").join("0001.eml:2,S").is_file());
    assert!(cfg.maildir.join("new").join("0002.eml").is_file());
}

#[tokio::test]
async fn unwritable_digest_leaves_mail_unread_and_reports_count() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let cfg = config(&tmp, &server);
    deliver(
        &cfg.maildir,
        "0001.eml",
        alert("idealista <noreply@idealista.pt>", "Nova casa", &[IDEALISTA_HTML]),
    );
    fs::write(&cfg.dump_dir, "not a directory").unwrap();

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "lookup": "false", "count": "1" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = Runner::new(cfg.clone()).unwrap().run(date()).await;

    assert!(matches!(report.error, Some(Error::Io(_))));
    assert!(report.digest_path.is_none());
    assert_eq!(report.processed, 1);
    assert!(report.notified);
    assert!(cfg.maildir.join("new").join("0001.eml").is_file());
    assert!(!cfg.maildir.join("cur").exists());

    let requests = server.received_requests().await.unwrap();
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(payload["error"].as_str().unwrap().starts_with("io error"));
}

#[tokio::test]
async fn rejected_notification_does_not_lose_the_digest() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let cfg = config(&tmp, &server);
    fs::create_dir_all(cfg.maildir.join("new")).unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let report = Runner::new(cfg).unwrap().run(date()).await;
    assert!(!report.notified);
    assert_eq!(report.processed, 0);
    assert!(report.digest_path.unwrap().is_file());
}

#[tokio::test]
async fn keeps_messages_unread_when_configured() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let cfg = Config {
        mark_seen: false,
        ..config(&tmp, &server)
    };
    deliver(
        &cfg.maildir,
        "0001.eml",
        alert("CasaYes <alertas@casayes.pt>", "Novo imóvel", &[CASAYES_HTML]),
    );

    let report = Runner::without_notifier(cfg.clone()).unwrap().run(date()).await;
    assert_eq!(report.listings, 1);
    assert!(!report.notified);
    assert!(cfg.maildir.join("new").join("0001.eml").is_file());
}

#[tokio::test]
async fn lookup_finds_existing_digest() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let cfg = config(&tmp, &server);
    fs::create_dir_all(&cfg.dump_dir).unwrap();
    fs::write(cfg.dump_dir.join("2024-09-21_serve.html"), "<html></html>").unwrap();

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "lookup": "true",
            "date": "21/09/2024",
            "link": "http://digest.local/dump/2024-09-21_serve.html",
            "count": "",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let payload = Runner::new(cfg).unwrap().lookup("21/09/2024").await.unwrap();
    assert_eq!(payload.error, None);
}

#[tokio::test]
async fn lookup_reports_missing_digest() {
    let tmp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "lookup": "true", "date": "01/01/2024" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let payload = Runner::new(config(&tmp, &server))
        .unwrap()
        .lookup("01/01/2024")
        .await
        .unwrap();
    assert!(payload.error.unwrap().contains("2024-01-01"));
    assert_eq!(payload.link, "http://digest.local/dump/");
}
