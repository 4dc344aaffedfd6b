// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use drains_core::application::{DrainServiceError, StandardSyslogDrainService, SyslogDrainService};
use drains_core::domain::binding::{AppDrainRow, BindingCredentials, BindingRow, StoredCredentials};
use drains_core::domain::credentials::{CredentialDecryptor, DecryptionError};
use drains_core::domain::cursor::PageCursor;
use drains_core::domain::repository::{DrainBindingRepository, RepositoryError};
use drains_core::infrastructure::cipher::CredentialCipher;
use drains_core::infrastructure::repositories::{BindingRecord, InMemoryDrainBindingRepository};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

fn binding(app_guid: &str, app_name: &str, url: &str, cert: &str, key: &str) -> BindingRecord {
    BindingRecord {
        app_guid: app_guid.to_string(),
        app_name: app_name.to_string(),
        space_name: "dev space".to_string(),
        org_name: "My Org!".to_string(),
        syslog_drain_url: Some(url.to_string()),
        credentials: StoredCredentials::plaintext(
            serde_json::json!({ "cert": cert, "key": key }).to_string(),
        ),
    }
}

fn plaintext_cipher() -> Arc<CredentialCipher> {
    Arc::new(CredentialCipher::new(HashMap::new(), None))
}

fn service(repo: InMemoryDrainBindingRepository) -> StandardSyslogDrainService {
    StandardSyslogDrainService::new(Arc::new(repo), plaintext_cipher())
}

fn fleet() -> InMemoryDrainBindingRepository {
    InMemoryDrainBindingRepository::with_bindings([
        binding("guid-03", "api", "syslog://logs-b.example.com", "C1", "K1"),
        binding("guid-01", "web", "syslog://logs-a.example.com", "C1", "K1"),
        binding("guid-02", "worker", "syslog://logs-a.example.com", "C2", "K2"),
        binding("guid-03", "api", "syslog://logs-c.example.com", "", ""),
        binding("guid-04", "cron", "syslog://logs-b.example.com", "C1", "K9"),
        binding("guid-05", "batch", "https://logs-d.example.com", "C3", "K3"),
        binding("guid-01", "web", "syslog://logs-a.example.com", "C1", "K1"),
    ])
}

#[tokio::test]
async fn test_first_seen_key_wins_scenario() {
    let repo = InMemoryDrainBindingRepository::with_bindings([
        binding("g1", "app1", "syslog://a", "C1", "K1"),
        binding("g2", "app2", "syslog://a", "C1", "K2"),
    ]);

    let page = service(repo)
        .list_drain_destinations(PageCursor::default())
        .await
        .unwrap();

    assert_eq!(page.results.len(), 1);
    let destination = &page.results[0];
    assert_eq!(destination.url, "syslog://a");
    assert_eq!(destination.credentials.len(), 1);
    assert_eq!(destination.credentials[0].cert, "C1");
    assert_eq!(destination.credentials[0].key, "K1");
    let apps: Vec<_> = destination.credentials[0]
        .apps
        .iter()
        .map(|a| (a.hostname.as_str(), a.app_id.as_str()))
        .collect();
    assert_eq!(
        apps,
        vec![
            ("My-Org.dev-space.app1", "g1"),
            ("My-Org.dev-space.app2", "g2")
        ]
    );
    assert_eq!(page.next_id, Some(50));
}

#[tokio::test]
async fn test_app_drains_page() {
    let page = service(fleet())
        .list_app_drains(PageCursor::default())
        .await
        .unwrap();

    assert_eq!(page.results.len(), 5);
    assert_eq!(
        page.results["guid-01"].drains,
        vec!["syslog://logs-a.example.com", "syslog://logs-a.example.com"]
    );
    assert_eq!(
        page.results["guid-03"].drains,
        vec!["syslog://logs-b.example.com", "syslog://logs-c.example.com"]
    );
    assert_eq!(page.results["guid-03"].hostname, "My-Org.dev-space.api");
    assert_eq!(page.next_id, Some(50));
}

#[tokio::test]
async fn test_destinations_group_by_url_then_cert() {
    let page = service(fleet())
        .list_drain_destinations(PageCursor::default())
        .await
        .unwrap();

    let urls: Vec<_> = page.results.iter().map(|d| d.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://logs-d.example.com",
            "syslog://logs-a.example.com",
            "syslog://logs-b.example.com",
            "syslog://logs-c.example.com",
        ]
    );

    let logs_a = &page.results[1];
    assert_eq!(logs_a.credentials.len(), 2);
    assert_eq!(logs_a.credentials[0].cert, "C1");
    // guid-01 holds two bindings to the same URL and cert.
    let c1_apps: Vec<_> = logs_a.credentials[0].apps.iter().map(|a| a.app_id.as_str()).collect();
    assert_eq!(c1_apps, vec!["guid-01", "guid-01"]);
    assert_eq!(logs_a.credentials[1].cert, "C2");

    let logs_b = &page.results[2];
    assert_eq!(logs_b.credentials.len(), 1);
    assert_eq!(logs_b.credentials[0].key, "K1");
    assert_eq!(logs_b.credentials[0].apps.len(), 2);
}

#[tokio::test]
async fn test_empty_store() {
    let svc = service(InMemoryDrainBindingRepository::new());

    let v4 = svc.list_app_drains(PageCursor::default()).await.unwrap();
    assert!(v4.results.is_empty());
    assert_eq!(v4.next_id, None);

    let v5 = svc.list_drain_destinations(PageCursor::default()).await.unwrap();
    assert!(v5.results.is_empty());
    assert_eq!(v5.next_id, None);
}

#[tokio::test]
async fn test_page_past_the_end_terminates() {
    let svc = service(fleet());
    let cursor = PageCursor::new(100, 10).unwrap();
    assert_eq!(svc.list_app_drains(cursor).await.unwrap().next_id, None);
    assert_eq!(svc.list_drain_destinations(cursor).await.unwrap().next_id, None);
}

#[tokio::test]
async fn test_pagination_visits_every_app_once() {
    let svc = service(fleet());

    for batch_size in 1..=6 {
        let mut seen = Vec::new();
        let mut cursor = Some(PageCursor::new(0, batch_size).unwrap());
        while let Some(current) = cursor {
            let page = svc.list_app_drains(current).await.unwrap();
            assert!(page.results.len() as i64 <= batch_size);
            seen.extend(page.results.keys().cloned());
            cursor = page
                .next_id
                .map(|next| PageCursor::new(next, batch_size).unwrap());
        }
        assert_eq!(
            seen,
            vec!["guid-01", "guid-02", "guid-03", "guid-04", "guid-05"],
            "batch_size {batch_size}"
        );
    }
}

#[tokio::test]
async fn test_pagination_visits_every_url_once() {
    let svc = service(fleet());

    for batch_size in 1..=5 {
        let mut seen = Vec::new();
        let mut cursor = Some(PageCursor::new(0, batch_size).unwrap());
        while let Some(current) = cursor {
            let page = svc.list_drain_destinations(current).await.unwrap();
            assert!(page.results.len() as i64 <= batch_size);
            seen.extend(page.results.iter().map(|d| d.url.clone()));
            cursor = page
                .next_id
                .map(|next| PageCursor::new(next, batch_size).unwrap());
        }
        let distinct: BTreeSet<_> = seen.iter().cloned().collect();
        assert_eq!(seen.len(), 4, "batch_size {batch_size}");
        assert_eq!(distinct.len(), 4, "batch_size {batch_size}");
    }
}

#[tokio::test]
async fn test_same_cursor_same_bytes() {
    let svc = service(fleet());
    let cursor = PageCursor::new(1, 2).unwrap();

    let first = serde_json::to_string_pretty(&svc.list_drain_destinations(cursor).await.unwrap()).unwrap();
    let second = serde_json::to_string_pretty(&svc.list_drain_destinations(cursor).await.unwrap()).unwrap();
    assert_eq!(first, second);

    let first = serde_json::to_string_pretty(&svc.list_app_drains(cursor).await.unwrap()).unwrap();
    let second = serde_json::to_string_pretty(&svc.list_app_drains(cursor).await.unwrap()).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_encrypted_credentials_are_decrypted() {
    let cipher = Arc::new(CredentialCipher::new(
        HashMap::from([("k1".to_string(), "passphrase".to_string())]),
        Some("k1".to_string()),
    ));
    let stored = cipher
        .seal(r#"{"cert":"SECRET-CERT","key":"SECRET-KEY"}"#, "0123456789abcdef", Some("k1"), 32)
        .unwrap();

    let mut record = binding("g1", "app", "syslog://secure", "", "");
    record.credentials = stored;
    let svc = StandardSyslogDrainService::new(
        Arc::new(InMemoryDrainBindingRepository::with_bindings([record])),
        cipher,
    );

    let page = svc.list_drain_destinations(PageCursor::default()).await.unwrap();
    assert_eq!(page.results[0].credentials[0].cert, "SECRET-CERT");
    assert_eq!(page.results[0].credentials[0].key, "SECRET-KEY");
}

struct RejectingDecryptor;

impl CredentialDecryptor for RejectingDecryptor {
    fn decrypt(&self, _stored: &StoredCredentials) -> Result<BindingCredentials, DecryptionError> {
        Err(DecryptionError::AuthenticationFailed)
    }
}

#[tokio::test]
async fn test_decryption_failure_fails_whole_page() {
    let svc = StandardSyslogDrainService::new(Arc::new(fleet()), Arc::new(RejectingDecryptor));

    let err = svc
        .list_drain_destinations(PageCursor::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DrainServiceError::Credentials {
            source: DecryptionError::AuthenticationFailed,
            ..
        }
    ));

    // The per-app shape never touches credentials.
    assert!(svc.list_app_drains(PageCursor::default()).await.is_ok());
}

struct UnavailableStore;

#[async_trait]
impl DrainBindingRepository for UnavailableStore {
    async fn app_drain_page(&self, _cursor: PageCursor) -> Result<Vec<AppDrainRow>, RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn destination_binding_page(
        &self,
        _cursor: PageCursor,
    ) -> Result<Vec<BindingRow>, RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let svc = StandardSyslogDrainService::new(Arc::new(UnavailableStore), plaintext_cipher());

    assert!(matches!(
        svc.list_app_drains(PageCursor::default()).await,
        Err(DrainServiceError::Store(RepositoryError::Database(_)))
    ));
    assert!(matches!(
        svc.list_drain_destinations(PageCursor::default()).await,
        Err(DrainServiceError::Store(_))
    ));
}
