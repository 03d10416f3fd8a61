// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Provider configuration and lookups against a stub HTTP server.

use serde_json::json;
use vds_provider::{LookupError, ProviderConfig, VdsProvider};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn provider_for(server: &MockServer) -> VdsProvider {
    VdsProvider::configure(&ProviderConfig {
        token: Some("provider-token".to_string()),
        endpoint: Some(format!("{}/v2", server.uri())),
    })
    .unwrap()
}

async fn mount_datacenters(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/datacenters"))
        .and(header("authorization", "Bearer provider-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "datacenters": [
                {"id": 1, "name": "Москва: Россия, Rucloud"},
                {"id": 2, "name": "Франкфурт: Германия"},
                {"id": 3, "name": "LDN1:UK-1"}
            ]
        })))
        .mount(server)
        .await;
}

async fn mount_os(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/os"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "os": [
                {"id": 42, "name": "Ubuntu 20.04 (LTS)", "is_active": true, "type": "linux",
                 "ssh_keys_supported": true, "os_requirements": {"cpu": 1, "ram": 0.5, "drive": 10}},
                {"id": 7, "name": "Windows Server 2022", "is_active": false, "type": "windows"}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn datacenters_carry_code_and_country() {
    let server = MockServer::start().await;
    mount_datacenters(&server).await;
    let provider = provider_for(&server).await;

    let all = provider.datacenters().await.unwrap();
    let codes: Vec<&str> = all.iter().map(|dc| dc.code.as_str()).collect();
    assert_eq!(codes, ["MOSKVA", "FRANKFURT", "LDN1"]);
    assert_eq!(all[0].country, "RU");
    assert_eq!(all[1].country_name.as_deref(), Some("Germany"));
    assert_eq!(all[2].country, "");
    assert_eq!(all[2].country_name, None);
}

#[tokio::test]
async fn datacenter_by_code_finds_or_reports_missing() {
    let server = MockServer::start().await;
    mount_datacenters(&server).await;
    let provider = provider_for(&server).await;

    let dc = provider.datacenter_by_code("FRANKFURT").await.unwrap();
    assert_eq!(dc.id, 2);

    let err = provider.datacenter_by_code("TOKYO").await.unwrap_err();
    assert!(matches!(err, LookupError::NotFound { ref code, .. } if code == "TOKYO"));
}

#[tokio::test]
async fn os_by_code_ignores_input_case() {
    let server = MockServer::start().await;
    mount_os(&server).await;
    let provider = provider_for(&server).await;

    let os = provider.os_by_code("42-Ubuntu-20.04-LTS").await.unwrap();
    assert_eq!(os.id, 42);
    assert_eq!(os.code, "42-ubuntu-20.04-lts");
    assert!(os.ssh_keys_supported);

    let all = provider.operating_systems().await.unwrap();
    assert_eq!(all[1].code, "7-windows-server-2022");
    assert!(!all[1].is_active);
}

#[tokio::test]
async fn server_and_key_lists_become_states() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": [
                {"virtual_server_id": 7, "status": "active", "cpu": 2, "ram": 4.0},
                {"virtual_server_id": 8, "status": "stopped"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/ssh_keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ssh_keys": [{"ssh_key_id": "k1", "name": "deploy"}]
        })))
        .mount(&server)
        .await;
    let provider = provider_for(&server).await;

    let servers = provider.servers().await.unwrap();
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0].id, 7);
    assert_eq!(servers[0].cpu, 2);
    assert_eq!(servers[1].status.as_deref(), Some("stopped"));
    assert_eq!(servers[1].ip_address, None);

    let keys = provider.ssh_key_list().await.unwrap();
    assert_eq!(keys[0].ssh_key_id.as_deref(), Some("k1"));
    assert_eq!(keys[0].name, "deploy");
}

#[tokio::test]
async fn lookup_failure_is_a_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/os"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad token"})))
        .mount(&server)
        .await;
    let provider = provider_for(&server).await;

    let err = provider.os_by_code("centos-7").await.unwrap_err();
    assert!(matches!(err, LookupError::Client { what: "OS list", .. }));
}
