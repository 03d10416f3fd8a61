// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Typed codec and transport behaviour against a stub HTTP server.

mod common;

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use serde_json::json;
use vds_provider::vds_codec::fetch_typed;
use vds_provider::vds_models::{CreateSshKeyRequest, VirtualServersResponse};
use vds_provider::vds_transport::TransportError;
use vds_provider::{ClientError, VdsClient, VdsClientConfig, VdsTransport};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn requests_carry_bearer_token_and_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/datacenters"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "datacenters": [{"id": 1, "name": "Москва: Rucloud"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let resp = client.list_datacenters().await.unwrap();

    assert_eq!(resp.datacenters.len(), 1);
    assert_eq!(resp.datacenters[0].name, "Москва: Rucloud");
    assert!(resp.datacenters[0].vps_tariffs.is_empty());
}

#[tokio::test]
async fn query_fragments_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/servers"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"servers": []})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = VdsTransport::new(VdsClientConfig::new(
        common::TOKEN,
        Some(format!("{}/v2", server.uri())),
    ))
    .unwrap();
    let resp: VirtualServersResponse =
        fetch_typed(&transport, "/servers", &["page=2", "per_page=50"])
            .await
            .unwrap();
    assert!(resp.servers.is_empty());
}

#[tokio::test]
async fn failed_submit_exposes_cause_and_decoded_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/ssh_keys"))
        .and(body_json(json!({"name": "deploy", "public_key": "ssh-ed25519 AAAA"})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "key already exists",
            "id": "ssh_key_exists"
        })))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let failure = client
        .create_ssh_key(&CreateSshKeyRequest {
            name: "deploy".to_string(),
            public_key: "ssh-ed25519 AAAA".to_string(),
        })
        .await
        .unwrap_err();

    let detail = failure.detail.as_ref().expect("error body should decode");
    assert_eq!(detail.message, "key already exists");
    assert_eq!(detail.id, "ssh_key_exists");
    assert!(matches!(
        failure.cause,
        ClientError::Transport(TransportError::Status { status, .. }) if status.as_u16() == 422
    ));
    assert!(failure.to_string().contains("key already exists"));
}

#[tokio::test]
async fn failed_submit_with_undecodable_body_keeps_the_cause() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/ssh_keys"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let failure = client
        .create_ssh_key(&CreateSshKeyRequest {
            name: "deploy".to_string(),
            public_key: String::new(),
        })
        .await
        .unwrap_err();

    assert!(failure.detail.is_none());
    match failure.cause {
        ClientError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 502);
            assert_eq!(body, "<html>bad gateway</html>");
        }
        other => panic!("unexpected cause: {other:?}"),
    }
}

#[tokio::test]
async fn successful_status_with_wrong_shape_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/os"))
        .respond_with(ResponseTemplate::new(200).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client.list_os().await.unwrap_err();

    match err {
        ClientError::Decode { body, .. } => assert_eq!(body, "maintenance"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn failed_read_keeps_the_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/servers/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client.get_server(404).await.unwrap_err();

    match err {
        ClientError::Transport(inner) => {
            assert!(inner.body().unwrap().contains("not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Serve one response whose body stops short of its declared length.
fn truncated_server(status_line: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let head = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: 500\r\n\r\n"
    );
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0_u8; 4096];
        let _ = stream.read(&mut buf);
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(br#"{"servers": ["#);
        let _ = stream.flush();
    });
    format!("http://{addr}/v2")
}

#[tokio::test]
async fn body_cut_short_on_success_is_a_transport_error() {
    let endpoint = truncated_server("200 OK");
    let client = VdsClient::new(VdsClientConfig::new(common::TOKEN, Some(endpoint))).unwrap();

    let err = client.list_servers().await.unwrap_err();
    assert!(
        matches!(err, ClientError::Transport(TransportError::Request(_))),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn body_cut_short_on_failure_is_a_transport_error() {
    let endpoint = truncated_server("500 Internal Server Error");
    let client = VdsClient::new(VdsClientConfig::new(common::TOKEN, Some(endpoint))).unwrap();

    let failure = client
        .create_ssh_key(&CreateSshKeyRequest {
            name: "deploy".to_string(),
            public_key: String::new(),
        })
        .await
        .unwrap_err();
    assert!(failure.detail.is_none());
    assert!(
        matches!(failure.cause, ClientError::Transport(TransportError::Request(_))),
        "unexpected cause: {:?}",
        failure.cause
    );
}
