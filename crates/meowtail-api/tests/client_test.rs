#![allow(clippy::unwrap_used)]
// Integration tests for `MeowtailClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meowtail_api::{Error, MeowtailClient, PortMapRulePayload, Session};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, MeowtailClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = MeowtailClient::with_client(reqwest::Client::new(), base_url, Session::new());
    (server, client)
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

// ── Session decoration ──────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_attached_when_held() {
    let (server, client) = setup().await;
    client.session().set_token(secret("tok-123"));

    Mock::given(method("GET"))
        .and(path("/api/udhcpd/status"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "running": true })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client.dhcp_status().await.unwrap();
    assert!(status.running);
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/udhcpd/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "running": false })))
        .mount(&server)
        .await;

    client.dhcp_status().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "username": "admin", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh" })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client.login("admin", &secret("hunter2")).await.unwrap();
    assert_eq!(token.expose_secret(), "fresh");
    assert!(client.session().has_token());
}

#[tokio::test]
async fn test_login_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let result = client.login("admin", &secret("wrong")).await;
    match result {
        Err(Error::Authentication { message }) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
    assert!(!client.session().has_token());
}

#[tokio::test]
async fn test_logged_in_on_200() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/logined"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client.is_logged_in().await);
}

#[tokio::test]
async fn test_not_logged_in_on_401() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/logined"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!client.is_logged_in().await);
}

#[tokio::test]
async fn test_not_logged_in_on_500() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/logined"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!client.is_logged_in().await);
}

#[tokio::test]
async fn test_not_logged_in_on_network_failure() {
    let client = MeowtailClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:1").unwrap(),
        Session::new(),
    );
    assert!(!client.is_logged_in().await);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (_server, client) = setup().await;
    client.session().set_token(secret("tok"));
    client.logout();
    assert!(!client.session().has_token());
}

// ── udhcpd ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_dns_list_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/udhcpd/config/dns"))
        .and(body_json(json!({ "servers": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "DNS updated" })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.set_dhcp_dns(&[]).await.unwrap();
    assert_eq!(resp.status_or_ok(), "DNS updated");
}

#[tokio::test]
async fn test_remove_lease_sends_mac_in_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/udhcpd/config/lease"))
        .and(body_json(json!({ "mac": "aa:bb:cc:00:11:22" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.remove_dhcp_lease("aa:bb:cc:00:11:22").await.unwrap();
    assert_eq!(resp.status_or_ok(), "ok");
}

#[tokio::test]
async fn test_null_config_is_value_null() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/udhcpd/config"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let config = client.dhcp_config().await.unwrap();
    assert!(config.is_null());
}

#[tokio::test]
async fn test_error_body_message_surfaces() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/udhcpd/config/gateway"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid gateway IP address" })),
        )
        .mount(&server)
        .await;

    let err = client.set_dhcp_gateway("not-an-ip").await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid gateway IP address");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/udhcpd/config"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.dhcp_config().await.unwrap_err();
    assert!(err.is_auth_expired());
}

// ── Port mapping ────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_rule_sends_full_rule() {
    let (server, client) = setup().await;
    let rule = PortMapRulePayload {
        protocol: "tcp".into(),
        external_port: 8080,
        internal_ip: "192.168.1.100".into(),
        internal_port: 80,
    };

    Mock::given(method("DELETE"))
        .and(path("/api/portmap/rule"))
        .and(body_json(json!({
            "protocol": "tcp",
            "external_port": 8080,
            "internal_ip": "192.168.1.100",
            "internal_port": 80
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Rule deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.delete_portmap_rule(&rule).await.unwrap();
    assert_eq!(resp.status_or_ok(), "Rule deleted");
}

#[tokio::test]
async fn test_portmap_config_decodes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/portmap/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "external_interface": "eth0",
            "rules": [{
                "protocol": "udp",
                "external_port": 53,
                "internal_ip": "10.0.0.2",
                "internal_port": 5353
            }]
        })))
        .mount(&server)
        .await;

    let config = client.portmap_config().await.unwrap();
    assert_eq!(config.external_interface, "eth0");
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].internal_port, 5353);
}
