#![allow(clippy::unwrap_used)]
// Orchestration tests for the managers against a wiremock appliance.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meowtail_api::{MeowtailClient, Session};
use meowtail_core::{
    AssumeYes, CoreError, DeleteOutcome, DhcpManager, Notifier, PortMapManager, PortMapRule,
    Protocol, RuleDraft,
};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    notes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl Notifier for Recorder {
    fn notify(&self, message: &str) {
        self.notes.lock().unwrap().push(message.to_owned());
    }
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_owned());
    }
}

fn client(server: &MockServer) -> MeowtailClient {
    MeowtailClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        Session::new(),
    )
}

async fn dhcp_setup() -> (MockServer, DhcpManager, Arc<Recorder>) {
    let server = MockServer::start().await;
    let recorder = Arc::new(Recorder::default());
    let manager = DhcpManager::new(client(&server), recorder.clone());
    (server, manager, recorder)
}

async fn portmap_setup() -> (MockServer, PortMapManager, Arc<Recorder>) {
    let server = MockServer::start().await;
    let recorder = Arc::new(Recorder::default());
    let manager = PortMapManager::new(client(&server), recorder.clone());
    (server, manager, recorder)
}

fn default_rule() -> PortMapRule {
    PortMapRule {
        protocol: Protocol::Tcp,
        external_port: 8080,
        internal_ip: "192.168.1.100".into(),
        internal_port: 80,
    }
}

// ── udhcpd ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_failed_gateway_set_keeps_state_and_skips_reload() {
    let (server, manager, recorder) = dhcp_setup().await;

    let initial = Mock::given(method("GET"))
        .and(path("/api/udhcpd/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "gateway": "10.0.0.1" })))
        .expect(1)
        .mount_as_scoped(&server)
        .await;
    manager.load_config().await.unwrap();
    drop(initial);

    Mock::given(method("POST"))
        .and(path("/api/udhcpd/config/gateway"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid gateway IP address" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/udhcpd/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "gateway": "changed" })))
        .expect(0)
        .mount(&server)
        .await;

    let result = manager.set_gateway("bogus").await;
    assert!(matches!(result, Err(CoreError::Rejected { .. })));
    assert_eq!(manager.config().gateway, "10.0.0.1");
    assert_eq!(recorder.errors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_successful_set_reloads_and_rebuilds_form() {
    let (server, manager, recorder) = dhcp_setup().await;

    Mock::given(method("POST"))
        .and(path("/api/udhcpd/config/subnet"))
        .and(body_json(json!({ "subnet": "255.255.0.0" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Subnet updated" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/udhcpd/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "netmask": "255.255.0.0",
            "dns": "9.9.9.9",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = manager.set_subnet("255.255.0.0").await.unwrap();
    assert_eq!(outcome.status, "Subnet updated");
    assert!(outcome.reloaded);
    assert_eq!(manager.config().subnet, "255.255.0.0");
    assert_eq!(manager.form().dns.slots(), &["9.9.9.9".to_string()]);
    assert!(manager.loaded_at().is_some());
    assert_eq!(
        recorder.notes.lock().unwrap().as_slice(),
        ["Subnet updated"]
    );
}

#[tokio::test]
async fn test_blank_dns_submit_sends_empty_list() {
    let (server, manager, _recorder) = dhcp_setup().await;

    Mock::given(method("POST"))
        .and(path("/api/udhcpd/config/dns"))
        .and(body_json(json!({ "servers": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/udhcpd/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "dns_servers": [] })))
        .expect(1)
        .mount(&server)
        .await;

    manager.edit_form(|f| {
        f.dns.set(0, "  ");
        f.dns.push_empty();
    });
    let outcome = manager.submit_dns().await.unwrap();
    assert_eq!(outcome.status, "ok");
    assert_eq!(manager.form().dns.slots(), &[String::new()]);
}

#[tokio::test]
async fn test_submit_lease_resets_inputs() {
    let (server, manager, _recorder) = dhcp_setup().await;

    Mock::given(method("POST"))
        .and(path("/api/udhcpd/config/lease"))
        .and(body_json(json!({ "mac": "aa:bb:cc:00:11:22", "ip": "10.0.0.5" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Lease added" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/udhcpd/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "leases": [{ "mac": "aa:bb:cc:00:11:22", "ip": "10.0.0.5" }],
        })))
        .mount(&server)
        .await;

    manager.edit_form(|f| {
        f.lease_mac = "aa:bb:cc:00:11:22".into();
        f.lease_ip = "10.0.0.5".into();
    });
    manager.submit_lease().await.unwrap();

    let form = manager.form();
    assert!(form.lease_mac.is_empty());
    assert!(form.lease_ip.is_empty());
    assert_eq!(manager.config().static_leases.len(), 1);
}

#[tokio::test]
async fn test_blank_lease_is_not_sent() {
    let (server, manager, _recorder) = dhcp_setup().await;

    let result = manager.add_lease("", "10.0.0.5").await;
    assert!(matches!(result, Err(CoreError::ValidationFailed { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_restart_reloads_config_then_status() {
    let (server, manager, _recorder) = dhcp_setup().await;

    Mock::given(method("POST"))
        .and(path("/api/udhcpd/restart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "udhcpd restarted" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/udhcpd/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/udhcpd/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "running": true })))
        .expect(1)
        .mount(&server)
        .await;

    manager.restart().await.unwrap();
    assert!(manager.status().running);

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_owned())
        .collect();
    assert_eq!(
        paths,
        ["/api/udhcpd/restart", "/api/udhcpd/config", "/api/udhcpd/status"]
    );
}

#[tokio::test]
async fn test_reload_failure_still_reports_success() {
    let (server, manager, recorder) = dhcp_setup().await;

    Mock::given(method("POST"))
        .and(path("/api/udhcpd/config/interface"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Interface updated" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/udhcpd/config"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = manager.set_interface("br0").await.unwrap();
    assert!(!outcome.reloaded);
    assert_eq!(recorder.errors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_status_is_false_on_server_error() {
    let (server, manager, _recorder) = dhcp_setup().await;

    Mock::given(method("GET"))
        .and(path("/api/udhcpd/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!manager.reload_status().await.running);
}

#[tokio::test]
async fn test_status_is_false_on_non_json_body_with_multibyte_text() {
    let (server, manager, _recorder) = dhcp_setup().await;

    Mock::given(method("GET"))
        .and(path("/api/udhcpd/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(format!("{}é trailing", "x".repeat(199))),
        )
        .mount(&server)
        .await;

    assert!(!manager.reload_status().await.running);
}

#[tokio::test]
async fn test_status_is_false_on_network_failure() {
    let client = MeowtailClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:1").unwrap(),
        Session::new(),
    );
    let manager = DhcpManager::new(client, Arc::new(Recorder::default()));
    assert!(!manager.reload_status().await.running);
}

// ── Port mapping ────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_rule_is_followed_by_exactly_one_reload() {
    let (server, manager, _recorder) = portmap_setup().await;

    Mock::given(method("POST"))
        .and(path("/api/portmap/rule"))
        .and(body_json(json!({
            "protocol": "tcp",
            "external_port": 8080,
            "internal_ip": "192.168.1.100",
            "internal_port": 80
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Rule added" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/portmap/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "external_interface": "eth0",
            "rules": [{
                "protocol": "tcp",
                "external_port": 8080,
                "internal_ip": "192.168.1.100",
                "internal_port": 80
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    manager.edit_form(|f| f.draft.protocol = "TCP".into());
    manager.submit_rule().await.unwrap();

    assert_eq!(manager.config().rules, vec![default_rule()]);
    assert_eq!(manager.form().draft, RuleDraft::default());
    assert_eq!(manager.form().interface, "eth0");
}

#[tokio::test]
async fn test_invalid_draft_sends_nothing() {
    let (server, manager, _recorder) = portmap_setup().await;

    manager.edit_form(|f| f.draft.internal_port = "70000".into());
    let result = manager.submit_rule().await;

    assert!(matches!(result, Err(CoreError::ValidationFailed { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_declined_delete_sends_no_requests() {
    let (server, manager, _recorder) = portmap_setup().await;
    let prompts = Mutex::new(Vec::new());

    let decline = |prompt: &str| {
        prompts.lock().unwrap().push(prompt.to_owned());
        false
    };
    let outcome = manager.delete_rule(&default_rule(), &decline).await.unwrap();

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert!(server.received_requests().await.unwrap().is_empty());
    assert_eq!(
        prompts.lock().unwrap().as_slice(),
        ["Are you sure you want to delete the rule TCP:8080?"]
    );
}

#[tokio::test]
async fn test_confirmed_delete_sends_rule_and_reloads() {
    let (server, manager, _recorder) = portmap_setup().await;

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
    Mock::given(method("GET"))
        .and(path("/api/portmap/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "external_interface": "eth0",
            "rules": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = manager.delete_rule(&default_rule(), &AssumeYes).await.unwrap();
    match outcome {
        DeleteOutcome::Deleted(o) => assert_eq!(o.status, "Rule deleted"),
        DeleteOutcome::Declined => panic!("AssumeYes never declines"),
    }
    assert!(manager.config().rules.is_empty());
}

#[tokio::test]
async fn test_failed_delete_keeps_rules() {
    let (server, manager, recorder) = portmap_setup().await;

    let initial = Mock::given(method("GET"))
        .and(path("/api/portmap/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "external_interface": "eth0",
            "rules": [{
                "protocol": "tcp",
                "external_port": 8080,
                "internal_ip": "192.168.1.100",
                "internal_port": 80
            }]
        })))
        .mount_as_scoped(&server)
        .await;
    manager.load_config().await.unwrap();
    drop(initial);

    Mock::given(method("DELETE"))
        .and(path("/api/portmap/rule"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Rule not found" })))
        .mount(&server)
        .await;

    let result = manager.delete_rule(&default_rule(), &AssumeYes).await;
    assert!(result.is_err());
    assert_eq!(manager.config().rules, vec![default_rule()]);
    assert_eq!(
        recorder.errors.lock().unwrap().as_slice(),
        ["Failed to delete rule: Rule not found"]
    );
}

#[tokio::test]
async fn test_non_standard_protocol_rule_is_kept_and_deleted_verbatim() {
    let (server, manager, _recorder) = portmap_setup().await;
    let stored = json!({
        "protocol": "TCP",
        "external_port": 22,
        "internal_ip": "192.168.1.10",
        "internal_port": 22
    });

    let initial = Mock::given(method("GET"))
        .and(path("/api/portmap/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "external_interface": "eth0",
            "rules": [stored.clone()]
        })))
        .mount_as_scoped(&server)
        .await;
    let config = manager.load_config().await.unwrap();
    drop(initial);

    assert_eq!(config.rules.len(), 1);
    let held = config.rules[0].clone();
    assert_eq!(held.protocol, Protocol::Other("TCP".into()));

    Mock::given(method("DELETE"))
        .and(path("/api/portmap/rule"))
        .and(body_json(stored))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/portmap/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rules": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = manager.delete_rule(&held, &AssumeYes).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Deleted(_)));
    assert!(manager.config().rules.is_empty());
}
