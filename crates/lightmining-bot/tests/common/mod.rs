/*
[INPUT]:  Mock API server and test wallets
[OUTPUT]: Shared fixtures: recording activator, recording responder, settings
[POS]:    Test infrastructure - shared across bot integration tests
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for lightmining-bot tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lightmining_adapter::{LightminingError, OnchainActivator};
use lightmining_bot::{Settings, WalletConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Development keys with their checksummed addresses
pub const WALLET_A: (&str, &str) = (
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
);
pub const WALLET_B: (&str, &str) = (
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
);

pub fn wallet(keys: (&str, &str)) -> WalletConfig {
    WalletConfig::new(keys.0, keys.1, None)
}

/// Settings aimed at `server` with zero backoff and zero batch interval
pub fn fast_settings(server: &MockServer) -> Settings {
    Settings {
        api_url: server.uri(),
        retry_backoff_secs: 0,
        batch_interval_secs: 0,
        ..Settings::default()
    }
}

/// Ordered log of side effects seen by a test
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Activator that records each call and answers with a fixed result
pub struct RecordingActivator {
    log: EventLog,
    tx_hash: Option<&'static str>,
}

impl RecordingActivator {
    pub fn succeeding(log: EventLog, tx_hash: &'static str) -> Self {
        Self {
            log,
            tx_hash: Some(tx_hash),
        }
    }

    pub fn failing(log: EventLog) -> Self {
        Self { log, tx_hash: None }
    }
}

#[async_trait]
impl OnchainActivator for RecordingActivator {
    async fn activate(&self, _private_key: &str) -> lightmining_adapter::Result<String> {
        self.log.lock().unwrap().push("onchain".to_string());
        self.tx_hash
            .map(str::to_string)
            .ok_or_else(|| LightminingError::Onchain("execution reverted".to_string()))
    }
}

/// wiremock responder that appends `label` to the event log on each hit
pub struct RecordingResponder {
    log: EventLog,
    label: &'static str,
    template: ResponseTemplate,
}

impl RecordingResponder {
    pub fn new(log: EventLog, label: &'static str, template: ResponseTemplate) -> Self {
        Self {
            log,
            label,
            template,
        }
    }
}

impl Respond for RecordingResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.log.lock().unwrap().push(self.label.to_string());
        self.template.clone()
    }
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/wallet/generateNonce"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"nonce": "Taker quest nonce"},
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wallet/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"token": "session-token"},
        })))
        .mount(server)
        .await;
}

pub async fn mount_user(server: &MockServer, tw_name: Option<&str>, reward: u64) {
    Mock::given(method("GET"))
        .and(path("/user/getUserInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"userId": 42, "twName": tw_name, "totalReward": reward},
        })))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, last_mining_time: i64) {
    Mock::given(method("GET"))
        .and(path("/assignment/totalMiningTime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"lastMiningTime": last_mining_time},
        })))
        .mount(server)
        .await;
}

pub async fn count_requests(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}
