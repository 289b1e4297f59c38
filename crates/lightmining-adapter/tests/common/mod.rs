/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for lightmining-adapter tests

use std::time::Duration;

use lightmining_adapter::{ClientConfig, LightminingClient, RetryPolicy};
use wiremock::MockServer;

/// Well-known development key and its checksummed address
#[allow(dead_code)]
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
#[allow(dead_code)]
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at `server` with no backoff between retries
pub fn fast_client(server: &MockServer) -> LightminingClient {
    LightminingClient::with_config(&ClientConfig {
        base_url: server.uri(),
        retry: RetryPolicy::new(3, Duration::ZERO),
        ..ClientConfig::default()
    })
    .expect("client init")
}
