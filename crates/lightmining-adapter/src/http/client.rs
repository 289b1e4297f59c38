/*
[INPUT]:  HTTP configuration (base URL, timeouts, retry policy, egress proxy)
[OUTPUT]: Per-wallet reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, Proxy, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::Session;
use crate::http::{LightminingError, Result, RetryPolicy};

/// Base URL for the light-mining API
pub const DEFAULT_BASE_URL: &str = "https://lightmining-api.taker.xyz/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// HTTP client for the light-mining API, bound to one egress route
#[derive(Debug, Clone)]
pub struct LightminingClient {
    http_client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl LightminingClient {
    /// Create a direct client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a direct client with custom configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Self::with_proxy(config, None)
    }

    /// Create a client whose traffic leaves through `proxy_url`.
    ///
    /// Accepts `http://`, `https://`, `socks5://` and `socks5h://` proxies.
    pub fn with_proxy(config: &ClientConfig, proxy_url: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        if let Some(url) = proxy_url {
            let proxy = Proxy::all(url)
                .map_err(|e| LightminingError::Config(format!("Invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: parse_base_url(&config.base_url)?,
            retry: config.retry,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build request builder for an unauthenticated endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Build request builder carrying the session's bearer token
    pub(crate) fn request_with_session(
        &self,
        method: Method,
        endpoint: &str,
        session: &Session,
    ) -> Result<RequestBuilder> {
        Ok(self.request(method, endpoint)?.bearer_auth(session.token()))
    }

    /// Send a request once and decode the JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&body).into_owned();
            return Err(LightminingError::api_error(status, message));
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Send the request produced by `build` under the client's retry policy.
    ///
    /// `build` runs once per attempt since a sent request cannot be reused.
    pub(crate) async fn call<T, F>(&self, operation: &'static str, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> Result<RequestBuilder>,
    {
        let build = &build;
        debug!(operation, "calling api");
        self.retry
            .run(operation, move || async move {
                let builder = build()?;
                self.send_json(builder).await
            })
            .await
    }

    /// Fetch the public address seen by `echo_url`, single attempt
    pub async fn egress_ip(&self, echo_url: &str) -> Result<String> {
        let url = Url::parse(echo_url)?;
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LightminingError::api_error(status, body));
        }

        Ok(body.trim().to_string())
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}
