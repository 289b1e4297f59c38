/*
[INPUT]:  wallets.json, optional settings file, environment variables
[OUTPUT]: Wallet list and immutable runtime settings
[POS]:    Configuration layer - assembled once at startup
[UPDATE]: When adding new configuration options
*/

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, Map};
use lightmining_adapter::onchain::{DEFAULT_CONTRACT_ADDRESS, DEFAULT_RPC_URL};
use lightmining_adapter::{ClientConfig, DEFAULT_BASE_URL, RetryPolicy};
use serde::Deserialize;
use thiserror::Error;

/// Wallet credentials as stored in `wallets.json`
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletConfig {
    pub address: String,
    private_key: String,
    #[serde(default)]
    proxy_url: Option<String>,
}

impl WalletConfig {
    pub fn new(address: &str, private_key: &str, proxy_url: Option<&str>) -> Self {
        Self {
            address: address.to_string(),
            private_key: private_key.to_string(),
            proxy_url: proxy_url.map(str::to_string),
        }
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Egress proxy for this wallet; blank entries mean a direct connection
    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .field("proxy_url", &self.proxy_url().map(|_| "<set>"))
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum WalletFileError {
    #[error("wallet file {0} not found")]
    Missing(PathBuf),
    #[error("failed to read wallet file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse wallet file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no wallets found in {0}")]
    Empty(PathBuf),
}

/// Load the wallet set. Missing, unreadable or empty files are errors.
pub fn load_wallets(path: &Path) -> Result<Vec<WalletConfig>, WalletFileError> {
    if !path.exists() {
        return Err(WalletFileError::Missing(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| WalletFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let wallets: Vec<WalletConfig> =
        serde_json::from_str(&content).map_err(|source| WalletFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if wallets.is_empty() {
        return Err(WalletFileError::Empty(path.to_path_buf()));
    }
    Ok(wallets)
}

/// Runtime settings, read once and passed by reference
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Light-mining API base URL
    pub api_url: String,
    /// Chain RPC used for the activation transaction
    pub rpc_url: String,
    /// Activation contract, `LIGHTMINING_CONTRACT`
    #[serde(rename = "contract")]
    pub contract_address: String,
    /// Send a webhook message after each successful activation
    #[serde(default)]
    pub notification: bool,
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Plain-text IP echo service; unset disables the egress check
    #[serde(default)]
    pub egress_check_url: Option<String>,
    pub retry_count: u32,
    pub retry_backoff_secs: u64,
    pub batch_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            notification: false,
            webhook_url: None,
            egress_check_url: None,
            retry_count: 3,
            retry_backoff_secs: 3,
            batch_interval_secs: 60 * 60,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load defaults, then the optional settings file, then the process
    /// environment (`LIGHTMINING_*`, `DISCORD_NOTIFICATION`, `DISCORD_WEBHOOK_URL`).
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::build(file, None)
    }

    /// Same as [`Settings::load`] but reads variables from `vars` instead of
    /// the process environment.
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, config::ConfigError> {
        Self::build(None, Some(vars))
    }

    fn build(
        file: Option<&Path>,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("rpc_url", defaults.rpc_url)?
            .set_default("contract", defaults.contract_address)?
            .set_default("notification", defaults.notification)?
            .set_default("retry_count", i64::from(defaults.retry_count))?
            .set_default("retry_backoff_secs", defaults.retry_backoff_secs as i64)?
            .set_default("batch_interval_secs", defaults.batch_interval_secs as i64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix("LIGHTMINING").source(vars.clone()))
            .add_source(Environment::with_prefix("DISCORD").source(vars))
            .build()?
            .try_deserialize()?;

        if settings.request_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(settings)
    }

    /// Webhook URL when notifications are enabled and a URL is set
    pub fn webhook(&self) -> Option<&str> {
        if !self.notification {
            return None;
        }
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            retry: RetryPolicy::new(self.retry_count, Duration::from_secs(self.retry_backoff_secs)),
            ..ClientConfig::default()
        }
    }

    pub fn batch_interval(&self) -> Duration {
        Duration::from_secs(self.batch_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use rstest::rstest;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::from_vars(Map::new()).unwrap();
        assert_eq!(settings.api_url, DEFAULT_BASE_URL);
        assert_eq!(settings.retry_count, 3);
        assert_eq!(settings.batch_interval(), Duration::from_secs(3600));
        assert_eq!(settings.client_config().retry.backoff, Duration::from_secs(3));
        assert!(settings.webhook().is_none());
    }

    #[rstest]
    #[case("true", true)]
    #[case("1", true)]
    #[case("yes", true)]
    #[case("on", true)]
    #[case("false", false)]
    fn test_discord_flag(#[case] flag: &str, #[case] enabled: bool) {
        let settings = Settings::from_vars(vars(&[
            ("DISCORD_NOTIFICATION", flag),
            ("DISCORD_WEBHOOK_URL", "https://discord.test/api/webhooks/1"),
        ]))
        .unwrap();
        assert_eq!(settings.notification, enabled);
        assert_eq!(
            settings.webhook().is_some(),
            enabled,
            "webhook should follow DISCORD_NOTIFICATION={flag}"
        );
    }

    #[test]
    fn test_enabled_without_url_has_no_webhook() {
        let settings = Settings::from_vars(vars(&[("DISCORD_NOTIFICATION", "true")])).unwrap();
        assert!(settings.notification);
        assert!(settings.webhook().is_none());
    }

    #[test]
    fn test_lightmining_overrides() {
        let settings = Settings::from_vars(vars(&[
            ("LIGHTMINING_API_URL", "http://localhost:9000"),
            ("LIGHTMINING_RETRY_COUNT", "5"),
            ("LIGHTMINING_EGRESS_CHECK_URL", "https://ip.test"),
            ("LIGHTMINING_CONTRACT", "0x0000000000000000000000000000000000000001"),
        ]))
        .unwrap();
        assert_eq!(
            settings.contract_address,
            "0x0000000000000000000000000000000000000001"
        );
        assert_eq!(settings.api_url, "http://localhost:9000");
        assert_eq!(settings.client_config().retry.max_attempts(), 6);
        assert_eq!(settings.egress_check_url.as_deref(), Some("https://ip.test"));
    }

    #[test]
    fn test_zero_request_timeout_rejected() {
        let err = Settings::from_vars(vars(&[("LIGHTMINING_REQUEST_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn test_load_wallets() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"address": "0xaaa", "privateKey": "0x01", "proxyUrl": "socks5://127.0.0.1:1080"}},
                {{"address": "0xbbb", "privateKey": "0x02", "proxyUrl": ""}},
                {{"address": "0xccc", "privateKey": "0x03"}}
            ]"#
        )
        .unwrap();

        let wallets = load_wallets(file.path()).unwrap();
        assert_eq!(wallets.len(), 3);
        assert_eq!(wallets[0].proxy_url(), Some("socks5://127.0.0.1:1080"));
        assert_eq!(wallets[1].proxy_url(), None);
        assert_eq!(wallets[2].private_key(), "0x03");
    }

    #[test]
    fn test_empty_wallet_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        assert!(matches!(
            load_wallets(file.path()),
            Err(WalletFileError::Empty(_))
        ));
    }

    #[test]
    fn test_missing_wallet_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallets.json");
        assert!(matches!(
            load_wallets(&path),
            Err(WalletFileError::Missing(_))
        ));
    }

    #[test]
    fn test_wallet_debug_redacts_key() {
        let wallet = WalletConfig::new("0xaaa", "0xsupersecret", Some("socks5://u:p@h:1"));
        let rendered = format!("{wallet:?}");
        assert!(!rendered.contains("supersecret"));
        assert!(!rendered.contains("u:p@h"));
    }
}
