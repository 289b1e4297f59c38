/*
[INPUT]:  Wallet set, settings, on-chain activator, optional notifier
[OUTPUT]: Endless sequence of batch passes with per-wallet outcomes
[POS]:    Orchestration layer - sequential wallet loop
[UPDATE]: When pass structure, pacing or isolation rules change
*/

use std::time::Duration;

use lightmining_adapter::{
    AuthManager, ClientConfig, EvmWalletSigner, LightminingClient, OnchainActivator,
};
use tracing::{error, info, warn};

use crate::config::{Settings, WalletConfig};
use crate::flow::MiningFlow;
use crate::notify::Notifier;
use crate::outcome::{BatchReport, WalletOutcome};

/// Runs every wallet in file order, one at a time, then sleeps.
pub struct BatchRunner {
    wallets: Vec<WalletConfig>,
    client_config: ClientConfig,
    activator: Box<dyn OnchainActivator>,
    notifier: Option<Box<dyn Notifier>>,
    egress_check_url: Option<String>,
    interval: Duration,
}

impl BatchRunner {
    pub fn new(
        wallets: Vec<WalletConfig>,
        settings: &Settings,
        activator: Box<dyn OnchainActivator>,
        notifier: Option<Box<dyn Notifier>>,
    ) -> Self {
        Self {
            wallets,
            client_config: settings.client_config(),
            activator,
            notifier,
            egress_check_url: settings.egress_check_url.clone(),
            interval: settings.batch_interval(),
        }
    }

    pub fn wallets(&self) -> &[WalletConfig] {
        &self.wallets
    }

    /// Repeat passes until the process is stopped
    pub async fn run_forever(&self) {
        loop {
            self.run_pass().await;
            info!(
                interval_secs = self.interval.as_secs(),
                "all wallets processed, cooling down before checking again"
            );
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One pass over all wallets; a wallet's failure never ends the pass
    pub async fn run_pass(&self) -> BatchReport {
        info!(wallet_count = self.wallets.len(), "starting processing all wallets");

        let mut report = BatchReport::default();
        for wallet in &self.wallets {
            let outcome = self.process_wallet(wallet).await;
            report.record(&outcome);
        }

        info!(
            activated = report.activated,
            cooling_down = report.cooling_down,
            skipped = report.skipped,
            inconsistent = report.inconsistent,
            auth_failed = report.auth_failed,
            "batch pass finished"
        );
        report
    }

    pub async fn process_wallet(&self, wallet: &WalletConfig) -> WalletOutcome {
        let address = wallet.address.as_str();
        info!(address, proxied = wallet.proxy_url().is_some(), "processing wallet");

        let client = match LightminingClient::with_proxy(&self.client_config, wallet.proxy_url()) {
            Ok(client) => client,
            Err(err) => {
                error!(address, error = %err, "failed to build client for wallet");
                return WalletOutcome::AuthFailed(err);
            }
        };

        if let Some(echo_url) = &self.egress_check_url {
            match client.egress_ip(echo_url).await {
                Ok(ip) => info!(address, egress_ip = %ip, "egress address"),
                Err(err) => warn!(address, error = %err, "egress check failed"),
            }
        }

        let signer = match EvmWalletSigner::for_address(address, wallet.private_key()) {
            Ok(signer) => signer,
            Err(err) => {
                error!(address, error = %err, "failed to load wallet key");
                return WalletOutcome::AuthFailed(err);
            }
        };

        let session = match AuthManager::new(&client).authenticate(&signer).await {
            Ok(session) => session,
            Err(err) => {
                error!(address, error = %err, "authentication failed, moving to next wallet");
                return WalletOutcome::AuthFailed(err);
            }
        };

        MiningFlow::new(&client, self.activator.as_ref(), self.notifier.as_deref())
            .run(wallet, &session)
            .await
    }
}
