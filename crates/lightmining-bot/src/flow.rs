/*
[INPUT]:  Authenticated session, wallet, API client, activator, notifier
[OUTPUT]: WalletOutcome for this wallet's cycle
[POS]:    Domain layer - eligibility check and two-phase activation
[UPDATE]: When activation ordering or skip rules change
*/

use chrono::Utc;
use lightmining_adapter::{LightminingClient, OnchainActivator, Session, UserInfo};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::config::WalletConfig;
use crate::eligibility::{self, Eligibility};
use crate::notify::Notifier;
use crate::outcome::{ActivationRecord, SkipReason, WalletOutcome};

/// Eligibility and mining steps for one authenticated wallet
pub struct MiningFlow<'a> {
    client: &'a LightminingClient,
    activator: &'a dyn OnchainActivator,
    notifier: Option<&'a dyn Notifier>,
}

impl<'a> MiningFlow<'a> {
    pub fn new(
        client: &'a LightminingClient,
        activator: &'a dyn OnchainActivator,
        notifier: Option<&'a dyn Notifier>,
    ) -> Self {
        Self {
            client,
            activator,
            notifier,
        }
    }

    pub async fn run(&self, wallet: &WalletConfig, session: &Session) -> WalletOutcome {
        let address = wallet.address.as_str();

        // Step 1: user info, bound social account required
        info!(address, "checking user info");
        let Some(user) = self.user_info(session).await else {
            error!(address, "failed to get user data, skipping wallet");
            return WalletOutcome::Skipped(SkipReason::UserInfoUnavailable);
        };
        info!(
            address,
            user_id = user.user_id.as_deref().unwrap_or("-"),
            tw_name = user.social_handle().unwrap_or("-"),
            total_reward = ?user.total_reward,
            "user info"
        );
        if user.social_handle().is_none() {
            warn!(address, "wallet is not bound to X/Twitter, skipping");
            return WalletOutcome::Skipped(SkipReason::SocialUnbound);
        }

        // Step 2: mining status
        info!(address, "checking miner status");
        let status = match self.client.get_mining_status(session).await {
            Ok(envelope) => envelope.data,
            Err(err) => {
                error!(address, error = %err, "failed to get mining status");
                None
            }
        };
        let Some(status) = status else {
            return WalletOutcome::Skipped(SkipReason::StatusUnavailable);
        };

        // Step 3: cooldown
        let last_mining_time = status.last_mining_time();
        info!(address, last_mining_time, "last mining time");
        if let Eligibility::CoolingDown { next_eligible } =
            eligibility::check(last_mining_time, Utc::now())
        {
            info!(address, next_eligible = %next_eligible, "mining already started, waiting for next window");
            return WalletOutcome::CoolingDown { next_eligible };
        }

        // Step 4: on-chain activation gates the off-chain one
        info!(address, "trying to start mining");
        let tx_hash = match self.activator.activate(wallet.private_key()).await {
            Ok(hash) if !hash.trim().is_empty() => hash,
            Ok(_) => {
                error!(address, "on-chain activation returned no transaction hash");
                return WalletOutcome::Skipped(SkipReason::OnchainFailed);
            }
            Err(err) => {
                error!(address, error = %err, "error mining on-chain");
                return WalletOutcome::Skipped(SkipReason::OnchainFailed);
            }
        };
        info!(address, tx_hash = %tx_hash, "on-chain activation succeeded");

        // Step 5: off-chain activation
        if let Err(err) = self.client.start_mining(session).await {
            error!(
                address,
                tx_hash = %tx_hash,
                error = %err,
                "off-chain activation failed after on-chain success; manual reconciliation needed"
            );
            return WalletOutcome::Inconsistent { tx_hash };
        }
        info!(address, "off-chain activation succeeded");

        // Step 6: report, notify only with fresh user data
        info!(address, "rechecking user info after activation");
        let user_after = self.user_info(session).await;
        let record = ActivationRecord {
            address: address.to_string(),
            onchain_tx_hash: tx_hash,
            offchain_confirmed: true,
            reward_before: user.total_reward,
            reward_after: user_after.as_ref().and_then(|u| u.total_reward),
        };
        log_rewards(&record);

        if user_after.is_none() {
            error!(address, "failed to get user data after activation, notification not sent");
            return WalletOutcome::Activated(record);
        }

        if let Some(notifier) = self.notifier {
            match notifier.notify(&record).await {
                Ok(()) => info!(address, "activation notification sent"),
                Err(err) => warn!(address, error = %err, "failed to send activation notification"),
            }
        }

        WalletOutcome::Activated(record)
    }

    async fn user_info(&self, session: &Session) -> Option<UserInfo> {
        match self.client.get_user_info(session).await {
            Ok(envelope) => envelope.data,
            Err(err) => {
                error!(address = session.address(), error = %err, "failed to get user info");
                None
            }
        }
    }
}

fn log_rewards(record: &ActivationRecord) {
    let show = |reward: Option<Decimal>| reward.map(|r| r.to_string());
    info!(
        address = %record.address,
        reward_before = ?show(record.reward_before),
        reward_after = ?show(record.reward_after),
        "activation complete"
    );
}
