/*
[INPUT]:  Per-wallet flow results
[OUTPUT]: Wallet outcomes, activation records and pass summaries
[POS]:    Domain layer - reporting types
[UPDATE]: When adding new skip reasons or outcome kinds
*/

use std::fmt;

use chrono::{DateTime, Utc};
use lightmining_adapter::LightminingError;
use rust_decimal::Decimal;

/// Result of one eligible activation, kept only long enough to report it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRecord {
    pub address: String,
    pub onchain_tx_hash: String,
    pub offchain_confirmed: bool,
    pub reward_before: Option<Decimal>,
    pub reward_after: Option<Decimal>,
}

/// Why a wallet stopped before activation this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UserInfoUnavailable,
    SocialUnbound,
    StatusUnavailable,
    OnchainFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::UserInfoUnavailable => "user info unavailable",
            SkipReason::SocialUnbound => "no X/Twitter account bound",
            SkipReason::StatusUnavailable => "mining status unavailable",
            SkipReason::OnchainFailed => "on-chain activation failed",
        };
        f.write_str(text)
    }
}

/// What happened to one wallet in one pass
#[derive(Debug)]
pub enum WalletOutcome {
    Activated(ActivationRecord),
    CoolingDown { next_eligible: DateTime<Utc> },
    Skipped(SkipReason),
    /// On-chain activation landed but the off-chain confirmation did not
    Inconsistent { tx_hash: String },
    AuthFailed(LightminingError),
}

/// Outcome counts for one batch pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub activated: usize,
    pub cooling_down: usize,
    pub skipped: usize,
    pub inconsistent: usize,
    pub auth_failed: usize,
}

impl BatchReport {
    pub fn record(&mut self, outcome: &WalletOutcome) {
        match outcome {
            WalletOutcome::Activated(_) => self.activated += 1,
            WalletOutcome::CoolingDown { .. } => self.cooling_down += 1,
            WalletOutcome::Skipped(_) => self.skipped += 1,
            WalletOutcome::Inconsistent { .. } => self.inconsistent += 1,
            WalletOutcome::AuthFailed(_) => self.auth_failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.activated + self.cooling_down + self.skipped + self.inconsistent + self.auth_failed
    }
}
