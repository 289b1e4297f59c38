/*
[INPUT]:  Public API exports for lightmining-bot crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod eligibility;
pub mod flow;
pub mod notify;
pub mod outcome;
pub mod runner;

// Re-export main types for convenience
pub use config::{Settings, WalletConfig, load_wallets};
pub use notify::{DiscordWebhook, Notifier};
pub use outcome::{ActivationRecord, BatchReport, SkipReason, WalletOutcome};
pub use runner::BatchRunner;
