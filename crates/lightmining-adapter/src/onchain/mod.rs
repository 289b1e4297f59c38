/*
[INPUT]:  Wallet private key and chain endpoint
[OUTPUT]: Transaction hash of the activation call
[POS]:    On-chain layer - activation transaction primitive
[UPDATE]: When the activation contract or submission flow changes
*/

pub mod activator;

pub use activator::{ContractActivator, DEFAULT_CONTRACT_ADDRESS, DEFAULT_RPC_URL};

use async_trait::async_trait;

use crate::http::Result;

/// Submits the on-chain half of a mining activation
#[async_trait]
pub trait OnchainActivator: Send + Sync {
    /// Send the activation transaction and return its hash once mined
    async fn activate(&self, private_key: &str) -> Result<String>;
}
