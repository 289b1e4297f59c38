/*
[INPUT]:  RPC URL, contract address, wallet private key
[OUTPUT]: Mined activation transaction hash
[POS]:    On-chain layer - alloy-backed contract call
[UPDATE]: When the contract ABI or confirmation policy changes
*/

use std::str::FromStr;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::ProviderBuilder;
use alloy::sol;
use async_trait::async_trait;
use reqwest::Url;
use tracing::{error, info};

use crate::auth::evm_wallet::parse_private_key;
use crate::http::{LightminingError, Result};
use crate::onchain::OnchainActivator;

pub const DEFAULT_RPC_URL: &str = "https://rpc-mainnet.taker.xyz";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xB3eFE5105b835E5Dd9D206445Dbd66DF24b912AB";

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface ILightMining {
        /// Mark the caller active for the current mining period
        function active() external;
    }
}

/// Calls `active()` on the light-mining contract
#[derive(Debug, Clone)]
pub struct ContractActivator {
    rpc_url: Url,
    contract: Address,
}

impl ContractActivator {
    pub fn new(rpc_url: &str, contract: &str) -> Result<Self> {
        let rpc_url = Url::parse(rpc_url)?;
        let contract = Address::from_str(contract.trim()).map_err(|e| {
            LightminingError::Config(format!("Invalid activation contract address: {e}"))
        })?;
        Ok(Self { rpc_url, contract })
    }

    pub fn contract(&self) -> Address {
        self.contract
    }
}

#[async_trait]
impl OnchainActivator for ContractActivator {
    async fn activate(&self, private_key: &str) -> Result<String> {
        let signer = parse_private_key(private_key)?;
        let from = signer.address();

        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.rpc_url.clone());
        let contract = ILightMining::new(self.contract, provider);

        info!(address = %from, contract = %self.contract, "sending activation transaction");
        let pending = contract.active().send().await.map_err(|e| {
            error!(address = %from, error = %e, "activation transaction rejected");
            LightminingError::Onchain(format!("Activation tx failed: {e}"))
        })?;

        let receipt = pending.get_receipt().await.map_err(|e| {
            LightminingError::Onchain(format!("Tx confirmation failed: {e}"))
        })?;

        let tx_hash = format!("{:?}", receipt.transaction_hash);
        if !receipt.status() {
            return Err(LightminingError::Onchain(format!(
                "Activation tx {tx_hash} reverted"
            )));
        }

        info!(address = %from, tx_hash = %tx_hash, "activation transaction mined");
        Ok(tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_activator_config() {
        let activator = ContractActivator::new(DEFAULT_RPC_URL, DEFAULT_CONTRACT_ADDRESS).unwrap();
        assert_eq!(
            activator.contract(),
            Address::from_str(DEFAULT_CONTRACT_ADDRESS).unwrap()
        );
    }

    #[test]
    fn test_bad_contract_address() {
        let err = ContractActivator::new(DEFAULT_RPC_URL, "0x1234").unwrap_err();
        assert!(matches!(err, LightminingError::Config(_)));
    }

    #[test]
    fn test_bad_rpc_url() {
        let err = ContractActivator::new("not a url", DEFAULT_CONTRACT_ADDRESS).unwrap_err();
        assert!(matches!(err, LightminingError::UrlParse(_)));
    }

    #[tokio::test]
    async fn test_bad_key_fails_before_network() {
        let activator = ContractActivator::new("http://127.0.0.1:9", DEFAULT_CONTRACT_ADDRESS).unwrap();
        let err = activator.activate("0xzz").await.unwrap_err();
        assert!(matches!(err, LightminingError::Signing(_)));
    }
}
