/*
[INPUT]:  EVM private key (hex string) and configured wallet address
[OUTPUT]: EIP-191 signed messages and wallet address
[POS]:    Auth layer - EVM wallet implementation
[UPDATE]: When signing logic or EVM address formatting changes
*/

use std::fmt;
use std::str::FromStr;

use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{error, warn};

use crate::auth::WalletSigner;
use crate::http::{LightminingError, Result};

/// Signer for EVM-compatible wallets
pub struct EvmWalletSigner {
    signer: PrivateKeySigner,
    address: String,
}

impl EvmWalletSigner {
    /// Create a new EVM wallet signer from a hex-encoded private key
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn new(private_key_hex: &str) -> Result<Self> {
        let signer = parse_private_key(private_key_hex)?;
        let address = signer.address().to_checksum(None);

        Ok(Self { signer, address })
    }

    /// Create a signer that logs in as `address`.
    ///
    /// A key that derives a different address is only warned about; the
    /// server rejects the login if the signature does not match.
    pub fn for_address(address: &str, private_key_hex: &str) -> Result<Self> {
        let signer = parse_private_key(private_key_hex)?;
        let derived = signer.address().to_checksum(None);

        if normalize_evm_address(address) != normalize_evm_address(&derived) {
            warn!(
                configured = address,
                derived = %derived,
                "wallet address does not match private key"
            );
        }

        Ok(Self {
            signer,
            address: address.trim().to_string(),
        })
    }

    /// Address derived from the private key
    pub fn derived_address(&self) -> String {
        self.signer.address().to_checksum(None)
    }
}

impl fmt::Debug for EvmWalletSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvmWalletSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletSigner for EvmWalletSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| {
                error!(address = %self.address, error = %e, "error signing message");
                LightminingError::Signing(format!("Failed to sign EVM message: {e}"))
            })?;

        // [r, s, v]
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

pub(crate) fn parse_private_key(private_key_hex: &str) -> Result<PrivateKeySigner> {
    let trimmed = private_key_hex.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    PrivateKeySigner::from_str(trimmed)
        .map_err(|e| LightminingError::Signing(format!("Invalid EVM private key: {e}")))
}

fn normalize_evm_address(address: &str) -> String {
    let address = address.trim();
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address)
        .to_ascii_lowercase()
}
