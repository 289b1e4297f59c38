/*
[INPUT]:  Message to sign and wallet private key
[OUTPUT]: Signature string for authentication
[POS]:    Auth layer - wallet integration abstraction
[UPDATE]: When adding new wallet types or changing signature format
*/

use async_trait::async_trait;

use crate::http::{LightminingError, Result};

/// Trait for wallet signing operations
///
/// The trait is async to support hardware wallets and external signers.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Get the wallet address used for login
    fn address(&self) -> &str;

    /// Sign a message and return the hex-encoded signature (0x...)
    async fn sign_message(&self, message: &str) -> Result<String>;
}

/// Mock wallet signer for testing
#[derive(Debug, Clone)]
pub struct MockWalletSigner {
    address: String,
    signature: Option<String>,
}

impl MockWalletSigner {
    /// Create a new mock signer with predetermined signature
    pub fn new(address: &str, signature: &str) -> Self {
        Self {
            address: address.to_string(),
            signature: Some(signature.to_string()),
        }
    }

    /// Create a mock signer whose every signature attempt fails
    pub fn failing(address: &str) -> Self {
        Self {
            address: address.to_string(),
            signature: None,
        }
    }
}

#[async_trait]
impl WalletSigner for MockWalletSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&self, _message: &str) -> Result<String> {
        self.signature
            .clone()
            .ok_or_else(|| LightminingError::Signing("mock signer refused".to_string()))
    }
}
