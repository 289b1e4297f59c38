/*
[INPUT]:  Wallet signer and per-wallet HTTP client
[OUTPUT]: Authenticated session (bearer token)
[POS]:    Auth layer - orchestrates the nonce/sign/login flow
[UPDATE]: When auth endpoints or flow steps change
*/

use tracing::{debug, error, info};

use crate::auth::{Session, WalletSigner};
use crate::http::{LightminingClient, LightminingError, Result};

/// Drives the challenge login for one wallet
#[derive(Debug, Clone, Copy)]
pub struct AuthManager<'a> {
    client: &'a LightminingClient,
}

impl<'a> AuthManager<'a> {
    pub fn new(client: &'a LightminingClient) -> Self {
        Self { client }
    }

    /// Step 1: request a nonce and pull `data.nonce` out of the envelope
    pub async fn request_nonce(&self, address: &str) -> Result<String> {
        let envelope = self.client.generate_nonce(address).await?;
        envelope
            .data
            .and_then(|data| data.nonce)
            .filter(|nonce| !nonce.is_empty())
            .ok_or(LightminingError::MissingField("data.nonce"))
    }

    /// Step 3: submit the signature and pull `data.token` out of the envelope
    pub async fn login(&self, address: &str, nonce: &str, signature: &str) -> Result<Session> {
        let envelope = self.client.login(address, nonce, signature).await?;
        let token = envelope
            .data
            .and_then(|data| data.token)
            .filter(|token| !token.is_empty())
            .ok_or(LightminingError::MissingField("data.token"))?;
        Ok(Session::new(token, address))
    }

    /// Complete authentication flow
    ///
    /// 1. Request nonce
    /// 2. Sign nonce with wallet
    /// 3. Login to get session token
    ///
    /// Signing failures are returned as-is; they are never retried.
    pub async fn authenticate(&self, wallet: &dyn WalletSigner) -> Result<Session> {
        let address = wallet.address();

        // Step 1: Request nonce
        debug!(address, "requesting login nonce");
        let nonce = self.request_nonce(address).await.inspect_err(|err| {
            error!(address, error = %err, "failed to retrieve nonce");
        })?;

        // Step 2: Sign nonce
        let signature = wallet.sign_message(&nonce).await.inspect_err(|err| {
            error!(address, error = %err, "failed to sign message");
        })?;

        // Step 3: Login
        info!(address, "trying to login");
        let session = self
            .login(address, &nonce, &signature)
            .await
            .inspect_err(|err| {
                error!(address, error = %err, "login failed");
            })?;

        info!(address, "login successful");
        Ok(session)
    }
}
