/*
[INPUT]:  Wallet address, nonce and signature
[OUTPUT]: Login nonce and session token envelopes
[POS]:    HTTP layer - wallet login endpoints (no auth required)
[UPDATE]: When login endpoints or payloads change
*/

use reqwest::Method;

use crate::http::{LightminingClient, Result};
use crate::types::{ApiEnvelope, LoginData, LoginRequest, NonceData, NonceRequest};

impl LightminingClient {
    /// Request a login challenge for `address`
    ///
    /// POST /wallet/generateNonce
    pub async fn generate_nonce(&self, address: &str) -> Result<ApiEnvelope<NonceData>> {
        let body = NonceRequest {
            wallet_address: address,
        };
        self.call("generateNonce", || {
            Ok(self.request(Method::POST, "wallet/generateNonce")?.json(&body))
        })
        .await
    }

    /// Exchange a signed nonce for a session token
    ///
    /// POST /wallet/login
    pub async fn login(
        &self,
        address: &str,
        message: &str,
        signature: &str,
    ) -> Result<ApiEnvelope<LoginData>> {
        let body = LoginRequest {
            address,
            message,
            signature,
        };
        self.call("login", || {
            Ok(self.request(Method::POST, "wallet/login")?.json(&body))
        })
        .await
    }
}
