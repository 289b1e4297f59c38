/*
[INPUT]:  Wallet address, nonce and signature
[OUTPUT]: Serializable request bodies for the wallet endpoints
[POS]:    Data layer - request payloads
[UPDATE]: When request schemas change
*/

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceRequest<'a> {
    pub wallet_address: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub address: &'a str,
    pub message: &'a str,
    pub signature: &'a str,
}
