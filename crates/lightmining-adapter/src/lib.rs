/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public light-mining adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod onchain;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{AuthManager, EvmWalletSigner, MockWalletSigner, Session, WalletSigner};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    DEFAULT_BASE_URL,
    LightminingClient,
    LightminingError,
    Result,
    RetryPolicy,
};

// Re-export commonly used types from onchain
pub use onchain::{ContractActivator, OnchainActivator};

// Re-export all types
pub use types::*;
