/*
[INPUT]:  Wallet keys, login challenges and API client
[OUTPUT]: Per-cycle sessions, signatures and auth errors
[POS]:    Auth layer - handles light-mining API authentication
[UPDATE]: When auth flow or signature methods change
*/

pub mod evm_wallet;
pub mod manager;
pub mod session;
pub mod wallet;

pub use evm_wallet::EvmWalletSigner;
pub use manager::AuthManager;
pub use session::Session;
pub use wallet::{MockWalletSigner, WalletSigner};
