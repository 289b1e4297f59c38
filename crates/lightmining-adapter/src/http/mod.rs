/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod mining;
pub mod retry;
pub mod wallet;

pub use error::{LightminingError, Result};
pub use retry::RetryPolicy;

pub use client::{ClientConfig, DEFAULT_BASE_URL, LightminingClient};
