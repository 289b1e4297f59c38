/*
[INPUT]:  Async operation factory and retry bounds
[OUTPUT]: First successful result or RetriesExhausted
[POS]:    HTTP layer - bounded retry loop shared by every API call
[UPDATE]: When changing backoff shape or retry classification
*/

use std::future::Future;
use std::time::Duration;

use tracing::{error, warn};

use crate::http::{LightminingError, Result};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(3);

/// Fixed-backoff retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Pause between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Upper bound on calls made by [`RetryPolicy::run`]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Run `call` until it succeeds, fails with a non-retryable error, or
    /// the retry budget is spent.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retries_left = self.max_retries;
        let mut attempts = 0;

        loop {
            attempts += 1;
            let err = match call().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !err.is_retryable() {
                return Err(err);
            }

            if retries_left == 0 {
                error!(operation, attempts, error = %err, "giving up after retries");
                return Err(LightminingError::RetriesExhausted {
                    operation,
                    attempts,
                    source: Box::new(err),
                });
            }

            retries_left -= 1;
            warn!(
                operation,
                error = %err,
                attempts_left = retries_left,
                "request failed, retrying"
            );
            tokio::time::sleep(self.backoff).await;
        }
    }
}
