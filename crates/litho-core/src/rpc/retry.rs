use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::config::RetryConfig;
use crate::error::RpcError;

/// Bounded retry with linear backoff around a single transport call.
///
/// Total attempts are `retries + 1`. Before the k-th retry (k starting at 1)
/// the policy sleeps `delay * k`; there is no jitter. Every [`RpcError`] is
/// retried, including permanent ones such as an unknown method, and the error
/// of the final attempt is returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    pub fn no_retry() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Sleep before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        self.delay.saturating_mul(retry)
    }

    pub async fn run<T, F, Fut>(&self, method: &str, mut op: F) -> Result<T, RpcError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RpcError>>,
    {
        let mut retry = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if retry < self.retries => {
                    retry += 1;
                    let backoff = self.backoff(retry);
                    warn!(
                        rpc.method = method,
                        attempt = retry,
                        max_attempts = self.max_attempts(),
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "rpc attempt failed; retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => {
                    if self.retries > 0 {
                        warn!(
                            rpc.method = method,
                            attempts = self.max_attempts(),
                            error = %err,
                            "rpc attempts exhausted"
                        );
                    }
                    return Err(err);
                }
            }
        }
    }
}

impl From<RetryConfig> for RetryPolicy {
    fn from(config: RetryConfig) -> Self {
        Self::new(config.count, config.delay)
    }
}
