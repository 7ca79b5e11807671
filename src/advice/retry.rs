use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::advice::AdviceUnavailable;

/// Exponential backoff with jitter for transient advice failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Run `f` until it succeeds, fails permanently, or retries run out.
    pub async fn retry_async<F, Fut, T>(&self, mut f: F) -> Result<T, AdviceUnavailable>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, AdviceUnavailable>>,
    {
        let mut attempt = 0u32;
        loop {
            match f().await {
                Ok(v) => return Ok(v),
                Err(e) if e.transient && attempt < self.max_retries => {
                    attempt += 1;
                    let max_delay = self.base_delay * (1u32 << attempt.min(16));
                    let max_ms = (max_delay.as_millis() as u64).max(1);
                    let delay = Duration::from_millis(rand::thread_rng().gen_range(0..max_ms));
                    debug!(attempt, reason = %e.reason, ?delay, "retrying advice request");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::UnavailableReason;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn retry_succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let result = fast(3)
            .retry_async(move || {
                let c = c.clone();
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst) + 1;
                    if n < 3 {
                        Err(AdviceUnavailable::new(UnavailableReason::Timeout, "slow"))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_does_not_repeat_permanent_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let result: Result<(), _> = fast(3)
            .retry_async(move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(AdviceUnavailable::new(UnavailableReason::Malformed, "junk"))
                }
            })
            .await;
        assert_eq!(result.unwrap_err().reason, UnavailableReason::Malformed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let result: Result<(), _> = fast(2)
            .retry_async(move || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(AdviceUnavailable::new(UnavailableReason::Network, "down"))
                }
            })
            .await;
        assert_eq!(result.unwrap_err().reason, UnavailableReason::Network);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
