use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum delay between outbound requests.
///
/// One shared timestamp for every caller. The lock is held while a caller
/// waits, so concurrent callers are spaced out one after another.
#[derive(Debug)]
pub struct RateLimiter {
    min_delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_call: Mutex::new(None),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Wait until the minimum delay since the previous call has passed,
    /// then record this call.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(last) = *last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                let wait = self.min_delay - elapsed;
                tracing::debug!(wait_ms = wait.as_millis() as u64, "rate limited, waiting");
                tokio::time::sleep(wait).await;
            }
        }

        *last_call = Some(Instant::now());
    }

    pub async fn last_call(&self) -> Option<Instant> {
        *self.last_call.lock().await
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_millis(1000)
    }
}
