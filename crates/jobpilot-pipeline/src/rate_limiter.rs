//! Submission rate limiter.
//!
//! Enforces a minimum interval between submissions derived from an hourly
//! quota. The first call after startup is free (cold start); every call
//! stamps the clock after any required wait. State is in-memory only and
//! resets with the process.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

/// Minimum-interval limiter over a monotonic clock.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_sent: Option<Instant>,
}

impl RateLimiter {
    /// Limiter for an hourly quota: `min_interval = 3600 / requests_per_hour`
    /// seconds. A zero quota is clamped to one request per hour.
    pub fn new(requests_per_hour: u32) -> Self {
        Self::with_interval(Duration::from_secs_f64(
            3600.0 / f64::from(requests_per_hour.max(1)),
        ))
    }

    /// Limiter with an explicit minimum interval.
    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_sent: None,
        }
    }

    /// Time left until the next submission is allowed. Zero on cold start
    /// and once the interval has elapsed.
    pub fn remaining(&self) -> Duration {
        match self.last_sent {
            None => Duration::ZERO,
            Some(last) => self.min_interval.saturating_sub(last.elapsed()),
        }
    }

    /// Wait until a submission is allowed, then stamp the clock.
    ///
    /// Cancellation-safe: dropping the returned future before it completes
    /// leaves `last_sent` unchanged, so an interrupted wait neither consumes
    /// nor extends the quota.
    pub async fn wait_if_needed(&mut self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            debug!(
                subsystem = "pipeline",
                component = "rate_limiter",
                wait_secs = remaining.as_secs(),
                "Quota interval not elapsed, waiting"
            );
            sleep(remaining).await;
        }
        self.last_sent = Some(Instant::now());
    }
}
