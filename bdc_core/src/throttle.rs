//! Paces calendar writes to stay within the provider's request rate.

use std::future::Future;

use tokio::time::{sleep_until, Duration, Instant};

/// Runs operations one after another with a minimum interval between their starts.
///
/// `run` borrows the throttle mutably, so only one operation can be in flight.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_start: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: None,
        }
    }

    /// Wait for the next free slot, then run `operation` to completion.
    pub async fn run<F, Fut, T>(&mut self, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(last_start) = self.last_start {
            sleep_until(last_start + self.interval).await;
        }
        self.last_start = Some(Instant::now());
        operation().await
    }
}
