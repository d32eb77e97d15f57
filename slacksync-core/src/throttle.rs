use std::time::Duration;

/// Inter-call rate limiter shared contract for both remote clients.
///
/// Each client awaits [`Throttle::wait`] before issuing a request, so calls
/// through one client are spaced at least the configured delay apart (calls
/// are strictly serialized, see the concurrency model). A zero delay makes
/// `wait` return immediately, which is what tests use.
#[derive(Debug, Clone)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay_ms: u64) -> Self {
        Throttle {
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// No delay at all, for tests and diagnostics.
    pub fn zero() -> Self {
        Throttle::new(0)
    }

    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_delay_returns_immediately() {
        let throttle = Throttle::zero();
        let start = std::time::Instant::now();
        throttle.wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn configured_delay_is_enforced() {
        let throttle = Throttle::new(100);
        let start = tokio::time::Instant::now();
        throttle.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
