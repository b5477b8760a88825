//! In-memory sliding-window rate limiter for the anonymous auth
//! endpoints. Per-process only; a multi-instance deployment needs a
//! shared store instead.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct RateLimiter {
    attempts: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
    max_attempts: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_attempts: usize, window_secs: u64) -> Self {
        Self {
            attempts: Arc::new(RwLock::new(HashMap::new())),
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Records an attempt for `identifier` (an IP here) and reports
    /// whether it is still within the window's budget.
    pub async fn check(&self, identifier: &str) -> bool {
        let now = Instant::now();
        let mut attempts = self.attempts.write().await;

        let history = attempts.entry(identifier.to_string()).or_default();
        prune(history, now, self.window);

        if history.len() < self.max_attempts {
            history.push(now);
            true
        } else {
            false
        }
    }

    /// Drops identifiers whose whole history fell out of the window.
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut attempts = self.attempts.write().await;
        attempts.retain(|_, history| {
            prune(history, now, self.window);
            !history.is_empty()
        });
        tracing::debug!("Rate limiter cleanup: {} active identifiers", attempts.len());
    }
}

fn prune(history: &mut Vec<Instant>, now: Instant, window: Duration) {
    history.retain(|&at| now.duration_since(at) < window);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blocks_after_budget_is_spent() {
        let limiter = RateLimiter::new(3, 60);

        assert!(limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.1").await);
        assert!(!limiter.check("10.0.0.1").await);

        // independent budget per identifier
        assert!(limiter.check("10.0.0.2").await);
    }

    #[tokio::test]
    async fn window_expiry_frees_the_budget() {
        let limiter = RateLimiter::new(1, 1);

        assert!(limiter.check("10.0.0.1").await);
        assert!(!limiter.check("10.0.0.1").await);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(limiter.check("10.0.0.1").await);
    }

    #[tokio::test]
    async fn cleanup_drops_stale_identifiers() {
        let limiter = RateLimiter::new(5, 1);
        limiter.check("a").await;
        limiter.check("b").await;

        tokio::time::sleep(Duration::from_secs(2)).await;
        limiter.cleanup().await;

        assert_eq!(limiter.attempts.read().await.len(), 0);
    }
}
