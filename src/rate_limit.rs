// =============================================================================
// Analysis Rate Limiter — minimum interval between interactive analyses
// =============================================================================
//
// Holds the time of the last accepted request and rejects any request that
// arrives before `min_interval` has elapsed.  Advisory only: the analysis
// core is safe to re-enter, this just keeps an interactive user from
// hammering the market-data source.  Rejections do not move the timestamp.
// =============================================================================

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Thread-safe single-timestamp gate.
pub struct AnalysisRateLimiter {
    min_interval: Duration,
    last_accepted: Mutex<Option<Instant>>,
}

/// Immutable snapshot of the limiter state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSnapshot {
    pub min_interval_secs: u64,
    pub secs_since_last: Option<f64>,
}

impl AnalysisRateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: Mutex::new(None),
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Accept the request at `now` and record it, or return how long the
    /// caller still has to wait.
    pub fn check_at(&self, now: Instant) -> Result<(), Duration> {
        let mut last = self.last_accepted.lock();
        if let Some(prev) = *last {
            let elapsed = now.saturating_duration_since(prev);
            if elapsed < self.min_interval {
                let remaining = self.min_interval - elapsed;
                warn!(
                    remaining_ms = remaining.as_millis() as u64,
                    "analysis request rejected by rate limiter"
                );
                return Err(remaining);
            }
        }
        *last = Some(now);
        debug!("analysis request accepted");
        Ok(())
    }

    /// [`check_at`](Self::check_at) with the current instant.
    pub fn check(&self) -> Result<(), Duration> {
        self.check_at(Instant::now())
    }

    pub fn snapshot(&self) -> RateLimitSnapshot {
        let last = *self.last_accepted.lock();
        RateLimitSnapshot {
            min_interval_secs: self.min_interval.as_secs(),
            secs_since_last: last.map(|prev| prev.elapsed().as_secs_f64()),
        }
    }
}

impl std::fmt::Debug for AnalysisRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisRateLimiter")
            .field("min_interval", &self.min_interval)
            .field("last_accepted", &*self.last_accepted.lock())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_request_is_accepted() {
        let limiter = AnalysisRateLimiter::from_secs(60);
        assert!(limiter.check_at(Instant::now()).is_ok());
    }

    #[test]
    fn request_inside_interval_is_rejected_with_remaining() {
        let limiter = AnalysisRateLimiter::from_secs(60);
        let t0 = Instant::now();
        limiter.check_at(t0).unwrap();
        let remaining = limiter.check_at(t0 + Duration::from_secs(20)).unwrap_err();
        assert_eq!(remaining, Duration::from_secs(40));
    }

    #[test]
    fn request_after_interval_is_accepted() {
        let limiter = AnalysisRateLimiter::from_secs(60);
        let t0 = Instant::now();
        limiter.check_at(t0).unwrap();
        assert!(limiter.check_at(t0 + Duration::from_secs(60)).is_ok());
    }

    #[test]
    fn rejection_does_not_reset_the_clock() {
        let limiter = AnalysisRateLimiter::from_secs(10);
        let t0 = Instant::now();
        limiter.check_at(t0).unwrap();
        assert!(limiter.check_at(t0 + Duration::from_secs(9)).is_err());
        assert!(limiter.check_at(t0 + Duration::from_secs(10)).is_ok());
    }

    #[test]
    fn zero_interval_never_rejects() {
        let limiter = AnalysisRateLimiter::from_secs(0);
        let t0 = Instant::now();
        assert!(limiter.check_at(t0).is_ok());
        assert!(limiter.check_at(t0).is_ok());
    }

    #[test]
    fn snapshot_reports_interval() {
        let limiter = AnalysisRateLimiter::from_secs(30);
        assert!(limiter.snapshot().secs_since_last.is_none());
        limiter.check().unwrap();
        let snap = limiter.snapshot();
        assert_eq!(snap.min_interval_secs, 30);
        assert!(snap.secs_since_last.is_some());
    }
}
