//! Sliding-window rate limiting per destination.
//!
//! Windows are independent per destination key and live for the process
//! lifetime; the destination set is bounded by configuration, so there is
//! no eviction. Denial is advisory: callers decide whether to drop, queue,
//! or log.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Rate limit configuration.
#[derive(Debug, Clone)]
pub struct RateLimit {
    /// Maximum admissions inside the trailing window.
    pub max_requests: usize,
    /// Window length.
    pub window: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            max_requests: 30,
            window: Duration::from_millis(60_000),
        }
    }
}

/// Sliding-window admission control keyed by destination.
///
/// Owned by the dispatcher rather than living in a process-wide cache, so
/// tests can construct isolated instances. The caller is responsible for
/// serializing access per key; the dispatcher holds the limiter behind a
/// mutex when events may arrive concurrently.
#[derive(Debug, Default)]
pub struct SlidingWindowLimiter {
    limit: RateLimit,
    windows: HashMap<String, VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    /// Creates a limiter with the default limit (30 requests / 60 s).
    pub fn new() -> Self {
        Self::with_limit(RateLimit::default())
    }

    /// Creates a limiter with a custom limit.
    pub fn with_limit(limit: RateLimit) -> Self {
        Self {
            limit,
            windows: HashMap::new(),
        }
    }

    /// Admits or denies a request for `key` at the current time.
    pub fn admit(&mut self, key: &str) -> bool {
        self.admit_at(key, Instant::now())
    }

    /// Admits or denies a request for `key` at an explicit time.
    ///
    /// Evicts timestamps that fell out of the window, then denies without
    /// recording when the window is full. Exposed for deterministic tests.
    pub fn admit_at(&mut self, key: &str, now: Instant) -> bool {
        let window = self.windows.entry(key.to_string()).or_default();

        while window
            .front()
            .is_some_and(|&at| now.duration_since(at) >= self.limit.window)
        {
            window.pop_front();
        }

        if window.len() >= self.limit.max_requests {
            return false;
        }

        window.push_back(now);
        true
    }

    /// Admissions currently recorded for `key`.
    pub fn in_flight(&self, key: &str) -> usize {
        self.windows.get(key).map_or(0, VecDeque::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: usize, window_ms: u64) -> SlidingWindowLimiter {
        SlidingWindowLimiter::with_limit(RateLimit {
            max_requests,
            window: Duration::from_millis(window_ms),
        })
    }

    #[test]
    fn test_admits_up_to_limit_then_denies() {
        let mut limiter = limiter(30, 60_000);
        let now = Instant::now();

        for _ in 0..30 {
            assert!(limiter.admit_at("hook", now));
        }
        assert!(!limiter.admit_at("hook", now));
        // Denial must not have recorded an admission
        assert_eq!(limiter.in_flight("hook"), 30);
    }

    #[test]
    fn test_window_slides() {
        let mut limiter = limiter(2, 1_000);
        let start = Instant::now();

        assert!(limiter.admit_at("hook", start));
        assert!(limiter.admit_at("hook", start + Duration::from_millis(500)));
        assert!(!limiter.admit_at("hook", start + Duration::from_millis(900)));

        // First admission has aged out; one slot is free again
        assert!(limiter.admit_at("hook", start + Duration::from_millis(1_100)));
        assert!(!limiter.admit_at("hook", start + Duration::from_millis(1_200)));
    }

    #[test]
    fn test_destinations_are_independent() {
        let mut limiter = limiter(1, 60_000);
        let now = Instant::now();

        assert!(limiter.admit_at("hook-a", now));
        assert!(!limiter.admit_at("hook-a", now));
        assert!(limiter.admit_at("hook-b", now));
    }

    #[test]
    fn test_lazy_window_creation() {
        let limiter = SlidingWindowLimiter::new();
        assert_eq!(limiter.in_flight("never-used"), 0);
    }
}
