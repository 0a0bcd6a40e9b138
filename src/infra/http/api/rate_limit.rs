use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Number of `allow` calls between sweeps of idle buckets.
const SWEEP_EVERY: u64 = 1_024;

/// Sliding-window request limiter keyed by client and route template.
///
/// Buckets whose timestamps have all left the window are dropped on a
/// periodic sweep, so the map only holds clients seen within one window.
#[derive(Debug, Clone)]
pub struct ApiRateLimiter {
    window: Duration,
    max_requests: u32,
    buckets: Arc<DashMap<String, Vec<Instant>>>,
    calls: Arc<AtomicU64>,
}

impl ApiRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            buckets: Arc::new(DashMap::new()),
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a request for `client` on `route`. Returns whether it is allowed
    /// and how many requests remain in the current window.
    ///
    /// `route` must be the matched route template, not the raw path.
    pub fn allow(&self, client: &str, route: &str) -> (bool, u32) {
        let now = Instant::now();
        // Sweep before taking an entry guard; `retain` locks every shard.
        if self.calls.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            self.sweep_at(now);
        }

        let window = self.window;
        let mut entry = self.buckets.entry(format!("{client}:{route}")).or_default();
        entry.retain(|instant| now.duration_since(*instant) < window);

        let remaining = self
            .max_requests
            .saturating_sub(u32::try_from(entry.len()).unwrap_or(u32::MAX));
        if remaining == 0 {
            return (false, 0);
        }

        entry.push(now);
        (true, remaining - 1)
    }

    /// Drop every bucket with no request inside the window.
    pub fn sweep(&self) {
        self.sweep_at(Instant::now());
    }

    fn sweep_at(&self, now: Instant) {
        let window = self.window;
        self.buckets.retain(|_, hits| {
            hits.retain(|instant| now.duration_since(*instant) < window);
            !hits.is_empty()
        });
    }

    pub fn retry_after_secs(&self) -> u64 {
        self.window.as_secs().max(1)
    }

    pub fn limit(&self) -> u32 {
        self.max_requests
    }
}
