//! Timestamp-based identifiers for posts and comments.

use std::sync::atomic::{AtomicI64, Ordering};

use time::OffsetDateTime;

/// Hands out the current Unix time in milliseconds, bumped past the previous
/// value when two requests land in the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let now = now_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1).to_string()
    }
}

fn now_millis() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let ids = IdGenerator::new();
        let values: Vec<i64> = (0..500)
            .map(|_| ids.next_id().parse().expect("numeric id"))
            .collect();
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn ids_track_wall_clock_milliseconds() {
        let before = now_millis();
        let id: i64 = IdGenerator::new().next_id().parse().expect("numeric id");
        assert!(id >= before);
    }

    #[test]
    fn concurrent_callers_never_collide() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..200).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().expect("thread finished") {
                assert!(seen.insert(id), "duplicate id");
            }
        }
    }
}
