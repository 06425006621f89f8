//! Rate limiter for high-frequency UI events.

use std::time::{Duration, Instant};

/// Shortest accepted flush interval.
pub const MIN_INTERVAL_MS: u64 = 100;
/// Longest accepted flush interval.
pub const MAX_INTERVAL_MS: u64 = 250;
/// Interval used by the scroll synchronizer unless configured otherwise.
pub const DEFAULT_INTERVAL_MS: u64 = 200;

/// Holds the latest pushed value and releases it at most once per interval.
///
/// The first value after a quiet period is released immediately; values
/// arriving inside the interval replace each other and only the latest one
/// is released once the interval has passed. The caller supplies `now`, so
/// any timer can drive [`Throttle::poll`] using [`Throttle::deadline`].
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    pending: Option<T>,
    last_flush: Option<Instant>,
}

impl<T> Throttle<T> {
    /// Interval is clamped to `MIN_INTERVAL_MS..=MAX_INTERVAL_MS`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: clamp_interval(interval),
            pending: None,
            last_flush: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Store `value`, replacing any pending one, and release it if the
    /// interval allows.
    pub fn push(&mut self, value: T, now: Instant) -> Option<T> {
        self.pending = Some(value);
        self.poll(now)
    }

    /// Release the pending value if the interval since the last release has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        self.pending.as_ref()?;
        let open = self
            .last_flush
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if !open {
            return None;
        }
        self.last_flush = Some(now);
        self.pending.take()
    }

    /// When the pending value becomes releasable, if one is waiting.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        self.last_flush.map(|last| last + self.interval)
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }
}

impl<T> Default for Throttle<T> {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_INTERVAL_MS))
    }
}

/// Clamp an interval into the accepted range.
pub fn clamp_interval(interval: Duration) -> Duration {
    interval.clamp(
        Duration::from_millis(MIN_INTERVAL_MS),
        Duration::from_millis(MAX_INTERVAL_MS),
    )
}
