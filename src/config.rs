//! # Registry configuration.
//!
//! Provides [`Config`] centralized settings shared by [`Registry`](crate::Registry)
//! and, with the `fanout` feature, `FanOut`.
//!
//! ## Sentinel values
//! - `queue_capacity = 0` → clamped to 1 (a queue must hold at least one message)
//! - `queue_capacity > MAX_QUEUE_CAPACITY` → clamped to [`MAX_QUEUE_CAPACITY`]
//!   (the largest bound a tokio channel accepts); same for a subscriber's own request

use crate::policies::FailurePolicy;

/// Largest per-subscriber queue capacity; tokio's bounded channel rejects anything above it.
pub const MAX_QUEUE_CAPACITY: usize = usize::MAX >> 3;

/// Configuration for a notification registry.
///
/// ## Field semantics
/// - `label`: name attached to every log record (`registry = label`)
/// - `failure`: what a broadcast does when a subscriber panics
/// - `prune_dropped`: remove entries whose subscriber was dropped after each broadcast
/// - `queue_capacity`: default per-subscriber queue size for `FanOut` (1..=[`MAX_QUEUE_CAPACITY`])
///
/// ## Notes
/// All fields are public. Prefer the helper accessors over sentinel checks.
#[derive(Clone, Debug)]
pub struct Config {
    /// Name used in log records to tell registries apart.
    pub label: &'static str,

    /// Delivery policy after a panicking `receive`.
    ///
    /// Used by `Registry::broadcast`. `FanOut` always isolates, since each
    /// subscriber already runs on its own worker.
    pub failure: FailurePolicy,

    /// Whether broadcasts remove entries whose subscriber has been dropped.
    ///
    /// Dropped entries are skipped either way; this only controls whether they
    /// keep occupying the sequence until an explicit `prune()`.
    pub prune_dropped: bool,

    /// Default capacity of each subscriber queue in `FanOut`.
    ///
    /// A subscriber may request its own capacity; this is the fallback.
    pub queue_capacity: usize,
}

impl Config {
    /// Returns the default queue capacity clamped to `1..=MAX_QUEUE_CAPACITY`.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        clamp_queue_capacity(self.queue_capacity)
    }
}

/// Clamps any requested queue capacity to `1..=MAX_QUEUE_CAPACITY`.
#[inline]
pub(crate) fn clamp_queue_capacity(cap: usize) -> usize {
    cap.clamp(1, MAX_QUEUE_CAPACITY)
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `label = "fanbus"`
    /// - `failure = FailurePolicy::Isolate`
    /// - `prune_dropped = true`
    /// - `queue_capacity = 1024`
    fn default() -> Self {
        Self {
            label: "fanbus",
            failure: FailurePolicy::default(),
            prune_dropped: true,
            queue_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_clamped() {
        let cfg = Config {
            queue_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.queue_capacity_clamped(), 1);
        assert_eq!(Config::default().queue_capacity_clamped(), 1024);
    }

    #[test]
    fn huge_capacity_is_clamped_to_ceiling() {
        let cfg = Config {
            queue_capacity: usize::MAX,
            ..Config::default()
        };
        assert_eq!(cfg.queue_capacity_clamped(), MAX_QUEUE_CAPACITY);
        assert_eq!(clamp_queue_capacity(MAX_QUEUE_CAPACITY), MAX_QUEUE_CAPACITY);
    }
}
