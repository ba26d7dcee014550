//! # Failure policy for broadcast delivery.
//!
//! [`FailurePolicy`] decides what a broadcast does when a subscriber's
//! `receive` panics.
//!
//! - [`FailurePolicy::Isolate`] the panic is caught and delivery continues with the next subscriber (default).
//! - [`FailurePolicy::Abort`] the panic is caught and the rest of that broadcast is skipped.
//!
//! ```text
//! snapshot: [A, B, C]      B panics
//!
//! Isolate  → A ✓  B ✗  C ✓   report.panicked = [B]
//! Abort    → A ✓  B ✗  C –   report.panicked = [B], report.aborted = true
//! ```
//!
//! Neither policy lets the panic escape `broadcast`.

/// Policy controlling delivery after a subscriber panics mid-broadcast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep delivering to the remaining subscribers (default).
    #[default]
    Isolate,
    /// Stop the current broadcast at the first panicking subscriber.
    Abort,
}

impl FailurePolicy {
    /// Returns `true` if a failure should stop the current broadcast.
    #[inline]
    pub fn stops_on_failure(self) -> bool {
        matches!(self, FailurePolicy::Abort)
    }
}
