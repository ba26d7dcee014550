//! Delivery policies.
//!
//! ## Contents
//! - [`FailurePolicy`] what a broadcast does after a subscriber panics (isolate / abort)
//!
//! ## Quick wiring
//! ```text
//! Config { failure: FailurePolicy, .. }
//!      └─► Registry::broadcast uses:
//!           - failure.stops_on_failure() to decide continue/stop after a caught panic
//! ```
//!
//! ## Defaults
//! - `FailurePolicy::Isolate` (independent subscribers keep their fan-out guarantee).

mod failure;

pub use failure::FailurePolicy;
