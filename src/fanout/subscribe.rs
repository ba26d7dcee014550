//! # Async subscriber trait for the queued fan-out.
//!
//! Provides [`AsyncSubscribe`], the counterpart of [`Subscribe`](crate::Subscribe)
//! for subscribers served by [`FanOut`](crate::FanOut).
//!
//! Each registration gets:
//! - **Dedicated worker task** (runs independently)
//! - **Bounded queue** (capacity via [`AsyncSubscribe::queue_capacity`], else `Config::queue_capacity`)
//! - **Panic isolation** (a panic is logged and the worker moves on)
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use fanbus::AsyncSubscribe;
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl AsyncSubscribe for Audit {
//!     async fn receive(&self, message: &str) {
//!         let _ = message; // write to an audit log, etc.
//!     }
//!
//!     fn name(&self) -> &'static str { "audit" }
//!     fn queue_capacity(&self) -> Option<usize> { Some(4096) }
//! }
//! ```

use std::sync::{Arc, Weak};

use async_trait::async_trait;

use crate::handle::Downgrade;

/// Receiver of queued broadcast messages.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Slow processing only fills this subscriber's own queue.
#[async_trait]
pub trait AsyncSubscribe: Send + Sync + 'static {
    /// Handles a single message, called from this subscriber's worker task.
    ///
    /// Messages arrive in FIFO order per registration.
    async fn receive(&self, message: &str);

    /// Returns the subscriber name used in logs and reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred queue capacity; `None` uses the fan-out's configured default.
    ///
    /// The runtime clamps capacity to `1..=MAX_QUEUE_CAPACITY`.
    fn queue_capacity(&self) -> Option<usize> {
        None
    }
}

impl<S: AsyncSubscribe> Downgrade<dyn AsyncSubscribe> for Arc<S> {
    fn downgrade(&self) -> Weak<dyn AsyncSubscribe> {
        let weak: Weak<S> = Arc::downgrade(self);
        weak
    }
}

impl Downgrade<dyn AsyncSubscribe> for Arc<dyn AsyncSubscribe> {
    fn downgrade(&self) -> Weak<dyn AsyncSubscribe> {
        Arc::downgrade(self)
    }
}

impl<S: AsyncSubscribe> Downgrade<dyn AsyncSubscribe> for Weak<S> {
    fn downgrade(&self) -> Weak<dyn AsyncSubscribe> {
        let weak: Weak<S> = self.clone();
        weak
    }
}

impl Downgrade<dyn AsyncSubscribe> for Weak<dyn AsyncSubscribe> {
    fn downgrade(&self) -> Weak<dyn AsyncSubscribe> {
        self.clone()
    }
}
