//! # Subscriber trait.
//!
//! Provides [`Subscribe`] the capability every registry entry implements.
//!
//! ## Rules
//! - `receive` is called synchronously from inside `Registry::broadcast`,
//!   once per occurrence of the subscriber in the registry.
//! - `receive` has no return value. Delivery failures are the subscriber's
//!   own business: log them, count them, drop the message.
//! - A panic in `receive` is caught by the registry and handled per
//!   [`FailurePolicy`](crate::FailurePolicy); it never escapes `broadcast`.
//! - `receive` may call back into the registry (`register`, `deregister`);
//!   no registry lock is held while it runs.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use fanbus::{Registry, Subscribe};
//!
//! #[derive(Default)]
//! struct Counter(AtomicUsize);
//!
//! impl Subscribe for Counter {
//!     fn receive(&self, _message: &str) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//!
//!     fn name(&self) -> &'static str { "counter" }
//! }
//!
//! let registry = Registry::new();
//! let counter = Arc::new(Counter::default());
//! registry.register(&counter);
//! registry.broadcast("ping");
//! assert_eq!(counter.0.load(Ordering::Relaxed), 1);
//! ```

/// Receiver of broadcast messages.
///
/// Implementations are owned by the caller and reached by the registry
/// through a non-owning reference only.
///
/// ### Implementation requirements
/// - Handle delivery errors internally; do not panic.
/// - Keep destination identity (address, phone, ...) fixed after construction.
pub trait Subscribe: Send + Sync + 'static {
    /// Handles a single broadcast message.
    fn receive(&self, message: &str);

    /// Returns the subscriber name used in logs and broadcast reports.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
