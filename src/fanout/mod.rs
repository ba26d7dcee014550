//! Queued fan-out: the notification registry for concurrent, async subscribers.
//!
//! - [`subscribe`]: the [`AsyncSubscribe`] trait;
//! - [`fanout`]: [`FanOut`], per-subscriber queues and workers.
//!
//! Enabled by the `fanout` feature (on by default).

mod fanout;
mod subscribe;

pub use fanout::{FanOut, FanOutReport};
pub use subscribe::AsyncSubscribe;
