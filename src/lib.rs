//! # fanbus
//!
//! **fanbus** is a small in-process notification registry for Rust.
//!
//! Callers register subscribers, then broadcast messages; every currently
//! registered subscriber receives each message, in registration order. The
//! registry never owns its subscribers: it holds `Weak` references, so dropping
//! a subscriber is always safe and simply removes it from future deliveries.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐
//!     │ EmailSubscriber  │  │  SmsSubscriber   │  │ custom Subscribe │
//!     │ (Arc, caller-    │  │ (Arc, caller-    │  │ (Arc, caller-    │
//!     │  owned)          │  │  owned)          │  │  owned)          │
//!     └────────┬─────────┘  └────────┬─────────┘  └────────┬─────────┘
//!              │ register(&arc)      │                     │
//!              ▼                     ▼                     ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Registry                                                         │
//! │  - entries: RwLock<Vec<Weak<dyn Subscribe>>> (insertion order)    │
//! │  - register / deregister (first match) / deregister_all           │
//! │  - broadcast: snapshot → receive() per entry → BroadcastReport    │
//! └───────────────────────────────────────────────────────────────────┘
//!              │ broadcast(msg)
//!              ▼
//!     receive(msg) on entry 1 ──► entry 2 ──► ... ──► entry N
//!              │
//!              └─ panic → caught; FailurePolicy::Isolate (continue) | Abort (stop)
//! ```
//!
//! ### Queued fan-out (`fanout` feature)
//! ```text
//! FanOut::broadcast(msg) ──► [queue 1] ──► worker 1 ──► sub1.receive().await
//!                        ├─► [queue 2] ──► worker 2 ──► sub2.receive().await
//!                        └─► [queue N] ──► worker N ──► subN.receive().await
//! ```
//!
//! ## Features
//! | Area               | Description                                                   | Key types / traits                          |
//! |--------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Subscriber API** | Receive broadcasts; built-in email and SMS variants.          | [`Subscribe`], [`EmailSubscriber`], [`SmsSubscriber`] |
//! | **Registry**       | Ordered, non-owning, synchronous broadcast.                   | [`Registry`], [`BroadcastReport`]           |
//! | **Policies**       | What a broadcast does when a subscriber panics.               | [`FailurePolicy`]                           |
//! | **Transports**     | Where built-in subscribers send rendered lines.               | [`Transport`], [`Stdout`], [`Buffer`]       |
//! | **Errors**         | Typed delivery errors, absorbed by subscribers.               | [`DeliveryError`]                           |
//! | **Configuration**  | Centralize registry settings.                                 | [`Config`]                                  |
//!
//! ## Optional features
//! - `fanout` _(default)_: exports [`FanOut`] and [`AsyncSubscribe`] (tokio-based).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use fanbus::{Buffer, EmailSubscriber, Registry, SmsSubscriber};
//!
//! let out = Buffer::new();
//! let email = Arc::new(EmailSubscriber::new("alice@example.com").with_transport(out.clone()));
//! let sms = Arc::new(SmsSubscriber::new("1234567890").with_transport(out.clone()));
//!
//! let registry = Registry::new();
//! registry.register(&email);
//! registry.register(&sms);
//!
//! registry.broadcast("Hello, World!");
//! registry.deregister(&sms);
//! registry.broadcast("Goodbye!");
//!
//! assert_eq!(out.lines(), vec![
//!     "Email to alice@example.com: Hello, World!",
//!     "SMS to 1234567890: Hello, World!",
//!     "Email to alice@example.com: Goodbye!",
//! ]);
//! ```
mod config;
mod error;
mod handle;
mod policies;
mod registry;
mod subscribers;
mod unwind;

// ---- Public re-exports ----

pub use config::{Config, MAX_QUEUE_CAPACITY};
pub use error::DeliveryError;
pub use handle::Downgrade;
pub use policies::FailurePolicy;
pub use registry::{BroadcastReport, Registry};
pub use subscribers::{Buffer, EmailSubscriber, SmsSubscriber, Stdout, Subscribe, Transport};

// Optional: queued async fan-out.
// Enabled by default; disable with `--no-default-features`.
#[cfg(feature = "fanout")]
mod fanout;
#[cfg(feature = "fanout")]
pub use fanout::{AsyncSubscribe, FanOut, FanOutReport};
