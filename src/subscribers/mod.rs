//! # Subscribers for the notification registry.
//!
//! This module provides the [`Subscribe`] trait and the built-in variants.
//!
//! ## Architecture
//! ```text
//! Registry::broadcast(msg)
//!     │
//!     ├──► Subscribe::receive(msg)
//!     │         │
//!     │    ┌────┴──────────┬────────────────┬──────────┐
//!     │    ▼               ▼                ▼          ▼
//!     │  EmailSubscriber  SmsSubscriber   Custom      ...
//!     │    │               │
//!     │    └──► Transport ◄┘   (Stdout, Buffer, custom)
//! ```
//!
//! Built-in variants render the message for their destination and pass the
//! line to a [`Transport`]. Transport errors are logged and counted by the
//! subscriber; they never reach the registry.

mod email;
mod sms;
mod subscriber;
mod transport;

pub use email::EmailSubscriber;
pub use sms::SmsSubscriber;
pub use subscriber::Subscribe;
pub use transport::{Buffer, Stdout, Transport};
