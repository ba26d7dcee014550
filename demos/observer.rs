//! # Example: observer
//!
//! Registers an email and an SMS subscriber, broadcasts, removes one
//! subscriber, and broadcasts again.
//!
//! ## Flow
//! ```text
//! Registry::new()
//!     ├─► register(email)   ──► [email]
//!     ├─► register(sms)     ──► [email, sms]
//!     ├─► broadcast("Hello, World!")
//!     │     ├─► email.receive() ──► "Email to alice@example.com: Hello, World!"
//!     │     └─► sms.receive()   ──► "SMS to 1234567890: Hello, World!"
//!     ├─► deregister(sms)   ──► [email]
//!     └─► broadcast("Goodbye!")
//!           └─► email.receive() ──► "Email to alice@example.com: Goodbye!"
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example observer
//! RUST_LOG=fanbus=debug cargo run --example observer
//! ```

use std::sync::Arc;

use fanbus::{EmailSubscriber, Registry, SmsSubscriber};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let registry = Registry::new();
    let email = Arc::new(EmailSubscriber::new("alice@example.com"));
    let sms = Arc::new(SmsSubscriber::new("1234567890"));

    registry.register(&email);
    registry.register(&sms);

    registry.broadcast("Hello, World!");
    registry.deregister(&sms);
    registry.broadcast("Goodbye!");

    println!();
    println!("Deliveries:");
    println!(" ├─► email: {}", email.delivered());
    println!(" └─► sms:   {}", sms.delivered());
}
