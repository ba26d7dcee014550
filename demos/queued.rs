//! # Example: queued
//!
//! Same scenario as `observer`, served by the queued [`FanOut`]: each
//! subscriber has its own queue and worker task.
//!
//! ## Run
//! ```bash
//! RUST_LOG=fanbus=debug cargo run --example queued
//! ```

use std::sync::Arc;

use fanbus::{EmailSubscriber, FanOut, SmsSubscriber};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let fan = FanOut::new();
    let email = Arc::new(EmailSubscriber::new("alice@example.com"));
    let sms = Arc::new(SmsSubscriber::new("1234567890"));

    fan.register(&email);
    fan.register(&sms);

    let report = fan.broadcast("Hello, World!");
    println!("queued for {} subscribers", report.queued);

    // already-queued messages are still delivered after deregistration
    fan.deregister(&sms);
    fan.broadcast("Goodbye!");

    fan.shutdown().await;
    println!("email delivered={} sms delivered={}", email.delivered(), sms.delivered());
}
