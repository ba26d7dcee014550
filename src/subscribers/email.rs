//! # Email-style subscriber.
//!
//! [`EmailSubscriber`] renders every message as
//!
//! ```text
//! Email to alice@example.com: Hello, World!
//! ```
//!
//! and hands the line to its [`Transport`] (stdout unless configured).

use crate::subscribers::transport::{Courier, Stdout, Transport};
use crate::subscribers::Subscribe;

/// Subscriber that delivers messages to an email address.
pub struct EmailSubscriber {
    address: String,
    courier: Courier,
}

impl EmailSubscriber {
    /// Creates a subscriber for `address` printing to stdout.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            courier: Courier::new(Stdout),
        }
    }

    /// Replaces the transport.
    #[must_use]
    pub fn with_transport<T: Transport>(mut self, transport: T) -> Self {
        self.courier = Courier::new(transport);
        self
    }

    /// Destination address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Renders `message` the way it is delivered.
    pub fn render(&self, message: &str) -> String {
        format!("Email to {}: {}", self.address, message)
    }

    /// Number of messages the transport accepted.
    pub fn delivered(&self) -> u64 {
        self.courier.delivered()
    }

    /// Number of messages the transport refused.
    pub fn failed(&self) -> u64 {
        self.courier.failed()
    }
}

impl Subscribe for EmailSubscriber {
    fn receive(&self, message: &str) {
        let line = self.render(message);
        self.courier.deliver("email", &self.address, &line);
    }

    fn name(&self) -> &'static str {
        "email"
    }
}

#[cfg(feature = "fanout")]
#[async_trait::async_trait]
impl crate::fanout::AsyncSubscribe for EmailSubscriber {
    async fn receive(&self, message: &str) {
        Subscribe::receive(self, message);
    }

    fn name(&self) -> &'static str {
        "email"
    }
}
