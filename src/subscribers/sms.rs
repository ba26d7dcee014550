//! # SMS-style subscriber.
//!
//! [`SmsSubscriber`] renders every message as `SMS to {phone}: {message}`.

use crate::subscribers::transport::{Courier, Stdout, Transport};
use crate::subscribers::Subscribe;

/// Subscriber that delivers messages to a phone number.
pub struct SmsSubscriber {
    phone: String,
    courier: Courier,
}

impl SmsSubscriber {
    /// Creates a subscriber for `phone` printing to stdout.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            courier: Courier::new(Stdout),
        }
    }

    /// Replaces the transport.
    #[must_use]
    pub fn with_transport<T: Transport>(mut self, transport: T) -> Self {
        self.courier = Courier::new(transport);
        self
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn render(&self, message: &str) -> String {
        format!("SMS to {}: {}", self.phone, message)
    }

    pub fn delivered(&self) -> u64 {
        self.courier.delivered()
    }

    pub fn failed(&self) -> u64 {
        self.courier.failed()
    }
}

impl Subscribe for SmsSubscriber {
    fn receive(&self, message: &str) {
        let line = self.render(message);
        self.courier.deliver("sms", &self.phone, &line);
    }

    fn name(&self) -> &'static str {
        "sms"
    }
}

#[cfg(feature = "fanout")]
#[async_trait::async_trait]
impl crate::fanout::AsyncSubscribe for SmsSubscriber {
    async fn receive(&self, message: &str) {
        Subscribe::receive(self, message);
    }

    fn name(&self) -> &'static str {
        "sms"
    }
}
