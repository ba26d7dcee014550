//! Error types used by subscriber transports.
//!
//! The registry itself never fails: deregistering an absent subscriber and
//! broadcasting to an empty registry are no-ops. The only error type here is
//! [`DeliveryError`], produced by a [`Transport`](crate::Transport) and handled
//! entirely inside the subscriber that owns it.
//!
//! Like the rest of the crate's errors it provides `as_label` / `as_message`
//! helpers for logs.

use thiserror::Error;

/// # Errors produced while handing a rendered message to its destination.
///
/// These never cross the registry boundary. A subscriber that receives one
/// logs it, bumps its failure counter and returns normally, so delivery to the
/// remaining subscribers is unaffected.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The destination could not be reached at all.
    #[error("destination {destination} unreachable")]
    Unreachable {
        /// Address, phone number or other destination identity.
        destination: String,
    },

    /// The destination was reached but refused the message.
    #[error("destination {destination} rejected message: {reason}")]
    Rejected {
        /// Address, phone number or other destination identity.
        destination: String,
        /// Reason reported by the transport.
        reason: String,
    },

    /// Writing the rendered line failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl DeliveryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fanbus::DeliveryError;
    ///
    /// let err = DeliveryError::Unreachable { destination: "alice@example.com".into() };
    /// assert_eq!(err.as_label(), "delivery_unreachable");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DeliveryError::Unreachable { .. } => "delivery_unreachable",
            DeliveryError::Rejected { .. } => "delivery_rejected",
            DeliveryError::Io(_) => "delivery_io",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DeliveryError::Unreachable { destination } => {
                format!("unreachable: {destination}")
            }
            DeliveryError::Rejected {
                destination,
                reason,
            } => format!("rejected by {destination}: {reason}"),
            DeliveryError::Io(e) => format!("io: {e}"),
        }
    }
}
