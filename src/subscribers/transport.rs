//! # Delivery transports for the built-in subscribers.
//!
//! A [`Transport`] takes a fully rendered line ("Email to ...: ...") and hands
//! it to the outside world. The built-in subscribers own one transport each
//! and absorb its errors.
//!
//! - [`Stdout`] prints each line (default).
//! - [`Buffer`] records lines in memory; clones share the same buffer, so one
//!   buffer can observe the interleaving of several subscribers.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::DeliveryError;

/// Sink for rendered notification lines.
pub trait Transport: Send + Sync + 'static {
    /// Sends one rendered line.
    fn send(&self, line: &str) -> Result<(), DeliveryError>;
}

/// Writes each line to standard output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stdout;

impl Transport for Stdout {
    fn send(&self, line: &str) -> Result<(), DeliveryError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}")?;
        Ok(())
    }
}

/// In-memory transport recording every line it is given.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Buffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Removes and returns the recorded lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }

    /// Number of recorded lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl Transport for Buffer {
    fn send(&self, line: &str) -> Result<(), DeliveryError> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}

/// Shared delivery path of the built-in subscribers: send, then count or log.
pub(crate) struct Courier {
    transport: Box<dyn Transport>,
    delivered: AtomicU64,
    failed: AtomicU64,
}

impl Courier {
    pub(crate) fn new<T: Transport>(transport: T) -> Self {
        Self {
            transport: Box::new(transport),
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    pub(crate) fn deliver(&self, subscriber: &'static str, destination: &str, line: &str) {
        match self.transport.send(line) {
            Ok(()) => {
                self.delivered.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    subscriber,
                    destination,
                    error = e.as_label(),
                    detail = %e.as_message(),
                    "delivery failed; message dropped"
                );
            }
        }
    }

    pub(crate) fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    pub(crate) fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}
