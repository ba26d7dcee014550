//! # Notification registry - ordered broadcast to non-owning subscribers.
//!
//! [`Registry`] keeps an ordered sequence of subscriber references and
//! delivers each broadcast message to every entry, in registration order.
//!
//! ## Architecture
//! ```text
//! register(&sub) ──► entries.push(Weak)          (write lock)
//! deregister(&sub) ─► entries.remove(first match) (write lock)
//!
//! broadcast(msg)
//!     ├─► snapshot = entries.clone()              (read lock, released)
//!     ├─► for entry in snapshot (in order):
//!     │       ├─ upgrade fails   → dropped += 1, skip
//!     │       ├─ receive(msg)    → delivered += 1
//!     │       └─ receive panics  → panicked.push(name)
//!     │                              ├─ Isolate → continue
//!     │                              └─ Abort   → stop
//!     └─► prune dropped entries                   (if cfg.prune_dropped)
//! ```
//!
//! ## Rules
//! - The registry never owns a subscriber; it stores `Weak` references.
//! - Identity is the subscriber's allocation, never value equality.
//! - Duplicates are allowed: an entry registered twice receives each broadcast twice.
//! - `deregister` removes the **first** matching entry; `deregister_all` removes all.
//! - Deregistering an absent subscriber, or broadcasting to nobody, is a no-op.
//! - `broadcast` works on a snapshot taken when it starts. Registrations and
//!   deregistrations made while it runs (including from inside `receive`)
//!   take effect from the next broadcast.
//! - No lock is held while subscriber code runs.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Weak;

use parking_lot::RwLock;

use crate::config::Config;
use crate::handle::{identity, Downgrade};
use crate::registry::BroadcastReport;
use crate::subscribers::Subscribe;
use crate::unwind::panic_message;

/// One occurrence of a subscriber in the sequence.
#[derive(Clone)]
struct Entry {
    target: Weak<dyn Subscribe>,
    name: &'static str,
}

impl Entry {
    #[inline]
    fn points_to(&self, id: *const ()) -> bool {
        identity(&self.target) == id
    }

    #[inline]
    fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }
}

/// Ordered registry of non-owning subscriber references.
///
/// `Registry` is `Send + Sync`; share it behind an `Arc` when subscribers or
/// other threads need to reach it.
pub struct Registry {
    cfg: Config,
    entries: RwLock<Vec<Entry>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry with the default [`Config`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(cfg: Config) -> Self {
        Self {
            cfg,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Appends `subscriber` to the end of the sequence.
    ///
    /// Duplicates are not rejected. A handle whose subscriber is already
    /// dropped is ignored.
    pub fn register(&self, subscriber: &impl Downgrade<dyn Subscribe>) {
        let target = subscriber.downgrade();
        let Some(live) = target.upgrade() else {
            tracing::debug!(
                registry = self.cfg.label,
                "ignoring registration of a dropped subscriber"
            );
            return;
        };
        let name = live.name();
        drop(live);

        let len = {
            let mut entries = self.entries.write();
            entries.push(Entry { target, name });
            entries.len()
        };
        tracing::debug!(registry = self.cfg.label, subscriber = name, len, "subscriber registered");
    }

    /// Removes the first entry referring to `subscriber`.
    ///
    /// Returns `false` (and does nothing) if it is not registered.
    pub fn deregister(&self, subscriber: &impl Downgrade<dyn Subscribe>) -> bool {
        let id = identity(&subscriber.downgrade());
        let removed = {
            let mut entries = self.entries.write();
            let idx = entries.iter().position(|e| e.points_to(id));
            idx.map(|idx| entries.remove(idx))
        };

        match removed {
            Some(entry) => {
                tracing::debug!(
                    registry = self.cfg.label,
                    subscriber = entry.name,
                    "subscriber deregistered"
                );
                true
            }
            None => false,
        }
    }

    /// Removes every entry referring to `subscriber`, returning how many were removed.
    pub fn deregister_all(&self, subscriber: &impl Downgrade<dyn Subscribe>) -> usize {
        let id = identity(&subscriber.downgrade());
        let removed = {
            let mut entries = self.entries.write();
            let before = entries.len();
            entries.retain(|e| !e.points_to(id));
            before - entries.len()
        };
        if removed > 0 {
            tracing::debug!(registry = self.cfg.label, removed, "subscriber deregistered (all)");
        }
        removed
    }

    /// Delivers `message` to every registered subscriber, in registration order.
    ///
    /// See the module docs for snapshot and failure semantics.
    pub fn broadcast(&self, message: &str) -> BroadcastReport {
        let snapshot: Vec<Entry> = self.entries.read().clone();
        let mut report = BroadcastReport::default();

        for entry in &snapshot {
            let Some(sub) = entry.target.upgrade() else {
                report.dropped += 1;
                continue;
            };

            match panic::catch_unwind(AssertUnwindSafe(|| sub.receive(message))) {
                Ok(()) => report.delivered += 1,
                Err(payload) => {
                    tracing::warn!(
                        registry = self.cfg.label,
                        subscriber = entry.name,
                        panic = %panic_message(&*payload),
                        "subscriber panicked during broadcast"
                    );
                    report.panicked.push(entry.name);
                    if self.cfg.failure.stops_on_failure() {
                        report.aborted = true;
                        break;
                    }
                }
            }
        }
        drop(snapshot);

        if report.dropped > 0 && self.cfg.prune_dropped {
            self.prune();
        }
        report
    }

    /// Removes entries whose subscriber has been dropped, returning how many were removed.
    pub fn prune(&self) -> usize {
        let removed = {
            let mut entries = self.entries.write();
            let before = entries.len();
            entries.retain(Entry::is_alive);
            before - entries.len()
        };
        if removed > 0 {
            tracing::debug!(registry = self.cfg.label, removed, "pruned dropped subscribers");
        }
        removed
    }

    /// Removes all entries, returning how many there were.
    pub fn clear(&self) -> usize {
        let drained = std::mem::take(&mut *self.entries.write());
        drained.len()
    }

    /// True if `subscriber` appears at least once.
    #[must_use]
    pub fn contains(&self, subscriber: &impl Downgrade<dyn Subscribe>) -> bool {
        self.occurrences(subscriber) > 0
    }

    /// Number of entries referring to `subscriber`.
    #[must_use]
    pub fn occurrences(&self, subscriber: &impl Downgrade<dyn Subscribe>) -> usize {
        let id = identity(&subscriber.downgrade());
        self.entries.read().iter().filter(|e| e.points_to(id)).count()
    }

    /// Number of entries, including ones whose subscriber was dropped but not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
