//! # Non-blocking fan-out to async subscribers.
//!
//! Provides [`FanOut`], the registry form for concurrent environments. Every
//! registration owns a bounded queue and a worker task, so `broadcast` never
//! waits for subscriber code.
//!
//! ## Architecture
//! ```text
//! broadcast(msg)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► sub1.receive()
//!     │    (bounded)         └──────► panic → logged, next message
//!     ├──► [queue 2] ──► worker 2 ──► sub2.receive()
//!     │    (bounded)
//!     └──► [queue N] ──► worker N ──► subN.receive()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **Enqueue in registration order**, but no cross-subscriber delivery ordering.
//! - **Per-subscriber FIFO**: each registration sees messages in broadcast order.
//! - **Overflow**: the message is dropped for that subscriber only and logged.
//! - **Non-owning**: workers hold `Weak` references and exit once the subscriber is dropped.
//! - **Deregistration** closes the queue; messages already queued are still delivered.
//! - **Duplicates**: registering twice creates two queues and two deliveries per broadcast.
//!
//! ## Shutdown
//! - [`FanOut::shutdown`] closes every queue and waits until workers drain them.
//! - [`FanOut::close`] cancels workers immediately; queued messages are discarded.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a subscriber uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::sync::{Arc, Weak};

use futures::FutureExt;
use parking_lot::{Mutex, RwLock};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::config::{clamp_queue_capacity, Config};
use crate::fanout::AsyncSubscribe;
use crate::handle::{identity, Downgrade};
use crate::unwind::panic_message;

/// Per-registration queue with metadata.
struct SubscriberChannel {
    target: Weak<dyn AsyncSubscribe>,
    name: &'static str,
    sender: mpsc::Sender<Arc<str>>,
}

/// Outcome of one [`FanOut::broadcast`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FanOutReport {
    /// Queues the message was placed on.
    pub queued: usize,
    /// Subscribers whose queue was full; the message was dropped for them.
    pub overflowed: Vec<&'static str>,
    /// Queues whose worker had already exited (subscriber dropped or cancelled).
    pub closed: usize,
}

/// Fan-out coordinator with per-subscriber bounded queues and worker tasks.
///
/// `register` spawns onto the current tokio runtime and must be called from
/// within one.
pub struct FanOut {
    cfg: Config,
    channels: RwLock<Vec<SubscriberChannel>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    token: CancellationToken,
}

impl Default for FanOut {
    fn default() -> Self {
        Self::new()
    }
}

impl FanOut {
    /// Creates an empty fan-out with the default [`Config`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty fan-out with the given configuration.
    #[must_use]
    pub fn with_config(cfg: Config) -> Self {
        Self {
            cfg,
            channels: RwLock::new(Vec::new()),
            workers: Mutex::new(Vec::new()),
            token: CancellationToken::new(),
        }
    }

    /// Registers `subscriber` and spawns its worker.
    ///
    /// A handle whose subscriber is already dropped is ignored, and so is any
    /// registration after [`close`](Self::close).
    pub fn register(&self, subscriber: &impl Downgrade<dyn AsyncSubscribe>) {
        if self.token.is_cancelled() {
            tracing::debug!(
                registry = self.cfg.label,
                "ignoring registration on a closed fan-out"
            );
            return;
        }
        let target = subscriber.downgrade();
        let Some(live) = target.upgrade() else {
            tracing::debug!(
                registry = self.cfg.label,
                "ignoring registration of a dropped subscriber"
            );
            return;
        };
        let name = live.name();
        let cap = live
            .queue_capacity()
            .map_or_else(|| self.cfg.queue_capacity_clamped(), clamp_queue_capacity);
        drop(live);

        let (tx, rx) = mpsc::channel::<Arc<str>>(cap);
        let worker = tokio::spawn(run_worker(
            target.clone(),
            name,
            rx,
            self.token.child_token(),
            self.cfg.label,
        ));

        self.channels.write().push(SubscriberChannel {
            target,
            name,
            sender: tx,
        });
        {
            let mut workers = self.workers.lock();
            workers.retain(|h| !h.is_finished());
            workers.push(worker);
        }
        tracing::debug!(registry = self.cfg.label, subscriber = name, cap, "subscriber registered");
    }

    /// Removes the first registration of `subscriber`.
    ///
    /// Its queue is closed; messages already queued are still delivered.
    /// Returns `false` if it was not registered.
    pub fn deregister(&self, subscriber: &impl Downgrade<dyn AsyncSubscribe>) -> bool {
        let id = identity(&subscriber.downgrade());
        let removed = {
            let mut channels = self.channels.write();
            let idx = channels.iter().position(|c| identity(&c.target) == id);
            idx.map(|idx| channels.remove(idx))
        };

        match removed {
            Some(channel) => {
                tracing::debug!(
                    registry = self.cfg.label,
                    subscriber = channel.name,
                    "subscriber deregistered"
                );
                true
            }
            None => false,
        }
    }

    /// Queues `message` for every registered subscriber (non-blocking).
    ///
    /// - Uses `try_send`; never waits for a subscriber.
    /// - On queue full: drops the message for that subscriber and logs it.
    /// - On queue closed: counts it and, with `prune_dropped`, removes the entry.
    pub fn broadcast(&self, message: &str) -> FanOutReport {
        let message: Arc<str> = Arc::from(message);
        let mut report = FanOutReport::default();

        {
            let channels = self.channels.read();
            for channel in channels.iter() {
                match channel.sender.try_send(Arc::clone(&message)) {
                    Ok(()) => report.queued += 1,
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        tracing::warn!(
                            registry = self.cfg.label,
                            subscriber = channel.name,
                            "subscriber dropped message: queue full"
                        );
                        report.overflowed.push(channel.name);
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => report.closed += 1,
                }
            }
        }

        if report.closed > 0 && self.cfg.prune_dropped {
            self.channels.write().retain(|c| !c.sender.is_closed());
        }
        report
    }

    /// True if `subscriber` has at least one registration.
    #[must_use]
    pub fn contains(&self, subscriber: &impl Downgrade<dyn AsyncSubscribe>) -> bool {
        let id = identity(&subscriber.downgrade());
        self.channels
            .read()
            .iter()
            .any(|c| identity(&c.target) == id)
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.read().len()
    }

    /// True if there are no registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.read().is_empty()
    }

    /// Cancels every worker now; queued messages are discarded.
    ///
    /// Later calls to [`register`](Self::register) are ignored.
    pub fn close(&self) {
        self.token.cancel();
    }

    /// Graceful shutdown: close all queues and await worker completion.
    pub async fn shutdown(self) {
        drop(std::mem::take(&mut *self.channels.write()));
        let workers = std::mem::take(&mut *self.workers.lock());
        for h in workers {
            let _ = h.await;
        }
    }
}

async fn run_worker(
    target: Weak<dyn AsyncSubscribe>,
    name: &'static str,
    mut rx: mpsc::Receiver<Arc<str>>,
    token: CancellationToken,
    label: &'static str,
) {
    loop {
        let message = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            msg = rx.recv() => match msg {
                Some(msg) => msg,
                None => break,
            },
        };

        let Some(sub) = target.upgrade() else {
            tracing::debug!(registry = label, subscriber = name, "subscriber dropped; worker exiting");
            break;
        };

        let fut = sub.receive(&message);
        if let Err(payload) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
            tracing::warn!(
                registry = label,
                subscriber = name,
                panic = %panic_message(&*payload),
                "subscriber panicked"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        id: &'static str,
        log: Log,
        cap: Option<usize>,
    }

    impl Recorder {
        fn new(id: &'static str, log: &Log) -> Arc<Self> {
            Arc::new(Self {
                id,
                log: Arc::clone(log),
                cap: None,
            })
        }
    }

    #[async_trait::async_trait]
    impl AsyncSubscribe for Recorder {
        async fn receive(&self, message: &str) {
            if message == "boom" {
                panic!("refusing {message}");
            }
            self.log.lock().push(format!("{}:{}", self.id, message));
        }

        fn name(&self) -> &'static str {
            self.id
        }

        fn queue_capacity(&self) -> Option<usize> {
            self.cap
        }
    }

    fn lines(log: &Log, id: &str) -> Vec<String> {
        log.lock()
            .iter()
            .filter(|l| l.starts_with(&format!("{id}:")))
            .cloned()
            .collect()
    }

    #[tokio::test]
    async fn per_subscriber_fifo() {
        let log = Log::default();
        let fan = FanOut::new();
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);
        fan.register(&a);
        fan.register(&b);

        for m in ["1", "2", "3"] {
            assert_eq!(fan.broadcast(m).queued, 2);
        }
        fan.shutdown().await;

        assert_eq!(lines(&log, "a"), vec!["a:1", "a:2", "a:3"]);
        assert_eq!(lines(&log, "b"), vec!["b:1", "b:2", "b:3"]);
    }

    #[tokio::test]
    async fn overflow_drops_for_that_subscriber_only() {
        let log = Log::default();
        let fan = FanOut::new();
        let tiny = Arc::new(Recorder {
            id: "tiny",
            log: Arc::clone(&log),
            cap: Some(1),
        });
        let roomy = Recorder::new("roomy", &log);
        fan.register(&tiny);
        fan.register(&roomy);

        // Current-thread runtime: workers do not run until we yield.
        let first = fan.broadcast("1");
        let second = fan.broadcast("2");

        assert_eq!(first.queued, 2);
        assert_eq!(second.queued, 1);
        assert_eq!(second.overflowed, vec!["tiny"]);

        fan.shutdown().await;
        assert_eq!(lines(&log, "tiny"), vec!["tiny:1"]);
        assert_eq!(lines(&log, "roomy"), vec!["roomy:1", "roomy:2"]);
    }

    #[tokio::test]
    async fn deregister_keeps_in_flight_messages() {
        let log = Log::default();
        let fan = FanOut::new();
        let a = Recorder::new("a", &log);
        fan.register(&a);

        fan.broadcast("before");
        assert!(fan.deregister(&a));
        assert!(!fan.deregister(&a));
        assert_eq!(fan.broadcast("after").queued, 0);

        fan.shutdown().await;
        assert_eq!(lines(&log, "a"), vec!["a:before"]);
    }

    #[tokio::test]
    async fn panics_do_not_stop_the_worker() {
        let log = Log::default();
        let fan = FanOut::new();
        let a = Recorder::new("a", &log);
        fan.register(&a);

        fan.broadcast("1");
        fan.broadcast("boom");
        fan.broadcast("2");
        fan.shutdown().await;

        assert_eq!(lines(&log, "a"), vec!["a:1", "a:2"]);
    }

    #[tokio::test]
    async fn close_discards_queued_messages() {
        let log = Log::default();
        let fan = FanOut::new();
        let a = Recorder::new("a", &log);
        fan.register(&a);

        fan.broadcast("never");
        fan.close();
        fan.shutdown().await;

        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn register_after_close_is_ignored() {
        let log = Log::default();
        let fan = FanOut::new();
        let a = Recorder::new("a", &log);

        fan.close();
        fan.register(&a);

        assert!(fan.is_empty());
        assert!(!fan.contains(&a));
        assert_eq!(fan.broadcast("x"), FanOutReport::default());
        fan.shutdown().await;
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn oversized_capacities_are_clamped() {
        let log = Log::default();
        let fan = FanOut::with_config(Config {
            queue_capacity: usize::MAX,
            ..Config::default()
        });
        let by_config = Recorder::new("cfg", &log);
        let by_request = Arc::new(Recorder {
            id: "req",
            log: Arc::clone(&log),
            cap: Some(usize::MAX),
        });
        fan.register(&by_config);
        fan.register(&by_request);

        assert_eq!(fan.len(), 2);
        assert_eq!(fan.broadcast("x").queued, 2);
        fan.shutdown().await;
        assert_eq!(lines(&log, "cfg"), vec!["cfg:x"]);
        assert_eq!(lines(&log, "req"), vec!["req:x"]);
    }

    #[tokio::test]
    async fn dropped_subscriber_stops_its_worker() {
        let log = Log::default();
        let fan = FanOut::new();
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);
        fan.register(&a);
        fan.register(&b);
        assert!(fan.contains(&b));

        drop(b);
        fan.broadcast("x");
        fan.shutdown().await;

        assert_eq!(lines(&log, "a"), vec!["a:x"]);
        assert!(lines(&log, "b").is_empty());
    }

    #[tokio::test]
    async fn duplicates_get_two_queues() {
        let log = Log::default();
        let fan = FanOut::new();
        let a = Recorder::new("a", &log);
        fan.register(&a);
        fan.register(&a);

        assert_eq!(fan.len(), 2);
        assert_eq!(fan.broadcast("x").queued, 2);
        fan.shutdown().await;
        assert_eq!(lines(&log, "a").len(), 2);
    }
}
