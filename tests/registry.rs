use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fanbus::{Buffer, Config, EmailSubscriber, FailurePolicy, Registry, SmsSubscriber, Subscribe};

fn email(out: &Buffer) -> Arc<EmailSubscriber> {
    Arc::new(EmailSubscriber::new("alice@example.com").with_transport(out.clone()))
}

fn sms(out: &Buffer) -> Arc<SmsSubscriber> {
    Arc::new(SmsSubscriber::new("1234567890").with_transport(out.clone()))
}

#[test]
fn hello_then_goodbye() {
    let out = Buffer::new();
    let e = email(&out);
    let s = sms(&out);
    let registry = Registry::new();

    registry.register(&e);
    registry.register(&s);
    let hello = registry.broadcast("Hello, World!");
    assert_eq!(hello.delivered, 2);
    assert_eq!(
        out.take(),
        vec![
            "Email to alice@example.com: Hello, World!",
            "SMS to 1234567890: Hello, World!",
        ]
    );

    assert!(registry.deregister(&s));
    let goodbye = registry.broadcast("Goodbye!");
    assert_eq!(goodbye.delivered, 1);
    assert_eq!(out.take(), vec!["Email to alice@example.com: Goodbye!"]);

    assert_eq!(e.delivered(), 2);
    assert_eq!(s.delivered(), 1);
}

#[test]
fn completed_broadcasts_are_unaffected_by_deregistration() {
    let out = Buffer::new();
    let s = sms(&out);
    let registry = Registry::new();
    registry.register(&s);

    registry.broadcast("one");
    registry.deregister(&s);
    registry.broadcast("two");

    assert_eq!(out.lines(), vec!["SMS to 1234567890: one"]);
}

#[derive(Default)]
struct Tally(AtomicUsize);

impl Subscribe for Tally {
    fn receive(&self, _message: &str) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    fn name(&self) -> &'static str {
        "tally"
    }
}

#[test]
fn deliveries_match_occurrences() {
    let registry = Registry::new();
    let tally = Arc::new(Tally::default());

    for n in 1..=4 {
        registry.register(&tally);
        tally.0.store(0, Ordering::Relaxed);
        registry.broadcast("x");
        assert_eq!(tally.0.load(Ordering::Relaxed), n);
        assert_eq!(registry.occurrences(&tally), n);
    }

    registry.deregister(&tally);
    tally.0.store(0, Ordering::Relaxed);
    registry.broadcast("x");
    assert_eq!(tally.0.load(Ordering::Relaxed), 3);
}

#[test]
fn mixed_trait_objects_in_one_registry() {
    let out = Buffer::new();
    let subs: Vec<Arc<dyn Subscribe>> = vec![email(&out), sms(&out), Arc::new(Tally::default())];
    let registry = Registry::new();
    for sub in &subs {
        registry.register(sub);
    }

    let report = registry.broadcast("hi");
    assert_eq!(report.delivered, 3);
    assert_eq!(out.len(), 2);

    assert!(registry.deregister(&subs[0]));
    assert!(!registry.contains(&subs[0]));
    assert_eq!(registry.len(), 2);
}

#[test]
fn dropping_a_subscriber_without_deregistering_is_safe() {
    let out = Buffer::new();
    let registry = Registry::new();
    let e = email(&out);
    {
        let s = sms(&out);
        registry.register(&e);
        registry.register(&s);
    }

    let report = registry.broadcast("still here?");
    assert_eq!(report.delivered, 1);
    assert_eq!(report.dropped, 1);
    assert_eq!(out.lines(), vec!["Email to alice@example.com: still here?"]);
    assert_eq!(registry.len(), 1);
}

struct Flaky;

impl Subscribe for Flaky {
    fn receive(&self, message: &str) {
        if message.starts_with('!') {
            panic!("cannot handle {message}");
        }
    }

    fn name(&self) -> &'static str {
        "flaky"
    }
}

#[test]
fn abort_policy_is_per_broadcast() {
    let out = Buffer::new();
    let registry = Registry::with_config(Config {
        failure: FailurePolicy::Abort,
        ..Config::default()
    });
    let flaky = Arc::new(Flaky);
    let e = email(&out);
    registry.register(&flaky);
    registry.register(&e);

    let bad = registry.broadcast("!bad");
    assert!(bad.aborted);
    assert!(out.is_empty());

    let good = registry.broadcast("good");
    assert!(good.is_clean());
    assert_eq!(out.lines(), vec!["Email to alice@example.com: good"]);
}
