//! # Non-owning subscriber handles.
//!
//! Registries never own their subscribers. They keep a [`Weak`] reference and
//! compare entries by the address of the subscriber's allocation, never by
//! value. [`Downgrade`] is the conversion every `register` / `deregister` call
//! goes through, so callers can pass whatever handle they hold:
//!
//! ```text
//! &Arc<EmailSubscriber>      ─┐
//! &Arc<dyn Subscribe>        ─┼──► Downgrade::downgrade() ──► Weak<dyn Subscribe>
//! &Weak<EmailSubscriber>     ─┤
//! &Weak<dyn Subscribe>       ─┘
//! ```
//!
//! A `Weak` keeps the allocation (not the value) alive, so an entry's address
//! cannot be reused by another subscriber while the entry exists.

use std::sync::{Arc, Weak};

use crate::subscribers::Subscribe;

/// Conversion of a caller-held handle into the registry's non-owning form.
///
/// `T` is the subscriber trait object the registry stores
/// (`dyn Subscribe`, or `dyn AsyncSubscribe` for the queued fan-out).
pub trait Downgrade<T: ?Sized> {
    /// Returns a non-owning reference to the same subscriber.
    fn downgrade(&self) -> Weak<T>;
}

impl<S: Subscribe> Downgrade<dyn Subscribe> for Arc<S> {
    fn downgrade(&self) -> Weak<dyn Subscribe> {
        let weak: Weak<S> = Arc::downgrade(self);
        weak
    }
}

impl Downgrade<dyn Subscribe> for Arc<dyn Subscribe> {
    fn downgrade(&self) -> Weak<dyn Subscribe> {
        Arc::downgrade(self)
    }
}

impl<S: Subscribe> Downgrade<dyn Subscribe> for Weak<S> {
    fn downgrade(&self) -> Weak<dyn Subscribe> {
        let weak: Weak<S> = self.clone();
        weak
    }
}

impl Downgrade<dyn Subscribe> for Weak<dyn Subscribe> {
    fn downgrade(&self) -> Weak<dyn Subscribe> {
        self.clone()
    }
}

/// Thin address of the allocation behind `weak`, used as subscriber identity.
#[inline]
pub(crate) fn identity<T: ?Sized>(weak: &Weak<T>) -> *const () {
    weak.as_ptr() as *const ()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Subscribe for Probe {
        fn receive(&self, _message: &str) {}
    }

    fn weak(handle: &impl Downgrade<dyn Subscribe>) -> Weak<dyn Subscribe> {
        handle.downgrade()
    }

    #[test]
    fn all_handle_forms_share_identity() {
        let concrete = Arc::new(Probe);
        let erased: Arc<dyn Subscribe> = concrete.clone();

        let a = identity(&weak(&concrete));
        let b = identity(&weak(&erased));
        let c = identity(&weak(&Arc::downgrade(&concrete)));
        let d = identity(&weak(&Arc::downgrade(&erased)));

        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, d);
    }

    #[test]
    fn distinct_subscribers_differ() {
        let first = Arc::new(Probe);
        let second = Arc::new(Probe);
        assert_ne!(identity(&weak(&first)), identity(&weak(&second)));
    }
}
