#![forbid(unsafe_code)]

//! Once-only completion signal of an interaction end.
//!
//! [`EndSignal::pair`] returns a readable signal and the [`EndResolver`] that
//! settles it. The resolver is consumed by [`EndResolver::resolve`], so a
//! signal settles at most once; dropping an unsettled resolver settles the
//! signal to `false`, so it always settles.
//!
//! The signal can be polled synchronously ([`EndSignal::value`]) or awaited.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Debug, Default)]
struct Slot {
    value: Option<bool>,
    waker: Option<Waker>,
}

/// Completion of one `end` call: `true` when the end ran through its
/// completion frame, `false` otherwise.
#[derive(Debug, Clone)]
pub struct EndSignal {
    slot: Rc<RefCell<Slot>>,
}

/// Write half of an [`EndSignal`].
#[derive(Debug)]
pub struct EndResolver {
    slot: Rc<RefCell<Slot>>,
}

impl EndSignal {
    /// A fresh unsettled signal and its resolver.
    #[must_use]
    pub fn pair() -> (Self, EndResolver) {
        let slot = Rc::new(RefCell::new(Slot::default()));
        (
            Self {
                slot: Rc::clone(&slot),
            },
            EndResolver { slot },
        )
    }

    /// An already settled signal.
    #[must_use]
    pub fn resolved(value: bool) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value: Some(value),
                waker: None,
            })),
        }
    }

    /// The settled value, if any.
    #[must_use]
    pub fn value(&self) -> Option<bool> {
        self.slot.borrow().value
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.value().is_some()
    }
}

impl Future for EndSignal {
    type Output = bool;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        let mut slot = self.slot.borrow_mut();
        match slot.value {
            Some(value) => Poll::Ready(value),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl EndResolver {
    /// Settle the signal.
    pub fn resolve(self, value: bool) {
        self.settle(value);
    }

    fn settle(&self, value: bool) {
        let waker = {
            let mut slot = self.slot.borrow_mut();
            if slot.value.is_some() {
                return;
            }
            slot.value = Some(value);
            slot.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl Drop for EndResolver {
    fn drop(&mut self) {
        self.settle(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::Wake;

    struct CountingWaker(AtomicUsize);

    impl Wake for CountingWaker {
        fn wake(self: Arc<Self>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn resolves_once() {
        let (signal, resolver) = EndSignal::pair();
        assert_eq!(signal.value(), None);
        resolver.resolve(true);
        assert_eq!(signal.value(), Some(true));
    }

    #[test]
    fn dropped_resolver_settles_false() {
        let (signal, resolver) = EndSignal::pair();
        drop(resolver);
        assert_eq!(signal.value(), Some(false));
    }

    #[test]
    fn clones_share_the_value() {
        let (signal, resolver) = EndSignal::pair();
        let observer = signal.clone();
        resolver.resolve(false);
        assert_eq!(observer.value(), Some(false));
        assert!(EndSignal::resolved(true).is_resolved());
    }

    #[test]
    fn future_wakes_on_resolve() {
        let counter = Arc::new(CountingWaker(AtomicUsize::new(0)));
        let waker = Waker::from(Arc::clone(&counter));
        let mut cx = Context::from_waker(&waker);

        let (mut signal, resolver) = EndSignal::pair();
        assert_eq!(Pin::new(&mut signal).poll(&mut cx), Poll::Pending);
        resolver.resolve(true);
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert_eq!(Pin::new(&mut signal).poll(&mut cx), Poll::Ready(true));
    }
}
