//! Subscriptions: the handle returned by `subscribe`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Teardown = Box<dyn FnOnce()>;

/// Handle to a live subscription.
///
/// `unsubscribe` runs the teardown at most once; later calls are no-ops, so it
/// is safe to call from inside a callback that the subscription is currently
/// delivering to. Clones share the same teardown.
///
/// Dropping the handle does not unsubscribe. Streams are indefinite, and the
/// handle is only the means of cancelling one.
#[derive(Clone)]
pub struct Subscription {
    teardown: Rc<RefCell<Option<Teardown>>>,
}

impl Subscription {
    /// Create a subscription that runs `teardown` when unsubscribed.
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            teardown: Rc::new(RefCell::new(Some(Box::new(teardown)))),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn empty() -> Self {
        Self {
            teardown: Rc::new(RefCell::new(None)),
        }
    }

    /// Stop receiving values.
    pub fn unsubscribe(&self) {
        // Release the borrow before running the teardown; it may re-enter.
        let teardown = self.teardown.borrow_mut().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    /// Whether `unsubscribe` has already run.
    pub fn is_closed(&self) -> bool {
        self.teardown.borrow().is_none()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
