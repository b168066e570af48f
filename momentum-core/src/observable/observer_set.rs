//! Ordered observer registry shared by subjects and multicasting nodes.

use std::cell::RefCell;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::error::{Result, StreamError};

use super::{Observer, ObserverId};

/// The set of observers attached to a hot node, in subscription order.
///
/// Dispatch iterates over a snapshot, so observers may subscribe or
/// unsubscribe from inside a callback. An observer removed mid-dispatch is
/// skipped; one added mid-dispatch starts with the next value.
pub(crate) struct ObserverSet<T> {
    observers: RefCell<IndexMap<ObserverId, Observer<T>>>,
}

impl<T> ObserverSet<T> {
    pub(crate) fn new() -> Self {
        Self {
            observers: RefCell::new(IndexMap::new()),
        }
    }

    /// Attach an observer. Attaching the same observer twice is an error.
    pub(crate) fn insert(&self, observer: Observer<T>) -> Result<()> {
        let mut observers = self.observers.borrow_mut();
        let id = observer.id();

        if observers.contains_key(&id) {
            return Err(StreamError::AlreadySubscribed { observer: id });
        }

        observers.insert(id, observer);
        trace!(observer = %id, count = observers.len(), "observer attached");
        Ok(())
    }

    /// Detach an observer. Returns whether it was attached.
    pub(crate) fn remove(&self, id: ObserverId) -> bool {
        let removed = self.observers.borrow_mut().shift_remove(&id).is_some();
        if removed {
            trace!(observer = %id, "observer detached");
        }
        removed
    }

    pub(crate) fn contains(&self, id: ObserverId) -> bool {
        self.observers.borrow().contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }
}

impl<T: Clone> ObserverSet<T> {
    /// Deliver `value` to every attached observer.
    pub(crate) fn dispatch(&self, value: &T) {
        let snapshot: SmallVec<[Observer<T>; 4]> =
            self.observers.borrow().values().cloned().collect();

        for observer in snapshot {
            if self.contains(observer.id()) {
                observer.next(value.clone());
            }
        }
    }
}
