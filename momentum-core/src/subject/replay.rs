//! Replaying subject: a hot stream that remembers its latest value.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::Result;
use crate::observable::{Observable, Observer, ObserverSet, Subscription};

/// Storage for the latest value of a replaying stream.
///
/// The default store keeps the value in memory. A custom store lets the
/// value live elsewhere, e.g. in a host property that other code also reads.
pub trait PropertyStore<T> {
    /// The stored value, if there is one.
    fn load(&self) -> Option<T>;

    /// Replace the stored value.
    fn save(&self, value: T);
}

/// In-memory store used by default.
pub struct MemoryStore<T> {
    value: RefCell<Option<T>>,
}

impl<T> MemoryStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            value: RefCell::new(None),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> PropertyStore<T> for MemoryStore<T> {
    fn load(&self) -> Option<T> {
        self.value.borrow().clone()
    }

    fn save(&self, value: T) {
        *self.value.borrow_mut() = Some(value);
    }
}

pub(crate) struct ReplayState<T> {
    observers: ObserverSet<T>,
    store: Box<dyn PropertyStore<T>>,
    started: Cell<bool>,
}

impl<T: Clone + 'static> ReplayState<T> {
    pub(crate) fn load(&self) -> Option<T> {
        self.store.load()
    }
}

/// A hot stream that replays its most recent value to new observers.
///
/// Once `next` has been called, every observer that subscribes receives the
/// latest value synchronously, then all later values. Clones share state.
pub struct ReplaySubject<T> {
    state: Rc<ReplayState<T>>,
}

impl<T: Clone + 'static> ReplaySubject<T> {
    /// Create a subject that has not emitted.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Create a subject whose latest value lives in `store`.
    pub fn with_store<S>(store: S) -> Self
    where
        S: PropertyStore<T> + 'static,
    {
        Self {
            state: Rc::new(ReplayState {
                observers: ObserverSet::new(),
                store: Box::new(store),
                started: Cell::new(false),
            }),
        }
    }

    /// Record `value` as the latest and send it to every current observer.
    pub fn next(&self, value: T) {
        self.state.started.set(true);
        self.state.store.save(value.clone());
        self.state.observers.dispatch(&value);
    }

    /// Whether the subject has emitted at least once.
    pub fn has_started(&self) -> bool {
        self.state.started.get()
    }

    /// The subject viewed as an observable, for use with operators.
    pub fn observable(&self) -> Observable<T> {
        let state = Rc::clone(&self.state);

        Observable::new(move |observer: Observer<T>| {
            let id = observer.id();
            state.observers.insert(observer.clone())?;

            if state.started.get() {
                if let Some(latest) = state.store.load() {
                    observer.next(latest);
                }
            }

            let state: Weak<ReplayState<T>> = Rc::downgrade(&state);
            Ok(Subscription::new(move || {
                if let Some(state) = state.upgrade() {
                    state.observers.remove(id);
                }
            }))
        })
    }

    /// Attach an observer; it immediately receives the latest value, if any.
    pub fn subscribe(&self, observer: Observer<T>) -> Result<Subscription> {
        self.observable().subscribe(observer)
    }

    /// Attach a closure as an observer.
    pub fn subscribe_fn<F>(&self, next: F) -> Result<Subscription>
    where
        F: Fn(T) + 'static,
    {
        self.subscribe(Observer::new(next))
    }

    /// The subject viewed as an observer, so it can subscribe to a stream.
    pub fn as_observer(&self) -> Observer<T> {
        let subject = self.clone();
        Observer::new(move |value| subject.next(value))
    }

    /// Get the number of attached observers.
    pub fn observer_count(&self) -> usize {
        self.state.observers.len()
    }

    pub(crate) fn state(&self) -> &ReplayState<T> {
        &self.state
    }
}

impl<T: Clone + 'static> Default for ReplaySubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ReplaySubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Clone + 'static> From<&ReplaySubject<T>> for Observable<T> {
    fn from(subject: &ReplaySubject<T>) -> Self {
        subject.observable()
    }
}

impl<T: Clone + 'static> fmt::Debug for ReplaySubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplaySubject")
            .field("started", &self.has_started())
            .field("observer_count", &self.observer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<i32>>>, Observer<i32>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        (log, Observer::new(move |value| log_clone.borrow_mut().push(value)))
    }

    #[test]
    fn late_subscriber_receives_only_latest() {
        let subject = ReplaySubject::new();
        subject.next(1);
        subject.next(2);
        subject.next(3);

        let (log, observer) = recorder();
        subject.subscribe(observer).unwrap();

        assert_eq!(*log.borrow(), vec![3]);
    }

    #[test]
    fn nothing_replayed_before_first_value() {
        let subject = ReplaySubject::new();
        let (log, observer) = recorder();

        subject.subscribe(observer).unwrap();
        assert!(log.borrow().is_empty());
        assert!(!subject.has_started());

        subject.next(4);
        assert_eq!(*log.borrow(), vec![4]);
    }

    #[test]
    fn replay_then_live_values() {
        let subject = ReplaySubject::new();
        subject.next(1);

        let (log, observer) = recorder();
        subject.subscribe(observer).unwrap();
        subject.next(2);

        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn custom_store_receives_writes() {
        let backing = Rc::new(RefCell::new(None));

        struct Shared(Rc<RefCell<Option<i32>>>);

        impl PropertyStore<i32> for Shared {
            fn load(&self) -> Option<i32> {
                *self.0.borrow()
            }

            fn save(&self, value: i32) {
                *self.0.borrow_mut() = Some(value);
            }
        }

        let subject = ReplaySubject::with_store(Shared(backing.clone()));
        subject.next(9);
        assert_eq!(*backing.borrow(), Some(9));

        // An outside write is what late subscribers see.
        *backing.borrow_mut() = Some(10);
        let (log, observer) = recorder();
        subject.subscribe(observer).unwrap();
        assert_eq!(*log.borrow(), vec![10]);
    }
}
