//! Observers: the sinks at the end of every subscription.
//!
//! An observer is anything that can receive values through `next`. There is
//! no error or completion channel; streams run until they are unsubscribed.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an observer.
///
/// Every observer gets an ID when it is created, and clones keep it. Shared
/// nodes use the ID to detect the same observer being attached twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Generate a new unique observer ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ObserverId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer#{}", self.0)
    }
}

/// A sink for values of type `T`.
///
/// Cloning an observer yields a handle to the same sink with the same ID.
pub struct Observer<T> {
    id: ObserverId,
    next: Rc<dyn Fn(T)>,
}

impl<T> Observer<T> {
    /// Create a new observer that calls `next` for every value.
    pub fn new<F>(next: F) -> Self
    where
        F: Fn(T) + 'static,
    {
        Self {
            id: ObserverId::new(),
            next: Rc::new(next),
        }
    }

    /// Create an observer that reuses an existing identity.
    ///
    /// Used when a subscription wraps the caller's observer, so that the
    /// wrapper is still recognized as the caller's observer.
    pub(crate) fn with_id<F>(id: ObserverId, next: F) -> Self
    where
        F: Fn(T) + 'static,
    {
        Self {
            id,
            next: Rc::new(next),
        }
    }

    /// Get the observer's unique ID.
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Deliver a value to the observer.
    pub fn next(&self, value: T) {
        (self.next)(value);
    }
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            next: Rc::clone(&self.next),
        }
    }
}

impl<T> fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer").field("id", &self.id).finish()
    }
}

impl<T, F> From<F> for Observer<T>
where
    F: Fn(T) + 'static,
{
    fn from(next: F) -> Self {
        Self::new(next)
    }
}
