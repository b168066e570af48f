//! Reactive properties: replaying subjects with synchronous read and write.

use std::fmt;

use crate::error::{Result, StreamError};
use crate::observable::{Observable, Observer, Subscription};

use super::replay::{PropertyStore, ReplaySubject};

/// Store backed by a getter and setter pair.
struct AccessorStore<T> {
    load: Box<dyn Fn() -> Option<T>>,
    save: Box<dyn Fn(T)>,
}

impl<T> PropertyStore<T> for AccessorStore<T> {
    fn load(&self) -> Option<T> {
        (self.load)()
    }

    fn save(&self, value: T) {
        (self.save)(value)
    }
}

/// A value that can be read, written, and observed.
///
/// Writes are delivered synchronously to observers, and new observers receive
/// the latest written value. `read` never blocks; it returns the latest value
/// or `StreamError::NoValue` if nothing has been written yet.
///
/// # Example
///
/// ```rust
/// use momentum_core::ReactiveProperty;
///
/// let opacity = ReactiveProperty::new();
/// assert!(opacity.read().is_err());
///
/// opacity.write(0.5);
/// assert_eq!(opacity.read().unwrap(), 0.5);
/// ```
pub struct ReactiveProperty<T> {
    subject: ReplaySubject<T>,
}

impl<T: Clone + 'static> ReactiveProperty<T> {
    /// Create a property with no value.
    pub fn new() -> Self {
        Self {
            subject: ReplaySubject::new(),
        }
    }

    /// Create a property holding `initial`.
    pub fn with_value(initial: T) -> Self {
        let property = Self::new();
        property.write(initial);
        property
    }

    /// Create a property whose value lives in `store`.
    pub fn with_store<S>(store: S) -> Self
    where
        S: PropertyStore<T> + 'static,
    {
        Self {
            subject: ReplaySubject::with_store(store),
        }
    }

    /// Create a property that reads and writes through the given accessors.
    ///
    /// This is the hook for host-owned values: `load` reports what the host
    /// currently holds and `save` pushes a new value into it.
    pub fn with_accessors<L, S>(load: L, save: S) -> Self
    where
        L: Fn() -> Option<T> + 'static,
        S: Fn(T) + 'static,
    {
        Self::with_store(AccessorStore {
            load: Box::new(load),
            save: Box::new(save),
        })
    }

    /// The current value.
    pub fn read(&self) -> Result<T> {
        self.subject.state().load().ok_or(StreamError::NoValue)
    }

    /// Set the value and notify observers.
    pub fn write(&self, value: T) {
        self.subject.next(value);
    }

    /// The property viewed as an observable, for use with operators.
    pub fn observable(&self) -> Observable<T> {
        self.subject.observable()
    }

    /// Attach an observer; it immediately receives the current value, if any.
    pub fn subscribe(&self, observer: Observer<T>) -> Result<Subscription> {
        self.subject.subscribe(observer)
    }

    /// Attach a closure as an observer.
    pub fn subscribe_fn<F>(&self, next: F) -> Result<Subscription>
    where
        F: Fn(T) + 'static,
    {
        self.subject.subscribe_fn(next)
    }

    /// The property viewed as an observer; received values are written.
    pub fn as_observer(&self) -> Observer<T> {
        self.subject.as_observer()
    }

    /// Get the number of attached observers.
    pub fn observer_count(&self) -> usize {
        self.subject.observer_count()
    }
}

impl<T: Clone + 'static> Default for ReactiveProperty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ReactiveProperty<T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
        }
    }
}

impl<T: Clone + 'static> From<&ReactiveProperty<T>> for Observable<T> {
    fn from(property: &ReactiveProperty<T>) -> Self {
        property.observable()
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for ReactiveProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveProperty")
            .field("value", &self.read().ok())
            .field("observer_count", &self.observer_count())
            .finish()
    }
}
