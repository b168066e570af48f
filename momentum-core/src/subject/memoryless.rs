//! Memoryless subject: a hot stream without history.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::Result;
use crate::observable::{Observable, Observer, ObserverSet, Subscription};

/// A hot stream that forwards each value to its current observers.
///
/// Observers that subscribe after a value was sent do not receive it. Clones
/// share the same observers.
///
/// # Example
///
/// ```rust
/// use momentum_core::MemorylessSubject;
///
/// let subject = MemorylessSubject::new();
/// subject.next(1); // nobody is listening
///
/// let subscription = subject.subscribe_fn(|value: i32| println!("{value}")).unwrap();
/// subject.next(2); // prints 2
/// subscription.unsubscribe();
/// ```
pub struct MemorylessSubject<T> {
    observers: Rc<ObserverSet<T>>,
}

impl<T: Clone + 'static> MemorylessSubject<T> {
    /// Create a subject with no observers.
    pub fn new() -> Self {
        Self {
            observers: Rc::new(ObserverSet::new()),
        }
    }

    /// Send a value to every current observer.
    pub fn next(&self, value: T) {
        self.observers.dispatch(&value);
    }

    /// The subject viewed as an observable, for use with operators.
    pub fn observable(&self) -> Observable<T> {
        let observers = Rc::clone(&self.observers);

        Observable::new(move |observer: Observer<T>| {
            let id = observer.id();
            observers.insert(observer)?;

            let observers: Weak<ObserverSet<T>> = Rc::downgrade(&observers);
            Ok(Subscription::new(move || {
                if let Some(observers) = observers.upgrade() {
                    observers.remove(id);
                }
            }))
        })
    }

    /// Attach an observer.
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
        self.observers.len()
    }
}

impl<T: Clone + 'static> Default for MemorylessSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MemorylessSubject<T> {
    fn clone(&self) -> Self {
        Self {
            observers: Rc::clone(&self.observers),
        }
    }
}

impl<T: Clone + 'static> From<&MemorylessSubject<T>> for Observable<T> {
    fn from(subject: &MemorylessSubject<T>) -> Self {
        subject.observable()
    }
}

impl<T: Clone + 'static> fmt::Debug for MemorylessSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorylessSubject")
            .field("observer_count", &self.observer_count())
            .finish()
    }
}
