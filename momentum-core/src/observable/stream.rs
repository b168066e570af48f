//! The `Observable` type.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::error::Result;

use super::{Observer, Subscription};

type Connect<T> = dyn Fn(Observer<T>) -> Result<Subscription>;

/// A cold, push-based stream of `T`.
///
/// An observable is a recipe: `connect` is invoked once per subscriber and
/// returns the subscription that disconnects that subscriber. Nothing runs
/// until something subscribes.
///
/// # Example
///
/// ```rust
/// use momentum_core::{Observable, Subscription};
///
/// let numbers = Observable::new(|observer| {
///     observer.next(1);
///     observer.next(2);
///     Ok(Subscription::empty())
/// });
///
/// let doubled = numbers.map(|n: i32| n * 2);
/// let subscription = doubled.subscribe_fn(|n| println!("{n}")).unwrap();
/// subscription.unsubscribe();
/// ```
pub struct Observable<T> {
    connect: Rc<Connect<T>>,
}

impl<T: 'static> Observable<T> {
    /// Create an observable from its connect function.
    ///
    /// `connect` receives the subscriber and returns the subscription that
    /// tears the connection down. It runs again for every subscriber.
    pub fn new<F>(connect: F) -> Self
    where
        F: Fn(Observer<T>) -> Result<Subscription> + 'static,
    {
        Self {
            connect: Rc::new(connect),
        }
    }

    /// An observable that never emits.
    pub fn never() -> Self {
        Self::new(|_| Ok(Subscription::empty()))
    }

    /// Attach an observer.
    ///
    /// The observer stops receiving values as soon as the returned
    /// subscription is unsubscribed, even if that happens while a value is
    /// being delivered.
    pub fn subscribe(&self, observer: Observer<T>) -> Result<Subscription> {
        let open = Rc::new(Cell::new(true));
        let gate = Rc::clone(&open);
        let id = observer.id();

        let gated = Observer::with_id(id, move |value| {
            if gate.get() {
                observer.next(value);
            }
        });

        let inner = (self.connect)(gated)?;

        Ok(Subscription::new(move || {
            open.set(false);
            inner.unsubscribe();
        }))
    }

    /// Attach a closure as an observer.
    pub fn subscribe_fn<F>(&self, next: F) -> Result<Subscription>
    where
        F: Fn(T) + 'static,
    {
        self.subscribe(Observer::new(next))
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// An observable that synchronously emits `value` to each subscriber.
    pub fn of(value: T) -> Self {
        Self::new(move |observer| {
            observer.next(value.clone());
            Ok(Subscription::empty())
        })
    }

    /// An observable that synchronously emits every item of `values`.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();

        Self::new(move |observer| {
            for value in &values {
                observer.next(value.clone());
            }
            Ok(Subscription::empty())
        })
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            connect: Rc::clone(&self.connect),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("connect", &Rc::as_ptr(&self.connect))
            .finish()
    }
}
