//! The base every synchronous operator is built from.

use std::cell::RefCell;
use std::rc::Rc;

use crate::observable::{Observable, Observer};

impl<T: 'static> Observable<T> {
    /// Create a stream that runs `operation` on every upstream value.
    ///
    /// `operation` receives the value and the downstream observer, and may
    /// emit zero, one, or many values. Each subscriber gets its own upstream
    /// subscription; unsubscribing disconnects it.
    pub fn next_operator<U, F>(&self, operation: F) -> Observable<U>
    where
        U: 'static,
        F: Fn(T, &Observer<U>) + 'static,
    {
        let source = self.clone();
        let operation = Rc::new(operation);

        Observable::new(move |observer: Observer<U>| {
            let operation = Rc::clone(&operation);
            source.subscribe(Observer::new(move |value| operation(value, &observer)))
        })
    }

    /// Create a stream that threads per-subscription state through `step`.
    ///
    /// `init` runs once per subscriber. `step` runs with the state borrowed
    /// and its result is emitted after the borrow ends, so a downstream
    /// observer that feeds a value back upstream sees a consistent state.
    pub fn stateful_operator<S, U, I, F>(&self, init: I, step: F) -> Observable<U>
    where
        S: 'static,
        U: 'static,
        I: Fn() -> S + 'static,
        F: Fn(&mut S, T) -> Option<U> + 'static,
    {
        let source = self.clone();
        let step = Rc::new(step);

        Observable::new(move |observer: Observer<U>| {
            let state = RefCell::new(init());
            let step = Rc::clone(&step);

            source.subscribe(Observer::new(move |value| {
                let output = step(&mut state.borrow_mut(), value);
                if let Some(output) = output {
                    observer.next(output);
                }
            }))
        })
    }

    /// Transform every value.
    pub fn map<U, F>(&self, transform: F) -> Observable<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.next_operator(move |value, observer| observer.next(transform(value)))
    }

    /// Forward only values for which `predicate` holds.
    pub fn filter<F>(&self, predicate: F) -> Observable<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.next_operator(move |value, observer| {
            if predicate(&value) {
                observer.next(value);
            }
        })
    }

    /// Run `effect` on every value, then forward it unchanged.
    pub fn tap<F>(&self, effect: F) -> Observable<T>
    where
        F: Fn(&T) + 'static,
    {
        self.next_operator(move |value, observer| {
            effect(&value);
            observer.next(value);
        })
    }
}

impl<T> Observable<T>
where
    T: IntoIterator + 'static,
    T::Item: 'static,
{
    /// Emit each item of every upstream collection individually.
    pub fn flatten(&self) -> Observable<T::Item> {
        self.next_operator(|values: T, observer| {
            for value in values {
                observer.next(value);
            }
        })
    }
}
