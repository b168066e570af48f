//! Operators whose behavior depends on other streams.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::combine_latest::combine_latest2;
use crate::observable::{MaybeReactive, Observable, Observer};

/// Configuration for `reactive_map_with`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactiveMapOptions {
    /// Recompute only when upstream emits, not when the argument changes.
    pub only_emit_with_upstream: bool,
}

impl<T: Clone + 'static> Observable<T> {
    /// Create a stream that runs `operation` with the latest upstream value
    /// and the latest value of `argument`.
    ///
    /// Nothing happens until both have a value; a constant argument always
    /// has one. After that, `operation` runs whenever either changes. To
    /// depend on several streams, join them first with `combine_latest`.
    pub fn reactive_next_operator<A, U, F>(
        &self,
        argument: impl Into<MaybeReactive<A>>,
        operation: F,
    ) -> Observable<U>
    where
        A: Clone + 'static,
        U: 'static,
        F: Fn(T, A, &Observer<U>) + 'static,
    {
        combine_latest2(self.clone(), argument)
            .next_operator(move |(value, argument), observer| operation(value, argument, observer))
    }

    /// Emit `transform(value, argument)` whenever upstream or `argument`
    /// changes.
    pub fn reactive_map<A, U, F>(&self, argument: impl Into<MaybeReactive<A>>, transform: F) -> Observable<U>
    where
        A: Clone + 'static,
        U: 'static,
        F: Fn(T, A) -> U + 'static,
    {
        self.reactive_map_with(argument, ReactiveMapOptions::default(), transform)
    }

    /// `reactive_map`, with control over which changes trigger a recompute.
    pub fn reactive_map_with<A, U, F>(
        &self,
        argument: impl Into<MaybeReactive<A>>,
        options: ReactiveMapOptions,
        transform: F,
    ) -> Observable<U>
    where
        A: Clone + 'static,
        U: 'static,
        F: Fn(T, A) -> U + 'static,
    {
        let source = self.clone();
        let argument = argument.into();
        let transform = Rc::new(transform);

        Observable::new(move |observer: Observer<U>| {
            let upstream_changed = Rc::new(Cell::new(false));
            let mark = Rc::clone(&upstream_changed);
            let transform = Rc::clone(&transform);

            source
                .tap(move |_| mark.set(true))
                .reactive_next_operator(argument.clone(), move |value, argument, emit| {
                    if upstream_changed.replace(false) || !options.only_emit_with_upstream {
                        emit.next(transform(value, argument));
                    }
                })
                .subscribe(observer)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::{MemorylessSubject, ReactiveProperty};
    use std::cell::RefCell;

    fn collect<T: 'static>(stream: &Observable<T>) -> Rc<RefCell<Vec<T>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        stream
            .subscribe_fn(move |value| log_clone.borrow_mut().push(value))
            .unwrap();
        log
    }

    #[test]
    fn waits_for_upstream_and_argument() {
        let upstream = MemorylessSubject::new();
        let offset = MemorylessSubject::new();

        let sums = upstream
            .observable()
            .reactive_map(offset.observable(), |value: i32, offset: i32| value + offset);
        let log = collect(&sums);

        upstream.next(1);
        assert!(log.borrow().is_empty());

        offset.next(10);
        upstream.next(2);
        offset.next(20);

        assert_eq!(*log.borrow(), vec![11, 12, 22]);
    }

    #[test]
    fn constant_argument_is_ready_immediately() {
        let upstream = MemorylessSubject::new();
        let log = collect(&upstream.observable().reactive_map(3, |value: i32, factor: i32| value * factor));

        upstream.next(2);
        assert_eq!(*log.borrow(), vec![6]);
    }

    #[test]
    fn argument_changes_are_ignored_when_only_emitting_with_upstream() {
        let upstream = MemorylessSubject::new();
        let argument = ReactiveProperty::with_value(1);

        let options = ReactiveMapOptions {
            only_emit_with_upstream: true,
        };
        let log = collect(&upstream.observable().reactive_map_with(
            argument.observable(),
            options,
            |value: i32, argument: i32| value * argument,
        ));

        upstream.next(5);
        argument.write(2);
        argument.write(3);
        upstream.next(5);

        assert_eq!(*log.borrow(), vec![5, 15]);
    }

    #[test]
    fn operation_may_skip_emission() {
        let upstream = MemorylessSubject::new();
        let evens_above = upstream.observable().reactive_next_operator(
            0,
            |value: i32, floor: i32, observer: &Observer<i32>| {
                if value > floor && value % 2 == 0 {
                    observer.next(value);
                }
            },
        );
        let log = collect(&evens_above);

        for value in [-2, 1, 2, 3, 4] {
            upstream.next(value);
        }

        assert_eq!(*log.borrow(), vec![2, 4]);
    }
}
