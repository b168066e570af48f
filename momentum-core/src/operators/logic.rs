//! Boolean-ish operators: inversion, membership, and gating.

use crate::combine_latest::combine_latest_vec;
use crate::observable::{MaybeReactive, Observable};
use crate::types::Invertible;

impl<T: Clone + 'static> Observable<T> {
    /// Flip each value: `true`/`false` for booleans, `1`/`0` for numbers.
    ///
    /// Values with no opposite are dropped.
    pub fn inverted(&self) -> Observable<T>
    where
        T: Invertible,
    {
        self.next_operator(|value: T, observer| {
            if let Some(inverse) = value.invert() {
                observer.next(inverse);
            }
        })
    }

    /// Emit whether each value equals any of `matches`.
    ///
    /// Reactive matches are followed, so the answer is recomputed when they
    /// change as well.
    pub fn is_any_of(&self, matches: Vec<MaybeReactive<T>>) -> Observable<bool>
    where
        T: PartialEq,
    {
        self.reactive_map(combine_latest_vec(matches), |value, matches| matches.contains(&value))
    }

    /// Drop values until one equals `expected`, then forward that value and
    /// everything after it.
    pub fn ignore_until(&self, expected: T) -> Observable<T>
    where
        T: PartialEq,
    {
        self.stateful_operator(
            || true,
            move |ignoring, value| {
                if *ignoring && value == expected {
                    *ignoring = false;
                }
                (!*ignoring).then_some(value)
            },
        )
    }
}
