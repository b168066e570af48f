//! Suppression of repeated values.

use crate::observable::Observable;

impl<T: Clone + 'static> Observable<T> {
    /// Drop values equal to the one emitted just before them.
    ///
    /// The first value is always emitted.
    pub fn dedupe(&self) -> Observable<T>
    where
        T: PartialEq,
    {
        self.dedupe_by(|previous, next| previous == next)
    }

    /// `dedupe` with a custom equality check.
    pub fn dedupe_by<F>(&self, are_equal: F) -> Observable<T>
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        self.stateful_operator(
            || None::<T>,
            move |last, value| {
                if let Some(previous) = last.as_ref() {
                    if are_equal(previous, &value) {
                        return None;
                    }
                }

                // Record before emitting so a re-entrant value compares
                // against this one.
                *last = Some(value.clone());
                Some(value)
            },
        )
    }
}
