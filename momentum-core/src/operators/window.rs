//! Operators that look at values over time.

use std::rc::Rc;

use crate::observable::Observable;
use crate::scheduler::Clock;
use crate::types::Timestamped;

impl<T: Clone + 'static> Observable<T> {
    /// Emit the most recent `size` values, oldest first.
    ///
    /// Each emission is a new vector; until `size` values have arrived it
    /// holds fewer.
    pub fn sliding_window(&self, size: usize) -> Observable<Vec<T>> {
        self.stateful_operator(
            move || Vec::with_capacity(size + 1),
            move |window: &mut Vec<T>, value| {
                window.push(value);
                if window.len() > size {
                    window.remove(0);
                }
                Some(window.clone())
            },
        )
    }
}

impl<T: 'static> Observable<T> {
    /// Pair each value with the time `clock` reports when it arrives.
    pub fn timestamp(&self, clock: Rc<dyn Clock>) -> Observable<Timestamped<T>> {
        self.map(move |value| Timestamped {
            value,
            timestamp: clock.now(),
        })
    }
}
