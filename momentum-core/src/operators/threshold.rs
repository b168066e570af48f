//! Classifying values against limits.

use crate::observable::{MaybeReactive, Observable};
use crate::operators::ReactiveMapOptions;
use crate::types::ThresholdRegion;

/// Distance `sliding_threshold` uses when none is given.
pub const DEFAULT_SLIDING_THRESHOLD: f64 = 56.0;

fn classify(value: f64, lower: f64, upper: f64) -> ThresholdRegion {
    if value < lower {
        ThresholdRegion::Below
    } else if value > upper {
        ThresholdRegion::Above
    } else {
        ThresholdRegion::Within
    }
}

#[derive(Default)]
struct SlidingState {
    above: Option<f64>,
    below: Option<f64>,
    last_value: Option<f64>,
    last_region: Option<ThresholdRegion>,
}

impl SlidingState {
    fn step(&mut self, value: f64, distance: f64) -> Option<ThresholdRegion> {
        let mut next = None;

        if self.above.is_some_and(|above| value > above) && self.last_region != Some(ThresholdRegion::Above) {
            next = Some(ThresholdRegion::Above);
        }
        if self.below.is_some_and(|below| value < below) && self.last_region != Some(ThresholdRegion::Below) {
            next = Some(ThresholdRegion::Below);
        }
        if next.is_some() {
            self.last_region = next;
        }

        match self.last_value {
            Some(last) if value < last => self.above = Some(value + distance),
            Some(last) if value > last => self.below = Some(value - distance),
            Some(_) => {}
            None => {
                self.above = Some(value + distance);
                self.below = Some(value - distance);
            }
        }
        self.last_value = Some(value);

        next
    }
}

impl Observable<f64> {
    /// Report whether each value is below, at, or above `limit`.
    pub fn threshold(&self, limit: impl Into<MaybeReactive<f64>>) -> Observable<ThresholdRegion> {
        self.threshold_with(limit, ReactiveMapOptions::default())
    }

    /// `threshold` with explicit recomputation options.
    pub fn threshold_with(
        &self,
        limit: impl Into<MaybeReactive<f64>>,
        options: ReactiveMapOptions,
    ) -> Observable<ThresholdRegion> {
        self.reactive_map_with(limit, options, |value, limit| classify(value, limit, limit))
    }

    /// Report whether each value is below, inside, or above the range
    /// between `start` and `end`, in either order. The ends count as inside.
    pub fn threshold_range(&self, start: f64, end: f64) -> Observable<ThresholdRegion> {
        let lower = start.min(end);
        let upper = start.max(end);

        self.map(move |value| classify(value, lower, upper))
    }

    /// Emit `Above` once values have risen `distance` past their most
    /// recent low, and `Below` once they have fallen `distance` under their
    /// most recent high.
    ///
    /// The same region is never emitted twice in a row.
    pub fn sliding_threshold(&self, distance: f64) -> Observable<ThresholdRegion> {
        self.stateful_operator(SlidingState::default, move |state, value| state.step(value, distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::{MemorylessSubject, ReactiveProperty};
    use std::cell::RefCell;
    use std::rc::Rc;

    use ThresholdRegion::{Above, Below, Within};

    fn collect<T: 'static>(stream: &Observable<T>) -> Rc<RefCell<Vec<T>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        stream
            .subscribe_fn(move |value| log_clone.borrow_mut().push(value))
            .unwrap();
        log
    }

    #[test]
    fn threshold_follows_reactive_limit() {
        let value = ReactiveProperty::with_value(10.0_f64);
        let limit = ReactiveProperty::with_value(20.0_f64);
        let log = collect(&value.observable().threshold(limit.observable()));

        limit.write(10.0);
        limit.write(5.0);

        assert_eq!(*log.borrow(), vec![Below, Within, Above]);
    }

    #[test]
    fn threshold_range_accepts_reversed_ends() {
        let log = collect(&Observable::from_values(vec![0.0_f64, 10.0, 15.0, 20.0, 30.0]).threshold_range(20.0, 10.0));
        assert_eq!(*log.borrow(), vec![Below, Within, Within, Within, Above]);
    }

    #[test]
    fn sliding_threshold_alternates() {
        let source: MemorylessSubject<f64> = MemorylessSubject::new();
        let log = collect(&source.observable().sliding_threshold(DEFAULT_SLIDING_THRESHOLD));

        // Drift up slowly, then jump past the low-water mark.
        for value in [0.0, 30.0, 60.0] {
            source.next(value);
        }
        assert_eq!(*log.borrow(), vec![Above]);

        // Further rises do not repeat `Above`.
        source.next(200.0);
        // Falling 56 below the high emits `Below`.
        source.next(143.0);

        assert_eq!(*log.borrow(), vec![Above, Below]);
    }
}
