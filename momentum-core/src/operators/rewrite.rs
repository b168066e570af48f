//! Replacing values: lookups, constants, and linear remapping.

use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::combine_latest::{combine_latest, combine_latest2, combine_latest_vec, CombineLatestOptions};
use crate::observable::{MaybeReactive, Observable};
use crate::operators::ReactiveMapOptions;

/// Fixed ranges for `rewrite_range`, loadable from configuration.
///
/// Missing fields default to mapping `0..1` onto `0..1` without bounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteRangeOptions {
    pub from_start: f64,
    pub from_end: f64,
    pub to_start: f64,
    pub to_end: f64,
    /// Keep results inside the output range.
    pub bound: bool,
}

impl Default for RewriteRangeOptions {
    fn default() -> Self {
        Self {
            from_start: 0.0,
            from_end: 1.0,
            to_start: 0.0,
            to_end: 1.0,
            bound: false,
        }
    }
}

/// Ranges for `rewrite_range`, any of which may change over time.
#[derive(Clone)]
pub struct RewriteRangeArgs {
    pub from_start: MaybeReactive<f64>,
    pub from_end: MaybeReactive<f64>,
    pub to_start: MaybeReactive<f64>,
    pub to_end: MaybeReactive<f64>,
    pub bound: MaybeReactive<bool>,
}

impl Default for RewriteRangeArgs {
    fn default() -> Self {
        RewriteRangeOptions::default().into()
    }
}

impl From<RewriteRangeOptions> for RewriteRangeArgs {
    fn from(options: RewriteRangeOptions) -> Self {
        Self {
            from_start: options.from_start.into(),
            from_end: options.from_end.into(),
            to_start: options.to_start.into(),
            to_end: options.to_end.into(),
            bound: options.bound.into(),
        }
    }
}

/// Map `value` from one range onto another.
fn interpolate(value: f64, from_start: f64, from_end: f64, to_start: f64, to_end: f64) -> f64 {
    let progress = (value - from_end) / (from_start - from_end);
    to_end + progress * (to_start - to_end)
}

impl<T: Clone + 'static> Observable<T> {
    /// Replace each value with its entry in `mapping`.
    ///
    /// Values without an entry are skipped. Reactive entries are followed:
    /// when the entry for the latest value changes, the new entry is emitted.
    pub fn rewrite<U>(&self, mapping: IndexMap<T, MaybeReactive<U>>) -> Observable<U>
    where
        T: Hash + Eq,
        U: Clone + 'static,
    {
        let entries = combine_latest(mapping, CombineLatestOptions::eager());

        self.reactive_next_operator(entries, |key, entries, observer| {
            if let Some(value) = entries.get(&key) {
                observer.next(value.clone());
            }
        })
    }

    /// Emit `value` every time upstream emits.
    ///
    /// A reactive `value` is sampled; its changes alone do not emit.
    pub fn rewrite_to<U>(&self, value: impl Into<MaybeReactive<U>>) -> Observable<U>
    where
        U: Clone + 'static,
    {
        let options = ReactiveMapOptions {
            only_emit_with_upstream: true,
        };
        self.reactive_map_with(value, options, |_, value| value)
    }
}

impl Observable<f64> {
    /// Linearly map each value from one range onto another.
    ///
    /// Every end of both ranges may be reactive. With `bound`, results are
    /// kept inside the output range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use momentum_core::{Observable, RewriteRangeOptions};
    ///
    /// let percent = Observable::of(0.25_f64).rewrite_range(RewriteRangeOptions {
    ///     to_end: 100.0,
    ///     ..Default::default()
    /// });
    ///
    /// assert_eq!(percent.read().unwrap(), 25.0);
    /// ```
    pub fn rewrite_range(&self, args: impl Into<RewriteRangeArgs>) -> Observable<f64> {
        let args = args.into();
        let ranges = combine_latest2(
            combine_latest_vec(vec![args.from_start, args.from_end, args.to_start, args.to_end]),
            args.bound,
        );

        self.reactive_next_operator(ranges, |value, (ends, bound), observer| {
            let &[from_start, from_end, to_start, to_end] = ends.as_slice() else {
                return;
            };

            let result = interpolate(value, from_start, from_end, to_start, to_end);

            if bound {
                observer.next(result.clamp(to_start.min(to_end), to_start.max(to_end)));
            } else {
                observer.next(result);
            }
        })
    }

    /// Linearly map each value between fixed ranges, without bounding.
    pub fn map_range(&self, from_start: f64, from_end: f64, to_start: f64, to_end: f64) -> Observable<f64> {
        self.map(move |value| interpolate(value, from_start, from_end, to_start, to_end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::{MemorylessSubject, ReactiveProperty};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn collect<T: 'static>(stream: &Observable<T>) -> Rc<RefCell<Vec<T>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        stream
            .subscribe_fn(move |value| log_clone.borrow_mut().push(value))
            .unwrap();
        log
    }

    #[test]
    fn rewrite_looks_up_constants() {
        let source: MemorylessSubject<&str> = MemorylessSubject::new();
        let mut mapping = IndexMap::new();
        mapping.insert("a", MaybeReactive::Constant(1));
        mapping.insert("b", MaybeReactive::Constant(2));

        let log = collect(&source.observable().rewrite(mapping));
        source.next("b");
        source.next("missing");
        source.next("a");

        assert_eq!(*log.borrow(), vec![2, 1]);
    }

    #[test]
    fn rewrite_follows_reactive_entries() {
        let source: MemorylessSubject<&str> = MemorylessSubject::new();
        let inner: MemorylessSubject<String> = MemorylessSubject::new();

        let mut mapping = IndexMap::new();
        mapping.insert("a", MaybeReactive::from(inner.observable()));
        mapping.insert("b", MaybeReactive::from("one"));

        let log = collect(&source.observable().rewrite(mapping));

        inner.next(String::from("q"));
        source.next("a");
        inner.next(String::from("z"));

        assert_eq!(*log.borrow(), vec![String::from("q"), String::from("z")]);
    }

    #[test]
    fn rewrite_to_emits_only_with_upstream() {
        let source: MemorylessSubject<i32> = MemorylessSubject::new();
        let replacement = ReactiveProperty::with_value(String::from("x"));

        let log = collect(&source.observable().rewrite_to(replacement.observable()));
        source.next(1);
        replacement.write(String::from("y"));
        source.next(2);

        assert_eq!(*log.borrow(), vec![String::from("x"), String::from("y")]);
    }

    #[test]
    fn rewrite_range_interpolates_and_bounds() {
        let source: MemorylessSubject<f64> = MemorylessSubject::new();
        let bound = ReactiveProperty::with_value(false);

        let args = RewriteRangeArgs {
            from_start: 10.0.into(),
            from_end: 20.0.into(),
            to_start: 100.0.into(),
            to_end: 200.0.into(),
            bound: bound.observable().into(),
        };
        let log = collect(&source.observable().rewrite_range(args));

        source.next(15.0);
        source.next(30.0);
        bound.write(true);

        assert_eq!(*log.borrow(), vec![150.0, 300.0, 200.0]);
    }

    #[test]
    fn range_options_deserialize_with_defaults() {
        let options: RewriteRangeOptions = serde_json::from_str(r#"{ "to_end": 360.0 }"#).unwrap();

        assert_eq!(options.from_end, 1.0);
        assert_eq!(options.to_end, 360.0);
        assert!(!options.bound);
    }

    #[test]
    fn map_range_handles_inverted_ranges() {
        let log = collect(&Observable::from_values(vec![0.0_f64, 0.5, 1.0]).map_range(0.0, 1.0, 1.0, 0.0));
        assert_eq!(*log.borrow(), vec![1.0, 0.5, 0.0]);
    }
}
