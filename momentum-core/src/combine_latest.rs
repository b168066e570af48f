//! Reactive Join
//!
//! `combine_latest` subscribes to a collection of streams and emits the
//! latest value of each, in the same shape as the input, whenever any of
//! them changes.
//!
//! # Emission Rules
//!
//! Constants are satisfied from the start. Reactive entries are satisfied
//! once they have emitted.
//!
//! - With `wait_for_all_values` (the default), nothing is emitted until every
//!   entry is satisfied; after that, every update emits.
//! - Without it, updates that arrive while the entries are still being
//!   subscribed are collected silently, one value is emitted once
//!   subscription finishes, and every later update emits.
//!
//! Every emission is a freshly built collection, so downstream observers may
//! keep and compare them.

use std::cell::{Cell, RefCell};
use std::hash::Hash;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::observable::{MaybeReactive, Observable, Observer, Subscription};

/// Configuration for `combine_latest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineLatestOptions {
    /// Hold back emissions until every entry has a value.
    pub wait_for_all_values: bool,
}

impl Default for CombineLatestOptions {
    fn default() -> Self {
        Self {
            wait_for_all_values: true,
        }
    }
}

impl CombineLatestOptions {
    /// Options that emit as soon as subscription finishes, even with gaps.
    pub fn eager() -> Self {
        Self {
            wait_for_all_values: false,
        }
    }
}

struct JoinState<V> {
    latest: RefCell<Vec<Option<V>>>,
    initializing: Cell<bool>,
}

/// Shared engine behind every `combine_latest` variant.
///
/// `build` turns the current slots into an output; returning `None` skips
/// the emission.
fn join<V, S, B>(sources: Vec<MaybeReactive<V>>, options: CombineLatestOptions, build: B) -> Observable<S>
where
    V: Clone + 'static,
    S: 'static,
    B: Fn(&[Option<V>]) -> Option<S> + 'static,
{
    let sources = Rc::new(sources);
    let build = Rc::new(build);
    let wait = options.wait_for_all_values;

    Observable::new(move |observer: Observer<S>| {
        let state = Rc::new(JoinState {
            latest: RefCell::new(
                sources
                    .iter()
                    .map(|source| match source {
                        MaybeReactive::Constant(value) => Some(value.clone()),
                        MaybeReactive::Reactive(_) => None,
                    })
                    .collect(),
            ),
            initializing: Cell::new(true),
        });

        let emit = {
            let state = Rc::clone(&state);
            let build = Rc::clone(&build);
            Rc::new(move || {
                let output = {
                    let latest = state.latest.borrow();
                    if wait && latest.iter().any(Option::is_none) {
                        return;
                    }
                    build(&latest)
                };

                if let Some(output) = output {
                    observer.next(output);
                }
            })
        };

        let mut subscriptions = Vec::new();
        for (index, source) in sources.iter().enumerate() {
            let MaybeReactive::Reactive(stream) = source else {
                continue;
            };

            let state = Rc::clone(&state);
            let emit = Rc::clone(&emit);
            let subscribed = stream.subscribe(Observer::new(move |value| {
                state.latest.borrow_mut()[index] = Some(value);
                if wait || !state.initializing.get() {
                    emit();
                }
            }));

            match subscribed {
                Ok(subscription) => subscriptions.push(subscription),
                Err(error) => {
                    for subscription in &subscriptions {
                        subscription.unsubscribe();
                    }
                    return Err(error);
                }
            }
        }

        state.initializing.set(false);

        // A waiting join with reactive entries has already emitted by the time
        // the last one was satisfied.
        if !wait || subscriptions.is_empty() {
            emit();
        }

        trace!(entries = sources.len(), "combine_latest connected");

        Ok(Subscription::new(move || {
            for subscription in subscriptions {
                subscription.unsubscribe();
            }
        }))
    })
}

/// Join a named collection of streams into a stream of maps.
///
/// Keys keep their insertion order. When not waiting for all values, a map
/// only contains the keys that have a value.
///
/// # Example
///
/// ```rust
/// use indexmap::IndexMap;
/// use momentum_core::{combine_latest, CombineLatestOptions, MaybeReactive, ReactiveProperty};
///
/// let width = ReactiveProperty::with_value(100.0);
///
/// let mut entries: IndexMap<&str, MaybeReactive<f64>> = IndexMap::new();
/// entries.insert("width", width.observable().into());
/// entries.insert("height", 50.0.into());
///
/// let size = combine_latest(entries, CombineLatestOptions::default());
/// size.subscribe_fn(|size| println!("{size:?}")).unwrap();
/// width.write(120.0);
/// ```
pub fn combine_latest<K, V>(
    streams: IndexMap<K, MaybeReactive<V>>,
    options: CombineLatestOptions,
) -> Observable<IndexMap<K, V>>
where
    K: Clone + Hash + Eq + 'static,
    V: Clone + 'static,
{
    let (keys, sources): (Vec<K>, Vec<MaybeReactive<V>>) = streams.into_iter().unzip();

    join(sources, options, move |latest| {
        Some(
            keys.iter()
                .zip(latest)
                .filter_map(|(key, value)| value.clone().map(|value| (key.clone(), value)))
                .collect(),
        )
    })
}

/// Join an ordered collection of streams into a stream of vectors.
///
/// Always waits until every entry has a value; see `combine_latest_partial`
/// for a version that emits with gaps.
pub fn combine_latest_vec<V>(streams: Vec<MaybeReactive<V>>) -> Observable<Vec<V>>
where
    V: Clone + 'static,
{
    join(streams, CombineLatestOptions::default(), |latest| {
        latest.iter().cloned().collect::<Option<Vec<V>>>()
    })
}

/// Join an ordered collection of streams, leaving `None` in entries that
/// have not emitted yet.
pub fn combine_latest_partial<V>(
    streams: Vec<MaybeReactive<V>>,
    options: CombineLatestOptions,
) -> Observable<Vec<Option<V>>>
where
    V: Clone + 'static,
{
    join(streams, options, |latest| Some(latest.to_vec()))
}

#[derive(Clone)]
enum Slot2<A, B> {
    First(A),
    Second(B),
}

#[derive(Clone)]
enum Slot3<A, B, C> {
    First(A),
    Second(B),
    Third(C),
}

fn lift<V, S>(source: MaybeReactive<V>, wrap: fn(V) -> S) -> MaybeReactive<S>
where
    V: Clone + 'static,
    S: 'static,
{
    match source {
        MaybeReactive::Constant(value) => MaybeReactive::Constant(wrap(value)),
        MaybeReactive::Reactive(stream) => MaybeReactive::Reactive(stream.map(wrap)),
    }
}

/// Join two streams of different types into a stream of pairs.
///
/// Emits once both have a value, then on every update of either.
pub fn combine_latest2<A, B>(
    first: impl Into<MaybeReactive<A>>,
    second: impl Into<MaybeReactive<B>>,
) -> Observable<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    let sources = vec![
        lift(first.into(), Slot2::First),
        lift(second.into(), Slot2::Second),
    ];

    join(sources, CombineLatestOptions::default(), |latest| match latest {
        [Some(Slot2::First(a)), Some(Slot2::Second(b))] => Some((a.clone(), b.clone())),
        _ => None,
    })
}

/// Join three streams of different types into a stream of triples.
pub fn combine_latest3<A, B, C>(
    first: impl Into<MaybeReactive<A>>,
    second: impl Into<MaybeReactive<B>>,
    third: impl Into<MaybeReactive<C>>,
) -> Observable<(A, B, C)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    let sources = vec![
        lift(first.into(), Slot3::First),
        lift(second.into(), Slot3::Second),
        lift(third.into(), Slot3::Third),
    ];

    join(sources, CombineLatestOptions::default(), |latest| match latest {
        [Some(Slot3::First(a)), Some(Slot3::Second(b)), Some(Slot3::Third(c))] => {
            Some((a.clone(), b.clone(), c.clone()))
        }
        _ => None,
    })
}
