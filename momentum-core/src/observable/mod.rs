//! Observable Protocol
//!
//! The minimal push contract every other part of the crate builds on.
//!
//! # Concepts
//!
//! ## Observables
//!
//! An `Observable<T>` is an immutable recipe: a `connect` function that is run
//! once per subscriber. Observables are cold; no state exists until something
//! subscribes.
//!
//! ## Observers
//!
//! An `Observer<T>` is a sink with a single `next` method. There is no error or
//! completion signal. Streams are indefinite and end only when unsubscribed.
//!
//! ## Subscriptions
//!
//! `subscribe` returns a `Subscription`. Calling `unsubscribe` disconnects the
//! observer; after that it receives nothing further, even if the call happens
//! while a value is being dispatched to it.
//!
//! # Scheduling
//!
//! Delivery is synchronous. A producer's `next` call returns only after every
//! transitively subscribed observer has processed the value. The types here are
//! built on `Rc` and are not `Send`.

mod maybe_reactive;
mod observer;
mod observer_set;
mod stream;
mod subscription;

pub use maybe_reactive::MaybeReactive;
pub use observer::{Observer, ObserverId};
pub use stream::Observable;
pub use subscription::Subscription;

pub(crate) use observer_set::ObserverSet;
