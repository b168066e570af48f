//! Operators
//!
//! Operators are inherent methods on `Observable<T>`. Each returns a new cold
//! observable; nothing runs until it is subscribed.
//!
//! # Layers
//!
//! - `foundation`: the primitives (`next_operator`, `reactive_next_operator`,
//!   `multicast`, `remember`, `debounce`, `dedupe`, `read`).
//! - Everything else is written in terms of the foundation: arithmetic,
//!   thresholds, rewriting, windows, and the like.
//!
//! Arguments typed `impl Into<MaybeReactive<T>>` accept either a plain value
//! or an `Observable<T>`; reactive arguments cause the result to recompute
//! whenever they change.

mod arithmetic;
mod foundation;
mod geometry;
mod logic;
mod merge;
mod pluck;
mod rewrite;
mod text;
mod threshold;
mod window;

pub use arithmetic::MathOperation;
pub use foundation::ReactiveMapOptions;
pub use pluck::Plucker;
pub use rewrite::{RewriteRangeArgs, RewriteRangeOptions};
pub use threshold::DEFAULT_SLIDING_THRESHOLD;
