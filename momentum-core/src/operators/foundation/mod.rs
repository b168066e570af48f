//! Operator Foundation
//!
//! The handful of primitives every other operator is written in terms of:
//!
//! - `next_operator` / `stateful_operator`: per-value transforms
//! - `reactive_next_operator` / `reactive_map`: transforms parameterized by
//!   other streams
//! - `multicast` / `remember`: shared upstream subscriptions
//! - `debounce`: one emission per pulse
//! - `dedupe`: suppression of repeats
//! - `read`: synchronous access to the current value

mod debounce;
mod dedupe;
mod multicast;
mod next_operator;
mod reactive_next_operator;
mod read;

pub use reactive_next_operator::ReactiveMapOptions;
