//! Subjects
//!
//! Subjects are hot streams: they are both observables and observers, and
//! every subscriber shares the same source of values.
//!
//! - `MemorylessSubject` forwards values to whoever is subscribed right now.
//! - `ReplaySubject` also remembers the latest value and replays it to each
//!   new subscriber.
//! - `ReactiveProperty` is a replaying subject with `read`/`write`, the bridge
//!   to code that is not itself reactive.
//!
//! Subjects are cheap handles; cloning one shares its observers and value.

mod memoryless;
mod property;
mod replay;

pub use memoryless::MemorylessSubject;
pub use property::ReactiveProperty;
pub use replay::{MemoryStore, PropertyStore, ReplaySubject};
