//! Scheduling
//!
//! The crate has exactly two notions of time: "now" and "the next frame".
//! This module supplies both:
//!
//! - `Clock` answers "now" in milliseconds.
//! - `FrameScheduler` runs a callback before the next repaint.
//! - `frame_pulse` turns a scheduler into a shared stream of frame times.
//! - `MotionRuntime` bundles the three so graphs can be handed a single
//!   value instead of reaching for globals.

mod clock;
mod frame;
mod runtime;

pub use clock::{Clock, ManualClock, SystemClock};
pub use frame::{
    frame_pulse, FrameCallback, FrameHandle, FrameScheduler, StepFrameScheduler,
    DEFAULT_FRAME_INTERVAL,
};
pub use runtime::MotionRuntime;
