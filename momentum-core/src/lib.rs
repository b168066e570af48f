//! Momentum Core
//!
//! This crate provides the stream engine behind Momentum's gesture-driven
//! motion toolkit. It implements:
//!
//! - A minimal push-based observable protocol (observers, subscriptions)
//! - Subjects and reactive properties
//! - An operator algebra (mapping, multicasting, frame throttling, reactive
//!   recomputation)
//! - A reactive join (`combine_latest`)
//! - Velocity estimation for drag and fling interactions
//!
//! Delivery is synchronous and single-threaded. The only deferred work is the
//! animation-frame pulse, which is supplied by the host through a
//! `FrameScheduler`.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `observable`: the `Observable`/`Observer`/`Subscription` protocol
//! - `subject`: hot streams (`MemorylessSubject`, `ReplaySubject`,
//!   `ReactiveProperty`)
//! - `operators`: every operator, as inherent methods on `Observable`
//! - `combine_latest`: joins over named or ordered collections of streams
//! - `velocity`: the velocity estimator
//! - `scheduler`: clocks, frame scheduling, and `MotionRuntime`
//!
//! # Example
//!
//! ```rust
//! use momentum_core::{MotionRuntime, ReactiveProperty, StepFrameScheduler};
//!
//! let scheduler = StepFrameScheduler::new();
//! let runtime = MotionRuntime::stepped(&scheduler);
//!
//! // A value a gesture writes to.
//! let drag_x = ReactiveProperty::with_value(0.0_f64);
//!
//! // Derived, deduplicated, and limited to one update per frame.
//! let translate = drag_x
//!     .observable()
//!     .clamp_to(Some(0.0.into()), Some(320.0.into()))
//!     .dedupe()
//!     .debounce_frames(&runtime)
//!     .append_unit("px");
//!
//! translate.subscribe_fn(|css| println!("translateX({css})")).unwrap();
//!
//! drag_x.write(40.0);
//! drag_x.write(400.0);
//! scheduler.step();
//! // Prints: "translateX(320px)"
//! ```

pub mod combine_latest;
pub mod error;
pub mod observable;
pub mod operators;
pub mod scheduler;
pub mod subject;
pub mod types;
pub mod velocity;

pub use combine_latest::{
    combine_latest, combine_latest2, combine_latest3, combine_latest_partial, combine_latest_vec,
    CombineLatestOptions,
};
pub use error::{Result, StreamError};
pub use observable::{MaybeReactive, Observable, Observer, ObserverId, Subscription};
pub use operators::{ReactiveMapOptions, RewriteRangeArgs, RewriteRangeOptions};
pub use scheduler::{
    frame_pulse, Clock, FrameHandle, FrameScheduler, ManualClock, MotionRuntime, StepFrameScheduler,
    SystemClock,
};
pub use subject::{MemorylessSubject, PropertyStore, ReactiveProperty, ReplaySubject};
pub use types::{Arithmetic, Dimensions, Invertible, Point2D, PolarCoords, ThresholdRegion, Timestamped};
pub use velocity::{get_velocity, Kinematic, VelocityOptions};
