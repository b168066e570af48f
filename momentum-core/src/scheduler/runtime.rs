//! Motion Runtime
//!
//! The runtime is the handle that connects stream graphs to the host's
//! notion of time. It owns:
//!
//! - a `FrameScheduler`, the host's "before the next repaint" primitive
//! - a `Clock`, used to timestamp samples
//! - the shared frame pulse, created lazily on first use
//!
//! Every graph that needs frame-aligned work (`debounce_frames`, velocity
//! estimation) takes the runtime explicitly, so tests can drive time with a
//! `StepFrameScheduler` instead of a real display.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use crate::observable::Observable;

use super::clock::{Clock, SystemClock};
use super::frame::{frame_pulse, FrameScheduler, StepFrameScheduler};

/// Frame scheduling and time for a set of stream graphs.
///
/// Cloning a runtime shares its scheduler, clock, and frame pulse.
#[derive(Clone)]
pub struct MotionRuntime {
    scheduler: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
    frame: Rc<OnceCell<Observable<f64>>>,
}

impl MotionRuntime {
    /// Create a runtime from a host scheduler and clock.
    pub fn new(scheduler: Rc<dyn FrameScheduler>, clock: Rc<dyn Clock>) -> Self {
        Self {
            scheduler,
            clock,
            frame: Rc::new(OnceCell::new()),
        }
    }

    /// Create a runtime on a host scheduler, timed by the system clock.
    pub fn with_scheduler(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self::new(scheduler, Rc::new(SystemClock::new()))
    }

    /// Create a runtime driven entirely by `scheduler`.
    ///
    /// The scheduler doubles as the clock, so timestamps advance only when
    /// the scheduler is stepped.
    pub fn stepped(scheduler: &StepFrameScheduler) -> Self {
        Self::new(Rc::new(scheduler.clone()), Rc::new(scheduler.clone()))
    }

    /// The shared stream of frame timestamps.
    ///
    /// Every call returns the same multicast stream, so all consumers of one
    /// runtime are woken by a single frame request.
    pub fn frame(&self) -> Observable<f64> {
        self.frame
            .get_or_init(|| frame_pulse(Rc::clone(&self.scheduler)))
            .clone()
    }

    /// The clock used to timestamp samples.
    pub fn clock(&self) -> Rc<dyn Clock> {
        Rc::clone(&self.clock)
    }

    /// The scheduler backing the frame pulse.
    pub fn scheduler(&self) -> Rc<dyn FrameScheduler> {
        Rc::clone(&self.scheduler)
    }

    /// The current time according to the runtime's clock.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }
}

impl fmt::Debug for MotionRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionRuntime")
            .field("now", &self.now())
            .field("frame_started", &self.frame.get().is_some())
            .finish()
    }
}
