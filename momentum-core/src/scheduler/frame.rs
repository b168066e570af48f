//! Animation-frame scheduling.
//!
//! The frame pulse is the only deferred work in the crate. It is backed by a
//! `FrameScheduler`, the host's "run this before the next repaint" primitive.
//! `StepFrameScheduler` stands in for it in tests and headless hosts.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::observable::{Observable, Observer, Subscription};

use super::clock::Clock;

/// Identifies a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Wrap a host-issued request id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-issued request id.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Callback run at the start of a frame with the frame's timestamp.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// The host's animation-frame primitive.
pub trait FrameScheduler {
    /// Run `callback` once, at the start of the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Withdraw a request that has not run yet.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Frame interval used by `StepFrameScheduler::new`, in milliseconds.
pub const DEFAULT_FRAME_INTERVAL: f64 = 1000.0 / 60.0;

struct StepState {
    queue: RefCell<IndexMap<FrameHandle, FrameCallback>>,
    next_handle: Cell<u64>,
    time: Cell<f64>,
    interval: f64,
}

/// A frame scheduler driven by explicit calls to `step`.
///
/// Each step advances time by a fixed interval and runs every callback that
/// was requested before the step began. Callbacks requested during a step
/// wait for the next one. Clones share the same queue and time.
#[derive(Clone)]
pub struct StepFrameScheduler {
    state: Rc<StepState>,
}

impl StepFrameScheduler {
    /// Create a scheduler that advances by `DEFAULT_FRAME_INTERVAL` per step.
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_FRAME_INTERVAL)
    }

    /// Create a scheduler that advances by `interval` milliseconds per step.
    pub fn with_interval(interval: f64) -> Self {
        Self {
            state: Rc::new(StepState {
                queue: RefCell::new(IndexMap::new()),
                next_handle: Cell::new(1),
                time: Cell::new(0.0),
                interval,
            }),
        }
    }

    /// Run one frame. Returns the number of callbacks that ran.
    pub fn step(&self) -> usize {
        let time = self.state.time.get() + self.state.interval;
        self.state.time.set(time);

        let due: Vec<FrameCallback> = self
            .state
            .queue
            .borrow_mut()
            .drain(..)
            .map(|(_, callback)| callback)
            .collect();

        let count = due.len();
        for callback in due {
            callback(time);
        }
        count
    }

    /// Get the number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.state.queue.borrow().len()
    }
}

impl Default for StepFrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for StepFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.state.next_handle.get());
        self.state.next_handle.set(handle.0 + 1);
        self.state.queue.borrow_mut().insert(handle, callback);
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.state.queue.borrow_mut().shift_remove(&handle);
    }
}

impl Clock for StepFrameScheduler {
    fn now(&self) -> f64 {
        self.state.time.get()
    }
}

impl fmt::Debug for StepFrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepFrameScheduler")
            .field("time", &self.state.time.get())
            .field("pending", &self.pending())
            .finish()
    }
}

/// One subscriber's request loop.
struct FrameLoop {
    scheduler: Rc<dyn FrameScheduler>,
    observer: Observer<f64>,
    queued: Cell<Option<FrameHandle>>,
    active: Cell<bool>,
}

impl FrameLoop {
    fn queue(this: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(this);

        let handle = this.scheduler.request_frame(Box::new(move |timestamp| {
            let Some(this) = weak.upgrade() else {
                return;
            };

            this.queued.set(None);
            if !this.active.get() {
                return;
            }

            this.observer.next(timestamp);

            // The observer may have unsubscribed while handling the frame.
            if this.active.get() {
                FrameLoop::queue(&this);
            }
        }));

        this.queued.set(Some(handle));
    }

    fn stop(&self) {
        self.active.set(false);
        if let Some(handle) = self.queued.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

/// A shared stream that emits each frame's timestamp.
///
/// Frames are requested only while the stream has subscribers. All
/// subscribers share one request loop; when the last one leaves, the pending
/// request is cancelled.
pub fn frame_pulse(scheduler: Rc<dyn FrameScheduler>) -> Observable<f64> {
    Observable::new(move |observer: Observer<f64>| {
        debug!("frame pulse started");

        let frame_loop = Rc::new(FrameLoop {
            scheduler: Rc::clone(&scheduler),
            observer,
            queued: Cell::new(None),
            active: Cell::new(true),
        });
        FrameLoop::queue(&frame_loop);

        Ok(Subscription::new(move || {
            trace!("frame pulse stopped");
            frame_loop.stop();
        }))
    })
    .multicast()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_listener() -> (Rc<Cell<usize>>, Observer<f64>) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        (
            count,
            Observer::new(move |_| count_clone.set(count_clone.get() + 1)),
        )
    }

    #[test]
    fn emits_at_the_beginning_of_each_frame() {
        let scheduler = StepFrameScheduler::new();
        let frame = frame_pulse(Rc::new(scheduler.clone()));
        let (count, listener) = counting_listener();

        frame.subscribe(listener).unwrap();

        scheduler.step();
        assert_eq!(count.get(), 1);

        scheduler.step();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn stops_emitting_on_unsubscription() {
        let scheduler = StepFrameScheduler::new();
        let frame = frame_pulse(Rc::new(scheduler.clone()));
        let (count, listener) = counting_listener();

        let subscription = frame.subscribe(listener).unwrap();
        scheduler.step();
        subscription.unsubscribe();
        scheduler.step();

        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn does_not_emit_if_unsubscribed_before_a_frame() {
        let scheduler = StepFrameScheduler::new();
        let frame = frame_pulse(Rc::new(scheduler.clone()));
        let (count, listener) = counting_listener();

        let subscription = frame.subscribe(listener).unwrap();
        subscription.unsubscribe();
        scheduler.step();

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn subscribers_share_one_request() {
        let scheduler = StepFrameScheduler::new();
        let frame = frame_pulse(Rc::new(scheduler.clone()));
        let (first, first_listener) = counting_listener();
        let (second, second_listener) = counting_listener();

        frame.subscribe(first_listener).unwrap();
        frame.subscribe(second_listener).unwrap();
        assert_eq!(scheduler.pending(), 1);

        scheduler.step();
        assert_eq!((first.get(), second.get()), (1, 1));
    }

    #[test]
    fn frames_carry_scheduler_time() {
        let scheduler = StepFrameScheduler::with_interval(10.0);
        let frame = frame_pulse(Rc::new(scheduler.clone()));
        let stamps = Rc::new(RefCell::new(Vec::new()));
        let stamps_clone = stamps.clone();

        frame
            .subscribe_fn(move |time| stamps_clone.borrow_mut().push(time))
            .unwrap();
        scheduler.step();
        scheduler.step();

        assert_eq!(*stamps.borrow(), vec![10.0, 20.0]);
        assert_eq!(scheduler.now(), 20.0);
    }
}
