//! Pulse-aligned throttling.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::warn;

use crate::observable::{Observable, Observer, Subscription};
use crate::scheduler::MotionRuntime;

struct Pending<T> {
    value: RefCell<Option<T>>,
    waiting: RefCell<Option<Subscription>>,
    /// Set while `pulse.subscribe` runs; a replayed pulse is not a new one.
    subscribing: Cell<bool>,
}

impl<T: 'static> Pending<T> {
    fn flush(&self, observer: &Observer<T>) {
        let waiting = self.waiting.borrow_mut().take();
        let value = self.value.borrow_mut().take();

        if let Some(waiting) = waiting {
            waiting.unsubscribe();
        }
        if let Some(value) = value {
            observer.next(value);
        }
    }

    fn clear(&self) {
        let waiting = self.waiting.borrow_mut().take();
        self.value.borrow_mut().take();

        if let Some(waiting) = waiting {
            waiting.unsubscribe();
        }
    }
}

impl<T: 'static> Observable<T> {
    /// Emit at most one value per `pulse`.
    ///
    /// Upstream is subscribed immediately. The latest upstream value is held
    /// until `pulse` next emits, and earlier values received in between are
    /// dropped. `pulse` is only subscribed while a value is waiting, and only
    /// pulses emitted after that subscription is made count; a value a
    /// replaying pulse hands over on subscribe is ignored.
    ///
    /// Subscribing to `pulse` happens inside an upstream delivery, where there
    /// is no caller to return an error to. A failed pulse subscription is
    /// logged and the value stays pending, so the next upstream value retries.
    pub fn debounce<P: 'static>(&self, pulse: &Observable<P>) -> Observable<T> {
        let source = self.clone();
        let pulse = pulse.clone();

        Observable::new(move |observer: Observer<T>| {
            let pending = Rc::new(Pending {
                value: RefCell::new(None),
                waiting: RefCell::new(None),
                subscribing: Cell::new(false),
            });

            let upstream = {
                let pending = Rc::clone(&pending);
                let pulse = pulse.clone();

                source.subscribe(Observer::new(move |value| {
                    *pending.value.borrow_mut() = Some(value);
                    if pending.subscribing.get() || pending.waiting.borrow().is_some() {
                        return;
                    }

                    let weak: Weak<Pending<T>> = Rc::downgrade(&pending);
                    let observer = observer.clone();

                    pending.subscribing.set(true);
                    let waiting = pulse.subscribe(Observer::new(move |_| {
                        if let Some(pending) = weak.upgrade() {
                            if !pending.subscribing.get() {
                                pending.flush(&observer);
                            }
                        }
                    }));
                    pending.subscribing.set(false);

                    match waiting {
                        Ok(waiting) => *pending.waiting.borrow_mut() = Some(waiting),
                        Err(error) => warn!(%error, "debounce could not wait for pulse"),
                    }
                }))?
            };

            Ok(Subscription::new(move || {
                upstream.unsubscribe();
                pending.clear();
            }))
        })
    }

    /// Emit at most one value per animation frame.
    pub fn debounce_frames(&self, runtime: &MotionRuntime) -> Observable<T> {
        self.debounce(&runtime.frame())
    }
}
