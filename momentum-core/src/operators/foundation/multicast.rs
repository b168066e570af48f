//! Shared upstream subscriptions.
//!
//! `multicast` and `remember` turn a cold stream into a hot node: the first
//! observer connects upstream, later observers share that connection, and the
//! last one to leave tears it down.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::error::Result;
use crate::observable::{Observable, Observer, ObserverId, ObserverSet, Subscription};

struct SharedNode<T> {
    source: Observable<T>,
    observers: ObserverSet<T>,
    upstream: RefCell<Option<Subscription>>,
    replay: bool,
    latest: RefCell<Option<T>>,
}

impl<T: Clone + 'static> SharedNode<T> {
    fn dispatch(&self, value: T) {
        if self.replay {
            *self.latest.borrow_mut() = Some(value.clone());
        }
        self.observers.dispatch(&value);
    }

    fn attach(self: &Rc<Self>, observer: Observer<T>) -> Result<Subscription> {
        let id = observer.id();
        let connect = self.observers.is_empty();
        self.observers.insert(observer.clone())?;

        if connect {
            trace!(replay = self.replay, "connecting shared upstream");

            let node: Weak<Self> = Rc::downgrade(self);
            let upstream = self.source.subscribe(Observer::new(move |value| {
                if let Some(node) = node.upgrade() {
                    node.dispatch(value);
                }
            }));

            let upstream = match upstream {
                Ok(upstream) => upstream,
                Err(error) => {
                    self.observers.remove(id);
                    return Err(error);
                }
            };

            // Everyone may have left while upstream was emitting synchronously.
            if self.observers.is_empty() {
                upstream.unsubscribe();
            } else {
                *self.upstream.borrow_mut() = Some(upstream);
            }
        } else if self.replay {
            let latest = self.latest.borrow().clone();
            if let Some(latest) = latest {
                observer.next(latest);
            }
        }

        let node = Rc::clone(self);
        Ok(Subscription::new(move || node.detach(id)))
    }

    fn detach(&self, id: ObserverId) {
        if !self.observers.remove(id) || !self.observers.is_empty() {
            return;
        }

        let upstream = self.upstream.borrow_mut().take();
        self.latest.borrow_mut().take();

        if let Some(upstream) = upstream {
            trace!(replay = self.replay, "disconnecting shared upstream");
            upstream.unsubscribe();
        }
    }
}

fn share<T: Clone + 'static>(source: &Observable<T>, replay: bool) -> Observable<T> {
    let node = Rc::new(SharedNode {
        source: source.clone(),
        observers: ObserverSet::new(),
        upstream: RefCell::new(None),
        replay,
        latest: RefCell::new(None),
    });

    Observable::new(move |observer| node.attach(observer))
}

impl<T: Clone + 'static> Observable<T> {
    /// Share one upstream subscription among all observers.
    ///
    /// Upstream work and side effects happen once per value no matter how
    /// many observers there are. Late observers see only later values.
    /// Attaching the same observer twice fails with
    /// `StreamError::AlreadySubscribed`.
    pub fn multicast(&self) -> Observable<T> {
        share(self, false)
    }

    /// `multicast`, plus replay of the latest value to new observers.
    ///
    /// The cached value is dropped when the last observer leaves, so a
    /// stream that is reconnected starts fresh.
    pub fn remember(&self) -> Observable<T> {
        share(self, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StreamError;
    use crate::subject::MemorylessSubject;
    use std::cell::Cell;

    fn counted(subject: &MemorylessSubject<i32>) -> (Rc<Cell<usize>>, Observable<i32>) {
        let connects = Rc::new(Cell::new(0));
        let connects_clone = connects.clone();
        let subject = subject.clone();

        let stream = Observable::new(move |observer| {
            connects_clone.set(connects_clone.get() + 1);
            subject.subscribe(observer)
        });
        (connects, stream)
    }

    #[test]
    fn observers_share_one_connection() {
        let subject = MemorylessSubject::new();
        let (connects, stream) = counted(&subject);
        let shared = stream.multicast();

        let total = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let total = total.clone();
            shared.subscribe_fn(move |value| total.set(total.get() + value)).unwrap();
        }

        subject.next(5);

        assert_eq!(connects.get(), 1);
        assert_eq!(total.get(), 10);
    }

    #[test]
    fn multicast_does_not_replay() {
        let subject = MemorylessSubject::new();
        let shared = subject.observable().multicast();
        shared.subscribe_fn(|_| {}).unwrap();
        subject.next(1);

        let late = Rc::new(Cell::new(None));
        let late_clone = late.clone();
        shared.subscribe_fn(move |value| late_clone.set(Some(value))).unwrap();

        assert_eq!(late.get(), None);
    }

    #[test]
    fn remember_replays_latest() {
        let subject = MemorylessSubject::new();
        let remembered = subject.observable().remember();
        remembered.subscribe_fn(|_| {}).unwrap();
        subject.next(1);
        subject.next(2);

        let late = Rc::new(Cell::new(None));
        let late_clone = late.clone();
        remembered.subscribe_fn(move |value| late_clone.set(Some(value))).unwrap();

        assert_eq!(late.get(), Some(2));
    }

    #[test]
    fn last_observer_tears_down_upstream() {
        let subject: MemorylessSubject<i32> = MemorylessSubject::new();
        let (connects, stream) = counted(&subject);
        let remembered = stream.remember();

        let first = remembered.subscribe_fn(|_| {}).unwrap();
        let second = remembered.subscribe_fn(|_| {}).unwrap();
        subject.next(3);

        first.unsubscribe();
        assert_eq!(subject.observer_count(), 1);
        second.unsubscribe();
        assert_eq!(subject.observer_count(), 0);

        // Reconnecting subscribes upstream again and does not replay stale values.
        let replayed = Rc::new(Cell::new(None));
        let replayed_clone = replayed.clone();
        remembered.subscribe_fn(move |value| replayed_clone.set(Some(value))).unwrap();

        assert_eq!(connects.get(), 2);
        assert_eq!(replayed.get(), None);
    }

    #[test]
    fn duplicate_observer_is_rejected() {
        let shared = MemorylessSubject::<i32>::new().observable().multicast();
        let observer = Observer::new(|_: i32| {});

        shared.subscribe(observer.clone()).unwrap();
        let error = shared.subscribe(observer.clone()).unwrap_err();

        assert_eq!(error, StreamError::AlreadySubscribed { observer: observer.id() });
    }
}
