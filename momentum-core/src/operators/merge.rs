//! Combining streams into one.

use crate::observable::{Observable, Observer, Subscription};

impl<T: Clone + 'static> Observable<T> {
    /// Forward values from this stream and every stream in `others`, in the
    /// order they arrive.
    pub fn merge(&self, others: &[Observable<T>]) -> Observable<T> {
        let streams: Vec<Observable<T>> = std::iter::once(self.clone())
            .chain(others.iter().cloned())
            .collect();

        Observable::new(move |observer: Observer<T>| {
            let mut subscriptions = Vec::with_capacity(streams.len());

            for stream in &streams {
                let observer = observer.clone();
                match stream.subscribe_fn(move |value| observer.next(value)) {
                    Ok(subscription) => subscriptions.push(subscription),
                    Err(error) => {
                        for subscription in &subscriptions {
                            subscription.unsubscribe();
                        }
                        return Err(error);
                    }
                }
            }

            Ok(Subscription::new(move || {
                for subscription in subscriptions {
                    subscription.unsubscribe();
                }
            }))
        })
    }

    /// Emit `initial`, then everything upstream emits.
    ///
    /// The result is remembered, so late observers receive the most recent
    /// value.
    pub fn start_with(&self, initial: T) -> Observable<T> {
        let source = self.clone();

        Observable::new(move |observer: Observer<T>| {
            observer.next(initial.clone());
            source.subscribe(observer)
        })
        .remember()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::MemorylessSubject;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn collect<T: 'static>(stream: &Observable<T>) -> Rc<RefCell<Vec<T>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        stream
            .subscribe_fn(move |value| log_clone.borrow_mut().push(value))
            .unwrap();
        log
    }

    #[test]
    fn merge_interleaves_sources() {
        let a: MemorylessSubject<i32> = MemorylessSubject::new();
        let b: MemorylessSubject<i32> = MemorylessSubject::new();
        let log = collect(&a.observable().merge(&[b.observable()]));

        a.next(1);
        b.next(2);
        a.next(3);

        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn merge_accepts_the_same_shared_stream_twice() {
        let subject: MemorylessSubject<i32> = MemorylessSubject::new();
        let shared = subject.observable().multicast();
        let log = collect(&shared.merge(&[shared.clone()]));

        subject.next(7);

        assert_eq!(*log.borrow(), vec![7, 7]);
    }

    #[test]
    fn start_with_seeds_and_remembers() {
        let subject: MemorylessSubject<i32> = MemorylessSubject::new();
        let seeded = subject.observable().start_with(0);

        let first = collect(&seeded);
        subject.next(4);
        let late = collect(&seeded);

        assert_eq!(*first.borrow(), vec![0, 4]);
        assert_eq!(*late.borrow(), vec![4]);
    }
}
