//! Synchronous reads from streams.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Result, StreamError};
use crate::observable::Observable;

impl<T: 'static> Observable<T> {
    /// The value this stream emits synchronously on subscribe.
    ///
    /// Subscribes, keeps the last value delivered during the call, and
    /// unsubscribes. Meaningful for subjects and remembered streams; anything
    /// else that does not emit on subscribe fails with
    /// `StreamError::NoValue`.
    pub fn read(&self) -> Result<T> {
        let captured = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&captured);

        self.subscribe_fn(move |value| *sink.borrow_mut() = Some(value))?
            .unsubscribe();

        let value = captured.borrow_mut().take();
        value.ok_or(StreamError::NoValue)
    }
}
