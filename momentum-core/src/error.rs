//! Error types.
//!
//! Streams have no error channel. The variants here are contract violations
//! that are reported at the call that committed them: a double subscription
//! or a read from a stream that has nothing to give.

use thiserror::Error;

use crate::observable::ObserverId;

/// A misuse of the stream protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The same observer was attached twice to a shared node.
    #[error("{observer} is already subscribed to this stream")]
    AlreadySubscribed {
        /// The observer that was subscribed a second time.
        observer: ObserverId,
    },

    /// A read was attempted before the stream produced a value.
    #[error("stream has not produced a value")]
    NoValue,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StreamError>;
