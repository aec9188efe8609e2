// channel error types.

use std::{
    error::Error as StdError,
    fmt::{self, Formatter, Debug, Display},
};
use thiserror::Error;


// ==== base error types ====


/// Error for trying to send into a channel which has been closed
///
/// A channel becomes closed when [`Sender::close`](crate::Sender::close) is called on any of its
/// senders, or when its last sender is dropped.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("channel has been closed")]
pub struct ClosedError;

/// Error for trying to use a handle whose channel was transferred away by `take`
///
/// This indicates a programming error on the caller's side rather than a condition of the channel
/// itself.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[error("handle has been moved out")]
pub struct MovedOutError;


// ==== compound error types ====


/// Reason a message could not be sent
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SendErrorCause {
    /// The channel has been closed
    #[error(transparent)]
    Closed(#[from] ClosedError),
    /// The sender handle has been moved out
    #[error(transparent)]
    MovedOut(#[from] MovedOutError),
}

/// Error for trying to send into a channel
///
/// The message that could not be sent is handed back, and the channel's queue is left untouched.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SendError<T> {
    /// The message that could not be sent
    pub msg: T,
    /// The reason the message could not be sent
    pub cause: SendErrorCause,
}

impl<T> SendError<T> {
    /// Recover the message that could not be sent
    pub fn into_inner(self) -> T {
        self.msg
    }

    /// Whether this error is due to the channel being closed
    pub fn is_closed(&self) -> bool {
        matches!(self.cause, SendErrorCause::Closed(_))
    }
}

// the message is left out so as not to require T: Debug
impl<T> Debug for SendError<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("SendError")
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

impl<T> Display for SendError<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "could not send message: {}", self.cause)
    }
}

impl<T> StdError for SendError<T> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.cause)
    }
}
