// exposed API of channels

use super::{
    error::*,
    core,
    iter::{Iter, IntoIter},
};
use std::{
    cell::Cell,
    fmt::{self, Formatter, Debug},
    marker::PhantomData,
    sync::atomic::Ordering::{Relaxed, AcqRel},
};


// ==== helper functions for adapting core API to exposed API ====


// 1. increment channel send count.
// 2. clone another handle to the channel.
fn clone_sender<T>(channel: &core::Channel<T>) -> core::Channel<T> {
    channel.send_count().fetch_add(1, Relaxed);
    channel.clone()
}

// 1. decrement channel send count.
// 2. if the send count was lowered to 0, close the channel.
fn drop_sender<T>(channel: &core::Channel<T>) {
    let prev_send_count = channel.send_count().fetch_sub(1, AcqRel);
    if prev_send_count == 1 && channel.close() {
        trace!("last sender dropped, channel closed");
    }
}

// get the channel a handle refers to, unless the handle was moved out.
fn valid<T>(channel: &Option<core::Channel<T>>) -> Result<&core::Channel<T>, MovedOutError> {
    channel.as_ref().ok_or(MovedOutError)
}


// ==== the exposed API ====


/// Create a channel
///
/// The channel starts open and empty, with exactly one [`Sender`] and one [`Receiver`].
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let channel_1 = core::Channel::new();
    let channel_2 = channel_1.clone();
    let send = Sender { channel: Some(channel_1) };
    let recv = Receiver { channel: Some(channel_2), _not_sync: PhantomData };
    (send, recv)
}


/// Sender handle to a channel
///
/// Senders can be cloned freely and shared between threads. The channel is closed automatically
/// once every sender has been dropped, or explicitly with [`close`](Self::close).
///
/// A sender left behind by [`take`](Self::take), or constructed with `Default`, is "moved out":
/// it refers to no channel, and all operations on it fail with [`MovedOutError`].
pub struct Sender<T> {
    channel: Option<core::Channel<T>>,
}

impl<T> Sender<T> {
    /// Send a message on this channel
    ///
    /// Never blocks, since the channel is unbounded. If the channel is closed, the message is
    /// returned in the error and nothing is enqueued.
    pub fn send(&self, msg: T) -> Result<(), SendError<T>> {
        let channel = match valid(&self.channel) {
            Ok(channel) => channel,
            Err(e) => return Err(SendError { msg, cause: e.into() }),
        };
        channel.enqueue(msg)
            .map_err(|msg| {
                debug!("rejected send into closed channel");
                SendError { msg, cause: ClosedError.into() }
            })
    }

    /// Close the channel
    ///
    /// Further sends from any sender fail with [`ClosedError`]. Messages already sent remain
    /// receivable. Closing an already closed channel does nothing.
    pub fn close(&self) -> Result<(), MovedOutError> {
        if valid(&self.channel)?.close() {
            trace!("channel closed by sender");
        }
        Ok(())
    }

    /// Whether the channel has been closed
    pub fn is_closed(&self) -> Result<bool, MovedOutError> {
        Ok(valid(&self.channel)?.is_closed())
    }

    /// Whether this handle still refers to a channel, rather than being moved out
    pub fn is_valid(&self) -> bool {
        self.channel.is_some()
    }

    /// Transfer this handle's share of the channel into a new handle, leaving this one moved out
    ///
    /// Does not change the number of live senders.
    pub fn take(&mut self) -> Self {
        Sender { channel: self.channel.take() }
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Sender { channel: self.channel.as_ref().map(clone_sender) }
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        if let Some(channel) = &self.channel {
            drop_sender(channel);
        }
    }
}

impl<T> Default for Sender<T> {
    fn default() -> Self {
        Sender { channel: None }
    }
}

impl<T> Debug for Sender<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Sender")
            .field("valid", &self.is_valid())
            .finish_non_exhaustive()
    }
}


/// Receiver handle to a channel
///
/// There is only ever one receiver per channel: it cannot be cloned, and though it may be moved to
/// another thread, it cannot be shared between threads. Dropping the receiver does not close the
/// channel; senders keep succeeding and their messages are simply never read.
///
/// A receiver left behind by [`take`](Self::take), or constructed with `Default`, is "moved out":
/// it refers to no channel, and all operations on it fail with [`MovedOutError`].
pub struct Receiver<T> {
    channel: Option<core::Channel<T>>,
    // Send but not Sync.
    _not_sync: PhantomData<Cell<()>>,
}

impl<T> Receiver<T> {
    /// Receive a message, blocking until one is available
    ///
    /// Returns `Ok(None)` once the channel is closed and every message sent before closing has
    /// been received. There is no timeout: to wait for a bounded time, poll
    /// [`try_recv`](Self::try_recv) instead.
    pub fn recv(&self) -> Result<Option<T>, MovedOutError> {
        Ok(valid(&self.channel)?.recv())
    }

    /// Try to receive a message without blocking
    ///
    /// Returns `Ok(None)` if no message is available. This includes the case where another thread
    /// happens to hold the channel's internal lock at that moment, so `Ok(None)` does not prove
    /// the channel was empty.
    pub fn try_recv(&self) -> Result<Option<T>, MovedOutError> {
        Ok(valid(&self.channel)?.try_recv())
    }

    /// Whether the channel has been closed
    ///
    /// A closed channel may still hold messages that were sent before it was closed.
    pub fn is_closed(&self) -> Result<bool, MovedOutError> {
        Ok(valid(&self.channel)?.is_closed())
    }

    /// Whether this handle still refers to a channel, rather than being moved out
    pub fn is_valid(&self) -> bool {
        self.channel.is_some()
    }

    /// Transfer the channel into a new receiver, leaving this one moved out
    pub fn take(&mut self) -> Self {
        Receiver { channel: self.channel.take(), _not_sync: PhantomData }
    }

    /// Iterate over received messages
    ///
    /// See [`Iter`]. Creating the iterator blocks until the first message arrives, unless the
    /// channel is already closed.
    pub fn iter(&self) -> Result<Iter<'_, T>, MovedOutError> {
        Ok(Iter::new(valid(&self.channel)?))
    }

    /// Asynchronously stream received messages
    ///
    /// See [`RecvStream`](crate::stream::RecvStream).
    #[cfg(feature = "futures")]
    pub fn stream(&self) -> Result<crate::stream::RecvStream<'_, T>, MovedOutError> {
        Ok(crate::stream::RecvStream::new(valid(&self.channel)?))
    }
}

/// # Panics
///
/// Panics if the receiver is moved out.
impl<'a, T> IntoIterator for &'a Receiver<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter().unwrap_or_else(|e| panic!("cannot iterate over receiver: {}", e))
    }
}

/// # Panics
///
/// Panics if the receiver is moved out.
impl<T> IntoIterator for Receiver<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let channel = self.channel.take()
            .unwrap_or_else(|| panic!("cannot iterate over receiver: {}", MovedOutError));
        IntoIter::new(channel)
    }
}

impl<T> Default for Receiver<T> {
    fn default() -> Self {
        Receiver { channel: None, _not_sync: PhantomData }
    }
}

impl<T> Debug for Receiver<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("valid", &self.is_valid())
            .finish_non_exhaustive()
    }
}


// ==== tests ====
