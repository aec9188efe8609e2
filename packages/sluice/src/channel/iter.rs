// blocking iteration over a receiver.

use super::{core, api::Receiver};
use std::{iter::FusedIterator, marker::PhantomData};


// iteration state shared by the borrowing and owning iterators.
struct Cursor<T> {
    // message pulled from the channel but not yet yielded.
    current: Option<T>,
    // once true, never changes again.
    exhausted: bool,
}

impl<T> Cursor<T> {
    // construct, seeding current unless the channel is already closed.
    fn new(channel: &core::Channel<T>) -> Self {
        let mut cursor = Cursor { current: None, exhausted: false };
        if channel.is_closed() {
            cursor.exhausted = true;
        } else {
            cursor.advance(channel);
        }
        cursor
    }

    // block until the next message is buffered in current or the channel is closed and drained.
    fn advance(&mut self, channel: &core::Channel<T>) {
        while !self.exhausted {
            if let Some(elem) = channel.recv() {
                self.current = Some(elem);
                return;
            }
            // blocking recv only returns none once closed, but don't rely on it
            if channel.is_closed() {
                self.current = None;
                self.exhausted = true;
            }
        }
    }

    // yield the buffered message, pulling a new one first if none is buffered.
    fn next(&mut self, channel: &core::Channel<T>) -> Option<T> {
        if self.current.is_none() {
            self.advance(channel);
        }
        self.current.take()
    }
}


/// Blocking iterator over messages received from a [`Receiver`](crate::Receiver)
///
/// Created by [`Receiver::iter`](crate::Receiver::iter) or by iterating over `&Receiver`. Creating
/// it blocks until a first message is available, unless the channel is already closed, in which
/// case the iterator starts out exhausted, even if messages sent before closing are still
/// buffered (those remain available to [`Receiver::recv`](crate::Receiver::recv)). Each
/// subsequent call to `next` blocks until another message arrives. Iteration ends once the
/// channel is closed and drained.
///
/// All exhausted iterators compare equal to each other and to [`Iter::end`], and a non-exhausted
/// iterator compares equal to nothing, not even itself.
///
/// Like the receiver it borrows, an `Iter` cannot be sent to another thread, so there is never
/// more than one thread consuming from a channel:
///
/// ```compile_fail
/// let (_send, recv) = sluice::channel::<i32>();
/// let recv: &'static sluice::Receiver<i32> = Box::leak(Box::new(recv));
/// let iter = recv.iter().unwrap();
/// std::thread::spawn(move || iter.count());
/// ```
pub struct Iter<'a, T> {
    // none for the end sentinel.
    channel: Option<&'a core::Channel<T>>,
    cursor: Cursor<T>,
    // borrows the receiver, so is Send only if the receiver is Sync, which it never is.
    _receiver: PhantomData<&'a Receiver<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(channel: &'a core::Channel<T>) -> Self {
        Iter { channel: Some(channel), cursor: Cursor::new(channel), _receiver: PhantomData }
    }

    /// Construct an already exhausted iterator
    pub fn end() -> Self {
        Iter {
            channel: None,
            cursor: Cursor { current: None, exhausted: true },
            _receiver: PhantomData,
        }
    }

    /// Whether iteration has ended
    pub fn is_exhausted(&self) -> bool {
        self.cursor.exhausted
    }

    /// The message that the next call to `next` will yield without blocking, if one is buffered
    pub fn peek(&self) -> Option<&T> {
        self.cursor.current.as_ref()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let channel = self.channel?;
        self.cursor.next(channel)
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, 'b, T> PartialEq<Iter<'b, T>> for Iter<'a, T> {
    fn eq(&self, other: &Iter<'b, T>) -> bool {
        self.is_exhausted() && other.is_exhausted()
    }
}


/// Owning blocking iterator over messages received from a [`Receiver`](crate::Receiver)
///
/// Created by calling `into_iter` on a `Receiver`. Behaves the same as [`Iter`].
pub struct IntoIter<T> {
    channel: core::Channel<T>,
    cursor: Cursor<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(channel: core::Channel<T>) -> Self {
        let cursor = Cursor::new(&channel);
        IntoIter { channel, cursor }
    }

    /// Whether iteration has ended
    pub fn is_exhausted(&self) -> bool {
        self.cursor.exhausted
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.cursor.next(&self.channel)
    }
}

impl<T> FusedIterator for IntoIter<T> {}


#[cfg(test)]
mod tests {
    use crate::channel;
    use super::*;
    use std::{thread, time::Duration};

    #[test]
    fn starts_exhausted_if_closed() {
        let (send, recv) = channel::<u32>();
        send.close().unwrap();
        let mut iter = recv.iter().unwrap();
        assert!(iter.is_exhausted());
        assert!(iter == Iter::end());
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn seeds_first_message_on_creation() {
        let (send, recv) = channel();
        send.send(3).unwrap();
        send.send(4).unwrap();
        let mut iter = recv.iter().unwrap();
        assert_eq!(iter.peek(), Some(&3));
        assert_eq!(recv.try_recv().unwrap(), Some(4));
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.peek(), None);
    }

    #[test]
    fn creation_blocks_until_first_message() {
        let (send, recv) = channel();
        let join = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            send.send("late").unwrap();
            send
        });
        let mut iter = recv.iter().unwrap();
        assert_eq!(iter.peek(), Some(&"late"));
        drop(join.join().unwrap());
        assert_eq!(iter.next(), Some("late"));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn drains_after_close_once_started() {
        let (send, recv) = channel();
        for i in 0..3 {
            send.send(i).unwrap();
        }
        let mut iter = recv.iter().unwrap();
        send.close().unwrap();
        assert_eq!(iter.by_ref().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(iter.is_exhausted());
    }

    #[test]
    fn exhausted_iterators_are_equal() {
        let (send, recv) = channel();
        send.send(1).unwrap();
        let mut iter = recv.iter().unwrap();
        drop(send);
        assert!(iter != Iter::end());
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), None);
        assert!(iter == Iter::end());
        assert!(Iter::<u8>::end() == Iter::<u8>::end());
    }

    #[test]
    fn owning_iterator_collects_until_last_sender_dropped() {
        let (send, recv) = channel();
        let send_2 = send.clone();
        let join = thread::spawn(move || {
            for i in 0..100 {
                send_2.send(i).unwrap();
            }
        });
        let mut iter = recv.into_iter();
        drop(send);
        assert_eq!(iter.by_ref().collect::<Vec<_>>(), (0..100).collect::<Vec<_>>());
        assert!(iter.is_exhausted());
        join.join().unwrap();
    }

    // compiles only if T is not Send: otherwise both impls apply and the call is ambiguous.
    trait AmbiguousIfSend<A> {
        fn check() {}
    }
    impl<T: ?Sized> AmbiguousIfSend<()> for T {}
    impl<T: ?Sized + Send> AmbiguousIfSend<u8> for T {}

    #[test]
    fn borrowing_views_stay_on_the_receiving_thread() {
        <Iter<'static, u32> as AmbiguousIfSend<_>>::check();
        #[cfg(feature = "futures")]
        <crate::stream::RecvStream<'static, u32> as AmbiguousIfSend<_>>::check();

        // the owning iterator consumes the receiver, so moving it is still fine
        fn assert_send<S: Send>() {}
        assert_send::<IntoIter<u32>>();
    }
}
