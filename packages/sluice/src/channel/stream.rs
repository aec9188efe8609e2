// async stream over a receiver.

use super::{core, api::Receiver};
use futures::stream::{Stream, FusedStream};
use std::{
    marker::PhantomData,
    pin::Pin,
    task::{Context, Poll},
};


/// Stream of messages received from a [`Receiver`](crate::Receiver)
///
/// Created by [`Receiver::stream`](crate::Receiver::stream). Unlike [`Iter`](crate::iter::Iter),
/// this never blocks the thread: while the channel is open and empty, the task is woken by the
/// next send or by the channel closing. The stream ends once the channel is closed and drained,
/// and stays ended.
///
/// Like the receiver it borrows, a `RecvStream` cannot be sent to another thread, so it cannot be
/// polled from one thread while another consumes the same channel:
///
/// ```compile_fail
/// let (_send, recv) = sluice::channel::<i32>();
/// let recv: &'static sluice::Receiver<i32> = Box::leak(Box::new(recv));
/// let stream = recv.stream().unwrap();
/// std::thread::spawn(move || drop(stream));
/// ```
pub struct RecvStream<'a, T> {
    // none once terminated.
    channel: Option<&'a core::Channel<T>>,
    // borrows the receiver, so is Send only if the receiver is Sync, which it never is.
    _receiver: PhantomData<&'a Receiver<T>>,
}

impl<'a, T> RecvStream<'a, T> {
    pub(crate) fn new(channel: &'a core::Channel<T>) -> Self {
        RecvStream { channel: Some(channel), _receiver: PhantomData }
    }
}

impl<'a, T> Stream for RecvStream<'a, T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<T>> {
        let this = self.get_mut();
        let Some(channel) = this.channel else { return Poll::Ready(None) };
        let poll = channel.poll_recv(cx);
        if let Poll::Ready(None) = &poll {
            this.channel = None;
        }
        poll
    }
}

impl<'a, T> FusedStream for RecvStream<'a, T> {
    fn is_terminated(&self) -> bool {
        self.channel.is_none()
    }
}


#[cfg(test)]
mod tests {
    use crate::channel;
    use futures::{executor::block_on, stream::FusedStream, StreamExt};
    use std::thread;

    #[test]
    fn stream_drains_then_ends() {
        let (send, recv) = channel();
        send.send(1).unwrap();
        send.send(2).unwrap();
        send.close().unwrap();
        let mut stream = recv.stream().unwrap();
        let got = block_on(stream.by_ref().collect::<Vec<_>>());
        assert_eq!(got, vec![1, 2]);
        assert!(stream.is_terminated());
        assert_eq!(block_on(stream.next()), None);
    }

    #[test]
    fn stream_wakes_on_send_from_other_thread() {
        let (send, recv) = channel();
        let join = thread::spawn(move || {
            for i in 0..50 {
                send.send(i).unwrap();
                thread::yield_now();
            }
        });
        let got = block_on(recv.stream().unwrap().collect::<Vec<_>>());
        assert_eq!(got, (0..50).collect::<Vec<_>>());
        join.join().unwrap();
    }

    #[test]
    fn stream_on_tokio_runtime() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let (send, recv) = channel();
        let got = rt.block_on(async {
            let producer = tokio::task::spawn_blocking(move || {
                for i in 0..100u32 {
                    send.send(i).unwrap();
                }
            });
            let got = recv.stream().unwrap().collect::<Vec<_>>().await;
            producer.await.unwrap();
            got
        });
        assert_eq!(got, (0..100).collect::<Vec<_>>());
    }
}
