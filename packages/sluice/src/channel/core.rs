// minimal safe API for the channel. the exposed API is a convenience wrapper around this.

use std::{
    collections::VecDeque,
    sync::{
        atomic::AtomicUsize,
        Arc,
        Condvar,
        Mutex,
        MutexGuard,
        PoisonError,
        TryLockError,
    },
};
#[cfg(feature = "futures")]
use std::task::{Context, Poll, Waker};


// handle to a channel.
pub(crate) struct Channel<T>(Arc<Shared<T>>);

// channel shared state.
struct Shared<T> {
    // mutex around lockable state.
    lockable: Mutex<Lockable<T>>,
    // signalled when elems becomes non-empty or the channel closes, if need_notify was set.
    cond: Condvar,

    // number of live sender handles. moved-out senders are not counted.
    send_count: AtomicUsize,
}

// channel lockable state.
struct Lockable<T> {
    // storage for elements.
    elems: VecDeque<T>,
    // begins false. once true, never changes again, and no more elems are pushed.
    closed: bool,
    // whether a blocking recv is parked on the condvar.
    //
    // only set while holding the lock, and cleared in the same critical section that decides to
    // notify, so that a wake-up is never lost.
    need_notify: bool,
    // waker of a pending stream poll, if any.
    #[cfg(feature = "futures")]
    waker: Option<Waker>,
}

// wake-ups decided on while holding the lock, to be performed after releasing it.
#[must_use]
struct Wake {
    notify: bool,
    #[cfg(feature = "futures")]
    waker: Option<Waker>,
}

impl<T> Lockable<T> {
    // take the pending wake-ups, clearing need_notify.
    fn take_wake(&mut self) -> Wake {
        Wake {
            notify: std::mem::take(&mut self.need_notify),
            #[cfg(feature = "futures")]
            waker: self.waker.take(),
        }
    }
}

impl Wake {
    // perform the wake-ups. must be called with the lock released.
    fn wake<T>(self, shared: &Shared<T>) {
        if self.notify {
            shared.cond.notify_one();
        }
        #[cfg(feature = "futures")]
        if let Some(waker) = self.waker {
            waker.wake();
        }
    }
}

impl<T> Channel<T> {
    // construct empty, open channel with send count of 1.
    pub(crate) fn new() -> Self {
        Channel(Arc::new(Shared {
            lockable: Mutex::new(Lockable {
                elems: VecDeque::new(),
                closed: false,
                need_notify: false,
                #[cfg(feature = "futures")]
                waker: None,
            }),
            cond: Condvar::new(),
            send_count: AtomicUsize::new(1),
        }))
    }

    // clone another handle to the channel.
    pub(crate) fn clone(&self) -> Self {
        Channel(Arc::clone(&self.0))
    }

    // reference to the send count.
    pub(crate) fn send_count(&self) -> &AtomicUsize {
        &self.0.send_count
    }

    // lock the channel. no critical section leaves the state half-updated, so poisoning is
    // ignored.
    fn lock(&self) -> MutexGuard<'_, Lockable<T>> {
        self.0.lockable.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // push elem to the back of the queue and wake the receiver if it is waiting.
    //
    // if the channel is closed, returns the elem back as an error.
    pub(crate) fn enqueue(&self, elem: T) -> Result<(), T> {
        let mut lock = self.lock();
        if lock.closed {
            return Err(elem);
        }
        lock.elems.push_back(elem);
        let wake = lock.take_wake();
        drop(lock);
        wake.wake(&self.0);
        Ok(())
    }

    // pop the front elem, blocking until one is available or the channel is closed and drained,
    // in which case return none.
    pub(crate) fn recv(&self) -> Option<T> {
        let mut lock = self.lock();
        if lock.elems.is_empty() && !lock.closed {
            lock.need_notify = true;
            lock = self.0.cond
                .wait_while(lock, |lockable| lockable.elems.is_empty() && !lockable.closed)
                .unwrap_or_else(PoisonError::into_inner);
        }
        // closing does not discard elems that were pushed before it.
        lock.elems.pop_front()
    }

    // pop the front elem without blocking.
    //
    // returns none if the queue is empty, but also if the lock is currently held elsewhere. the
    // two cases are deliberately not distinguished.
    pub(crate) fn try_recv(&self) -> Option<T> {
        let mut lock = match self.0.lockable.try_lock() {
            Ok(lock) => lock,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => return None,
        };
        lock.elems.pop_front()
    }

    // poll for the front elem, registering the context's waker if none is available yet.
    //
    // resolves to none once the channel is closed and drained.
    #[cfg(feature = "futures")]
    pub(crate) fn poll_recv(&self, cx: &mut Context) -> Poll<Option<T>> {
        let mut lock = self.lock();
        if let Some(elem) = lock.elems.pop_front() {
            return Poll::Ready(Some(elem));
        }
        if lock.closed {
            return Poll::Ready(None);
        }
        if !lock.waker.as_ref().is_some_and(|waker| waker.will_wake(cx.waker())) {
            lock.waker = Some(cx.waker().clone());
        }
        Poll::Pending
    }

    // close the channel and wake the receiver if it is waiting.
    //
    // returns whether this call transitioned the channel to closed.
    pub(crate) fn close(&self) -> bool {
        let mut lock = self.lock();
        if lock.closed {
            return false;
        }
        lock.closed = true;
        let wake = lock.take_wake();
        drop(lock);
        wake.wake(&self.0);
        true
    }

    // whether the channel is closed.
    pub(crate) fn is_closed(&self) -> bool {
        self.lock().closed
    }
}
