//! Unbounded multi-producer, single-consumer channel.
//!
//! Call [`channel`] to create a linked pair of [`Sender`] and [`Receiver`]. Senders can be cloned
//! and used from many threads at once; there is only ever one receiver. Messages are received in
//! the order they were sent, and sending never blocks.
//!
//! ```
//! let (sender, receiver) = sluice::channel::<i32>();
//!
//! sender.send(3).unwrap();
//!
//! // blocks while nothing is present
//! assert_eq!(receiver.recv().unwrap(), Some(3));
//! // never blocks
//! assert_eq!(receiver.try_recv().unwrap(), None);
//!
//! sender.send(4).unwrap();
//! sender.close().unwrap();
//! assert_eq!(sender.is_closed().unwrap(), receiver.is_closed().unwrap());
//!
//! // messages sent before closing are still delivered
//! assert_eq!(receiver.recv().unwrap(), Some(4));
//! assert_eq!(receiver.recv().unwrap(), None);
//! ```
//!
//! The channel is closed either explicitly, with [`Sender::close`], or implicitly, once every
//! sender has been dropped. Closing wakes a receiver blocked in [`Receiver::recv`], which then
//! returns `None` once the buffered messages run out. Iterating over a receiver does the same:
//!
//! ```
//! use std::thread;
//!
//! let (sender, receiver) = sluice::channel();
//! let workers = (0..4)
//!     .map(|n| {
//!         let sender = sender.clone();
//!         thread::spawn(move || sender.send(n).unwrap())
//!     })
//!     .collect::<Vec<_>>();
//! for worker in workers {
//!     worker.join().unwrap();
//! }
//! sender.send(4).unwrap();
//!
//! let mut total = 0;
//! let iter = receiver.iter().unwrap();
//! drop(sender);
//! for n in iter {
//!     total += n;
//! }
//! assert_eq!(total, 0 + 1 + 2 + 3 + 4);
//! ```
//!
//! Handles can be transferred with `take`, which leaves the original handle "moved out". Any
//! operation on a moved out handle fails with [`MovedOutError`](error::MovedOutError).

#[macro_use]
extern crate tracing;

mod channel;

pub use crate::channel::api::*;

/// Error types
pub mod error {
    pub use crate::channel::error::*;
}

/// Iterator types
pub mod iter {
    pub use crate::channel::iter::*;
}

/// Stream types
#[cfg(feature = "futures")]
pub mod stream {
    pub use crate::channel::stream::*;
}
