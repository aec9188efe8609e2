// implementation of the sluice channel.
//
// the architecture is as such:
//
// channel handles wrap around Arc<shared state>
//                                  |
//          /-----------------------/
//          v
//       shared state
//          |
//          |------ it contains a Mutex around the lockable state:
//          |
//          |       - a VecDeque<T> holding the buffered elements
//          |       - the closed flag
//          |       - a flag for whether the receiver is parked on the condvar
//          |       - with the futures feature, the waker of a pending stream poll
//          |
//          |------ it contains a Condvar, which a blocking recv parks on
//          |
//          \------ it contains an atomic count of live senders, which closes the channel when
//                  lowered to 0
//
// the organization of these modules is as such:
//
//      core: The queue-plus-synchronization engine. It knows nothing of handles, and presents
//      ^ ^   a safe abstraction that never fails.
//      | |
//      | \-----api: This is a wrapper around core that adapts it into the handle types. It owns the
//      |           sender reference counting and the moved-out state. The crate re-exports this
//      |           API publically.
//      |
//      \-------iter, stream: views over a receiver, blocking and async respectively.
//
// there is also the error module, which contains the relevant error types, which is also
// re-exported publically.

pub(crate) mod error;
pub(crate) mod api;
pub(crate) mod iter;
#[cfg(feature = "futures")]
pub(crate) mod stream;

mod core;
