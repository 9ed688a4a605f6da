use core::fmt::{Display, Formatter};

/// Errors reported by [`PriorityQueue`](crate::PriorityQueue).
///
/// Every fallible operation validates its input before touching the heap, so
/// a queue that returned an error is left exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// `peek` or `pop` was called on an empty queue.
    EmptyQueue,
    /// The locator does not name a live entry of this queue. It was already
    /// removed or popped, or it was issued by a different queue.
    IllegalLocator,
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::EmptyQueue => write!(fmt, "priority queue is empty"),
            Error::IllegalLocator => write!(fmt, "invalid locator"),
        }
    }
}

impl std::error::Error for Error {}
