//! A binary-heap priority queue with locators.
//!
//! Inserting into a [`PriorityQueue`] returns a [`Locator`]. The queue keeps
//! every locator pointed at its entry as the heap is reshuffled, which makes
//! it possible to remove or reprioritize any entry in O(log n), not just the
//! extremal one.
//!
//! ```
//! use locator_heap::MinPriorityQueue;
//!
//! let mut pq = MinPriorityQueue::from_items(vec![12, 46, 89, 101, 72, 81]);
//! let loc = pq.insert(5);
//! assert_eq!(pq.peek(), Ok(&5));
//! assert_eq!(pq.remove(loc), Ok(5));
//! assert_eq!(pq.pop(), Ok(12));
//! ```

pub mod error;
pub mod heap;
pub mod locator;
pub mod orientation;

#[cfg(test)]
mod testing;

pub use crate::error::Error;
pub use crate::heap::{MaxPriorityQueue, MinPriorityQueue, PriorityQueue};
pub use crate::locator::Locator;
pub use crate::orientation::{MaxFirst, MinFirst, Orientation};
