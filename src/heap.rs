use crate::error::Error;
use crate::locator::{Locator, Slots};
use crate::orientation::{MaxFirst, MinFirst, Orientation};
use bit_vec::BitVec;
use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;
use log::{debug, trace};

struct Entry<T, P> {
    priority: P,
    item: T,
    // the slot of the locator that names this entry
    slot: u32,
}

/// A binary-heap priority queue whose entries can be removed or reprioritized
/// in O(log n) through the [`Locator`] returned when they were inserted.
///
/// Priorities are computed from items by the key function `K` and compared
/// with `Ord`. The orientation `O` decides whether the smallest
/// ([`MinFirst`]) or largest ([`MaxFirst`]) priority is extremal. Entries with
/// equal priorities come out in no particular order. The queue is `Send` or
/// `Sync` whenever its items, priorities and key are.
///
/// Queues built with [`new`](Self::new) or [`from_items`](Self::from_items)
/// use the item as its own priority, which stores a clone of every item next
/// to the item itself. For items that are expensive to clone, queue
/// references (`&String`), or pass a cheaper key to
/// [`with_key`](Self::with_key).
///
/// | operation                           | cost       |
/// |-------------------------------------|------------|
/// | `len`, `peek`                       | O(1)       |
/// | `insert`, `pop`, `remove`, `update` | O(log n)*  |
/// | `contains`                          | O(n)       |
/// | `sorted_items`                      | O(n log n) |
///
/// \* amortized, because the backing vector occasionally grows.
pub struct PriorityQueue<T, P = T, O = MinFirst, K = fn(&T) -> P> {
    pq: Vec<Entry<T, P>>,
    slots: Slots,
    key: K,
    orientation: PhantomData<O>,
}

/// A queue that yields the smallest priority first.
pub type MinPriorityQueue<T, P = T, K = fn(&T) -> P> = PriorityQueue<T, P, MinFirst, K>;

/// A queue that yields the largest priority first.
pub type MaxPriorityQueue<T, P = T, K = fn(&T) -> P> = PriorityQueue<T, P, MaxFirst, K>;

fn left(parent: usize) -> usize { parent * 2 + 1 }
fn right(parent: usize) -> usize { parent * 2 + 2 }
fn parent(child: usize) -> usize { (child - 1) / 2 }

impl<T: Clone + Ord, O: Orientation> PriorityQueue<T, T, O> {
    /// Creates an empty queue that uses each item as its own priority.
    pub fn new() -> Self {
        Self::with_key(T::clone)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_key(capacity, T::clone)
    }

    /// Builds a queue from `items` in O(n), using each item as its own
    /// priority.
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        Self::from_items_with_key(items, T::clone)
    }
}

impl<T: Clone + Ord, O: Orientation> Default for PriorityQueue<T, T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Ord, O: Orientation> core::iter::FromIterator<T> for PriorityQueue<T, T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<T, P: Ord, O: Orientation, K: Fn(&T) -> P> PriorityQueue<T, P, O, K> {
    /// Creates an empty queue that computes priorities with `key`.
    pub fn with_key(key: K) -> Self {
        Self::with_capacity_and_key(0, key)
    }

    pub fn with_capacity_and_key(capacity: usize, key: K) -> Self {
        Self {
            pq: Vec::with_capacity(capacity),
            slots: Slots::with_capacity(capacity),
            key,
            orientation: PhantomData,
        }
    }

    /// Builds a queue from `items` in O(n). Items are decorated with their
    /// priorities, laid out in input order, and then heapified bottom-up.
    pub fn from_items_with_key<I: IntoIterator<Item = T>>(items: I, key: K) -> Self {
        let items = items.into_iter();
        let mut queue = Self::with_capacity_and_key(items.size_hint().0, key);
        for item in items {
            let priority = (queue.key)(&item);
            let position = queue.pq.len();
            let slot = queue.slots.alloc(position).slot();
            queue.pq.push(Entry {
                priority,
                item,
                slot,
            });
        }
        queue.heapify();
        queue
    }

    /// Restores heap order over the whole array, from the parent of the last
    /// leaf down to the root.
    fn heapify(&mut self) {
        debug!("heapify: {} entries", self.pq.len());
        if self.pq.len() < 2 {
            return;
        }
        for i in (0..=parent(self.pq.len() - 1)).rev() {
            self.sift_down(i);
        }
    }

    pub fn len(&self) -> usize {
        self.pq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pq.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.pq.reserve(additional);
        self.slots.reserve(additional);
    }

    /// Removes every entry. All outstanding locators become dead.
    pub fn clear(&mut self) {
        debug!("clear: dropping {} entries", self.pq.len());
        self.pq.clear();
        self.slots.clear();
    }

    /// Inserts an item, computing its priority with the key function.
    pub fn insert(&mut self, item: T) -> Locator {
        let priority = (self.key)(&item);
        self.insert_with_priority(priority, item)
    }

    /// Inserts an item with an explicit priority, bypassing the key function.
    pub fn insert_with_priority(&mut self, priority: P, item: T) -> Locator {
        let index = self.pq.len();
        let locator = self.slots.alloc(index);
        self.pq.push(Entry {
            priority,
            item,
            slot: locator.slot(),
        });
        let position = self.sift_up(index);
        trace!("insert: slot {} settled at {}", locator.slot(), position);
        locator
    }

    /// Returns the extremal item without removing it.
    pub fn peek(&self) -> Result<&T, Error> {
        self.pq.first().map(|e| &e.item).ok_or(Error::EmptyQueue)
    }

    /// Returns the priority of the extremal item.
    pub fn peek_priority(&self) -> Result<&P, Error> {
        self.pq.first().map(|e| &e.priority).ok_or(Error::EmptyQueue)
    }

    /// Removes and returns the extremal item. Its locator becomes dead.
    pub fn pop(&mut self) -> Result<T, Error> {
        if self.pq.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let entry = self.detach(0);
        if !self.pq.is_empty() {
            self.sift_down(0);
        }
        trace!("pop: slot {}", entry.slot);
        Ok(entry.item)
    }

    /// Removes the entry named by `locator` and returns its item.
    pub fn remove(&mut self, locator: Locator) -> Result<T, Error> {
        let position = self.locate(locator)?;
        let entry = self.detach(position);
        if position < self.pq.len() {
            self.fix(position);
        }
        trace!("remove: slot {} from {}", entry.slot, position);
        Ok(entry.item)
    }

    /// Replaces the priority and item of the entry named by `locator`. The
    /// locator remains valid.
    pub fn update(&mut self, locator: Locator, priority: P, item: T) -> Result<(), Error> {
        let position = self.locate(locator)?;
        let entry = &mut self.pq[position];
        entry.priority = priority;
        entry.item = item;
        let moved_to = self.fix(position);
        trace!("update: slot {} moved {} -> {}", locator.slot(), position, moved_to);
        Ok(())
    }

    /// Replaces only the priority of the entry named by `locator`.
    pub fn update_priority(&mut self, locator: Locator, priority: P) -> Result<(), Error> {
        let position = self.locate(locator)?;
        self.pq[position].priority = priority;
        let moved_to = self.fix(position);
        trace!("update_priority: slot {} moved {} -> {}", locator.slot(), position, moved_to);
        Ok(())
    }

    /// Returns the item named by `locator`.
    pub fn get(&self, locator: Locator) -> Result<&T, Error> {
        let position = self.locate(locator)?;
        Ok(&self.pq[position].item)
    }

    /// Returns the priority of the entry named by `locator`.
    pub fn priority(&self, locator: Locator) -> Result<&P, Error> {
        let position = self.locate(locator)?;
        Ok(&self.pq[position].priority)
    }

    /// Returns the current index of the entry named by `locator` within the
    /// heap array. This changes as other entries come and go.
    pub fn position(&self, locator: Locator) -> Result<usize, Error> {
        self.locate(locator)
    }

    /// Returns true if any entry holds `item`. This is a linear scan; callers
    /// that need fast membership should keep their own map of locators.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.pq.iter().any(|e| e.item == *item)
    }

    /// Items in heap-array order.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.pq.iter().map(|e| &e.item)
    }

    /// Locators of all live entries, in heap-array order.
    pub fn locators(&self) -> impl Iterator<Item = Locator> + '_ {
        let slots = &self.slots;
        self.pq.iter().map(move |e| slots.locator(e.slot))
    }

    /// All items, extremal first, ordered by priority. The queue is not
    /// modified.
    pub fn sorted_items(&self) -> Vec<&T> {
        let mut entries: Vec<&Entry<T, P>> = self.pq.iter().collect();
        entries.sort_by(|a, b| O::compare(&a.priority, &b.priority));
        entries.into_iter().map(|e| &e.item).collect()
    }

    /// Iterates items extremal first, without modifying the queue.
    pub fn iter_sorted(&self) -> std::vec::IntoIter<&T> {
        self.sorted_items().into_iter()
    }

    /// Consumes the queue, returning its items extremal first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let mut entries = self.pq;
        entries.sort_by(|a, b| O::compare(&a.priority, &b.priority));
        entries.into_iter().map(|e| e.item).collect()
    }

    /// Panics unless heap order and position bookkeeping hold for every
    /// entry, and every live slot is named by exactly one entry.
    #[doc(hidden)]
    pub fn check(&self) {
        let mut seen = BitVec::from_elem(self.slots.len(), false);
        for (i, entry) in self.pq.iter().enumerate() {
            if i > 0 {
                assert!(
                    !O::is_better(&entry.priority, &self.pq[parent(i)].priority),
                    "heap order violated at {}",
                    i
                );
            }
            let slot = entry.slot as usize;
            assert!(!seen[slot], "slot {} is named twice", slot);
            seen.set(slot, true);
            assert_eq!(
                self.slots.position_of_slot(entry.slot),
                Some(i),
                "slot {} has a stale position",
                slot
            );
        }
        assert_eq!(self.slots.num_live(), self.pq.len());
    }

    /// Finds the array index of a live locator. A locator is accepted only if
    /// its slot is current and the entry at the recorded position is the one
    /// that owns that slot.
    fn locate(&self, locator: Locator) -> Result<usize, Error> {
        match self.slots.position(locator) {
            Some(position)
                if position < self.pq.len() && self.pq[position].slot == locator.slot() =>
            {
                Ok(position)
            }
            _ => Err(Error::IllegalLocator),
        }
    }

    fn is_better(&self, i: usize, j: usize) -> bool {
        O::is_better(&self.pq[i].priority, &self.pq[j].priority)
    }

    /// Swaps two entries and the positions recorded for them.
    fn swap(&mut self, i: usize, j: usize) {
        self.pq.swap(i, j);
        self.slots.set_position(self.pq[i].slot, i);
        self.slots.set_position(self.pq[j].slot, j);
    }

    /// Takes the entry at `position` out of the array, filling the hole with
    /// the last entry, and releases its slot. Heap order at `position` must be
    /// restored by the caller.
    fn detach(&mut self, position: usize) -> Entry<T, P> {
        let entry = self.pq.swap_remove(position);
        if position < self.pq.len() {
            self.slots.set_position(self.pq[position].slot, position);
        }
        self.slots.release(entry.slot);
        entry
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = parent(i);
            if !self.is_better(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) -> usize {
        loop {
            let left = left(i);
            if left >= self.pq.len() {
                break;
            }
            let right = right(i);
            let child = if right < self.pq.len() && self.is_better(right, left) {
                right
            } else {
                left
            };
            if !self.is_better(child, i) {
                break;
            }
            self.swap(i, child);
            i = child;
        }
        i
    }

    /// Moves the entry at `i` to wherever heap order wants it. At most one
    /// direction actually moves it.
    fn fix(&mut self, i: usize) -> usize {
        let i = self.sift_up(i);
        self.sift_down(i)
    }
}

impl<T, P: Ord, O: Orientation, K: Fn(&T) -> P> Extend<T> for PriorityQueue<T, P, O, K> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T, P: Ord, O: Orientation, K: Fn(&T) -> P> IntoIterator
    for &'a PriorityQueue<T, P, O, K>
{
    type Item = &'a T;
    type IntoIter = std::vec::IntoIter<&'a T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_sorted()
    }
}

impl<T: Debug, P: Debug, O, K> Debug for PriorityQueue<T, P, O, K> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> core::fmt::Result {
        write!(fmt, "PriorityQueue([")?;
        for (i, entry) in self.pq.iter().enumerate() {
            if i > 0 {
                write!(fmt, ", ")?;
            }
            write!(
                fmt,
                "Locator(value={:?}, item={:?}, index={})",
                entry.priority, entry.item, i
            )?;
        }
        write!(fmt, "])")?;
        Ok(())
    }
}
