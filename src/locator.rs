use core::sync::atomic::{AtomicU64, Ordering};

/// Source of queue ids, so that a locator issued by one queue is never
/// mistaken for a locator of another.
static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(0);

/// Marks a slot that does not currently name a live entry.
const FREE: usize = !0usize;

/// A handle to one entry of a [`PriorityQueue`](crate::PriorityQueue),
/// returned when the entry is inserted.
///
/// A locator is a small, copyable index into storage owned by the queue. The
/// queue keeps track of where the entry currently sits in the heap, so the
/// locator stays valid while other entries move around. Once the entry is
/// removed or popped the locator is dead; using it again is reported as
/// [`Error::IllegalLocator`](crate::Error::IllegalLocator), even if its slot
/// has been reused by a later insertion.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Locator {
    queue: u64,
    slot: u32,
    generation: u64,
}

impl Locator {
    pub(crate) fn slot(self) -> u32 {
        self.slot
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u64,
    // index into the heap array, or FREE
    position: usize,
}

/// The slot table behind every locator. Each live entry of the heap owns
/// exactly one slot, and the slot records the entry's current position.
#[derive(Clone, Debug)]
pub(crate) struct Slots {
    queue: u64,
    slots: Vec<Slot>,
    // indices of slots that are FREE, reused LIFO
    free: Vec<u32>,
    // slots whose generation is exhausted; FREE forever
    retired: usize,
}

impl Slots {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: NEXT_QUEUE_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            retired: 0,
        }
    }

    /// Claims a slot for a new entry at `position`.
    pub fn alloc(&mut self, position: usize) -> Locator {
        let slot = if let Some(slot) = self.free.pop() {
            self.slots[slot as usize].position = position;
            slot
        } else {
            assert!(self.slots.len() < u32::MAX as usize, "too many live locators");
            self.slots.push(Slot {
                generation: 0,
                position,
            });
            (self.slots.len() - 1) as u32
        };
        self.locator(slot)
    }

    /// Releases a slot. Any locator naming the old generation is now dead.
    /// A slot whose generation cannot advance is retired, never reused.
    pub fn release(&mut self, slot: u32) {
        let s = &mut self.slots[slot as usize];
        debug_assert_ne!(s.position, FREE);
        s.position = FREE;
        match s.generation.checked_add(1) {
            Some(generation) => {
                s.generation = generation;
                self.free.push(slot);
            }
            None => self.retired += 1,
        }
    }

    /// Releases every live slot.
    pub fn clear(&mut self) {
        for slot in 0..self.slots.len() {
            if self.slots[slot].position != FREE {
                self.release(slot as u32);
            }
        }
    }

    /// The recorded position of the entry named by `locator`, if the locator
    /// belongs to this table and its generation is current. The caller must
    /// still confirm that the heap agrees.
    pub fn position(&self, locator: Locator) -> Option<usize> {
        if locator.queue != self.queue {
            return None;
        }
        let s = self.slots.get(locator.slot as usize)?;
        if s.generation != locator.generation || s.position == FREE {
            return None;
        }
        Some(s.position)
    }

    pub fn set_position(&mut self, slot: u32, position: usize) {
        self.slots[slot as usize].position = position;
    }

    pub fn position_of_slot(&self, slot: u32) -> Option<usize> {
        match self.slots[slot as usize].position {
            FREE => None,
            position => Some(position),
        }
    }

    /// The locator for the current occupant of `slot`.
    pub fn locator(&self, slot: u32) -> Locator {
        Locator {
            queue: self.queue,
            slot,
            generation: self.slots[slot as usize].generation,
        }
    }

    /// Total number of slots, live or free.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn num_live(&self) -> usize {
        self.slots.len() - self.free.len() - self.retired
    }

    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }
}
