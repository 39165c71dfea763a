//! Minimum-unused-integer slot allocation.

use std::collections::BTreeSet;

use super::Uid;

/// Assigns and recycles small dense integer handles within a bounded
/// capacity.
///
/// `acquire` always returns the smallest non-negative integer not currently
/// assigned (the MEX invariant), which keeps the external representation
/// dense and stable under interleaved insert/remove. The top-level inventory
/// and each storage unit interior hold independent instances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotAllocator {
    capacity: usize,
    /// Released handles below the high-water mark, kept sorted so the
    /// minimum is the next candidate.
    free: BTreeSet<u32>,
    /// First handle never yet assigned.
    next: u32,
}

impl SlotAllocator {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            free: BTreeSet::new(),
            next: 0,
        }
    }

    /// Rebuilds an allocator whose live set is exactly `used`.
    ///
    /// Used during hydration, where uids come from the persisted snapshot.
    pub fn with_used<I>(capacity: usize, used: I) -> Self
    where
        I: IntoIterator<Item = Uid>,
    {
        let live: BTreeSet<u32> = used.into_iter().map(|uid| uid.0).collect();
        let next = live.iter().next_back().map_or(0, |max| max + 1);
        let free = (0..next).filter(|n| !live.contains(n)).collect();
        Self {
            capacity,
            free,
            next,
        }
    }

    /// Returns the smallest unused handle and marks it assigned, or `None`
    /// when the live count has reached capacity.
    pub fn acquire(&mut self) -> Option<Uid> {
        if self.count() >= self.capacity {
            return None;
        }
        let uid = match self.free.iter().next().copied() {
            Some(min) => {
                self.free.remove(&min);
                min
            }
            None => {
                let n = self.next;
                self.next += 1;
                n
            }
        };
        Some(Uid(uid))
    }

    /// Frees a handle. Releasing an unassigned handle is a no-op.
    pub fn release(&mut self, uid: Uid) {
        if uid.0 >= self.next || self.free.contains(&uid.0) {
            return;
        }
        if uid.0 + 1 == self.next {
            self.next -= 1;
            // Compact trailing released handles into the high-water mark.
            while self.next > 0 && self.free.remove(&(self.next - 1)) {
                self.next -= 1;
            }
        } else {
            self.free.insert(uid.0);
        }
    }

    /// Number of handles currently assigned.
    pub fn count(&self) -> usize {
        self.next as usize - self.free.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.count() >= self.capacity
    }

    /// Frees every handle.
    pub fn clear(&mut self) {
        self.free.clear();
        self.next = 0;
    }
}
