//! Binary min-heap over `(node, priority)` items.
//!
//! Equal priorities pop in push order. The search pushes a fresh item
//! whenever it finds a cheaper way into a node instead of lowering an
//! existing one, so the heap routinely holds stale duplicates; `fix` exists
//! for callers that do want to change a priority in place.

/// An item in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub node: usize,
    pub priority: u64,
}

impl Item {
    pub fn new(node: usize, priority: u64) -> Self {
        Self { node, priority }
    }
}

/// Handle returned by [`PriorityQueue::push`], valid until the item is popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

#[derive(Debug, Clone, Copy)]
struct Entry {
    item: Item,
    /// Push sequence number; also the index into `positions`.
    id: usize,
}

impl Entry {
    fn precedes(&self, other: &Entry) -> bool {
        (self.item.priority, self.id) < (other.item.priority, other.id)
    }
}

/// Min-priority queue with FIFO tie-breaking.
#[derive(Debug, Default)]
pub struct PriorityQueue {
    heap: Vec<Entry>,
    /// Heap slot of every entry ever pushed, `None` once popped.
    positions: Vec<Option<usize>>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert an item. O(log n).
    pub fn push(&mut self, item: Item) -> EntryId {
        let id = self.positions.len();
        let slot = self.heap.len();
        self.heap.push(Entry { item, id });
        self.positions.push(Some(slot));
        self.sift_up(slot);
        EntryId(id)
    }

    /// Remove and return the item with the smallest priority. O(log n).
    pub fn pop(&mut self) -> Option<Item> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.positions[entry.id] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(entry.item)
    }

    /// The item `pop` would return, without removing it.
    pub fn peek(&self) -> Option<Item> {
        self.heap.first().map(|e| e.item)
    }

    /// Change the priority of a queued item and restore heap order. O(log n).
    ///
    /// Returns `false` if the item has already been popped.
    pub fn fix(&mut self, id: EntryId, priority: u64) -> bool {
        let Some(Some(slot)) = self.positions.get(id.0).copied() else {
            return false;
        };
        self.heap[slot].item.priority = priority;
        let slot = self.sift_up(slot);
        self.sift_down(slot);
        true
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].id] = Some(a);
        self.positions[self.heap[b].id] = Some(b);
    }

    /// Returns the slot the entry ended up in.
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.heap[slot].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right].precedes(&self.heap[left]) {
                right
            } else {
                left
            };
            if !self.heap[child].precedes(&self.heap[slot]) {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Popping everything yields priorities in non-decreasing order,
        /// with push order preserved among equal priorities.
        #[test]
        fn drains_sorted_and_stable(priorities in proptest::collection::vec(0u64..20, 0..64)) {
            let mut queue = PriorityQueue::new();
            for (node, &p) in priorities.iter().enumerate() {
                queue.push(Item::new(node, p));
            }

            let mut expected: Vec<Item> = priorities
                .iter()
                .enumerate()
                .map(|(node, &p)| Item::new(node, p))
                .collect();
            expected.sort_by_key(|i| (i.priority, i.node));

            let popped: Vec<Item> = std::iter::from_fn(|| queue.pop()).collect();
            prop_assert_eq!(popped, expected);
        }

        /// Arbitrary fixes keep the heap ordered.
        #[test]
        fn fix_keeps_order(
            priorities in proptest::collection::vec(0u64..50, 1..40),
            updates in proptest::collection::vec((any::<prop::sample::Index>(), 0u64..50), 0..20),
        ) {
            let mut queue = PriorityQueue::new();
            let ids: Vec<EntryId> = priorities
                .iter()
                .enumerate()
                .map(|(node, &p)| queue.push(Item::new(node, p)))
                .collect();

            for (index, priority) in updates {
                prop_assert!(queue.fix(ids[index.index(ids.len())], priority));
            }

            let popped: Vec<u64> = std::iter::from_fn(|| queue.pop()).map(|i| i.priority).collect();
            prop_assert_eq!(popped.len(), priorities.len());
            prop_assert!(popped.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
