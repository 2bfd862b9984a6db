//! `MinHeap`: array-backed binary min-heap over `(priority, value)` pairs.
//!
//! # Invariant
//!
//! For every index `i > 0`, `heap[parent(i)].priority <= heap[i].priority`,
//! so the minimum always sits at index 0.
//!
//! # No decrease-key
//!
//! Dijkstra re-pushes a node whenever its tentative distance improves.  The
//! superseded entry stays in the heap until popped; the caller recognises
//! it as stale because the node is already in its finalized set.  This is
//! cheaper than maintaining a position index for decrease-key.
//!
//! Priorities only need `PartialOrd`, so `f64` costs work directly.  NaN
//! priorities are never pushed by this crate (edge costs are validated
//! non-negative) and would leave the order unspecified.

/// Binary min-heap ordering entries by `P`.  Ties pop in unspecified order.
#[derive(Clone, Debug)]
pub struct MinHeap<P, V> {
    entries: Vec<(P, V)>,
}

impl<P: PartialOrd + Copy, V> MinHeap<P, V> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Pre-allocate for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Insert `value` with `priority`.  O(log n).
    pub fn push(&mut self, priority: P, value: V) {
        self.entries.push((priority, value));
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the entry with the smallest priority.  O(log n).
    pub fn pop_min(&mut self) -> Option<(P, V)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop();
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// The smallest entry without removing it.  O(1).
    pub fn peek_min(&self) -> Option<(&P, &V)> {
        self.entries.first().map(|(p, v)| (p, v))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // ── Heap maintenance ──────────────────────────────────────────────────

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.entries[i].0 < self.entries[parent].0 {
                self.entries.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;

            if left < len && self.entries[left].0 < self.entries[smallest].0 {
                smallest = left;
            }
            if right < len && self.entries[right].0 < self.entries[smallest].0 {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.entries.swap(i, smallest);
            i = smallest;
        }
    }

    /// Check the heap invariant over the whole array.  Test helper.
    #[cfg(test)]
    pub(crate) fn is_valid_heap(&self) -> bool {
        (1..self.entries.len()).all(|i| !(self.entries[i].0 < self.entries[(i - 1) / 2].0))
    }
}

impl<P: PartialOrd + Copy, V> Default for MinHeap<P, V> {
    fn default() -> Self {
        Self::new()
    }
}
