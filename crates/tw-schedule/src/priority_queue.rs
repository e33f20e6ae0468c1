//! `PriorityQueue`: array-backed binary min-heap with FIFO tie-breaking.
//!
//! # Ordering
//!
//! Every entry carries its key and an insertion sequence number stamped on
//! `push`.  Entry `A` comes before `B` iff
//!
//! ```text
//! A.key < B.key   or   (A.key == B.key  and  A.seq < B.seq)
//! ```
//!
//! The sequence counter is strictly increasing and never reset (not even by
//! `clear`), so participants pushed with equal keys always pop in push order.
//! Round-robin fairness depends on this.
//!
//! # Complexity
//!
//! `push` / `pop_min` are O(log n).  `find` and `remove` scan linearly; the
//! expected population is tens of entries.  If that grows to thousands, keep
//! a side table `value → heap index` updated on every swap to make `remove`
//! O(log n).

use std::cmp::Ordering;

use crate::{ScheduleError, ScheduleResult};

struct HeapEntry<P> {
    key:   f64,
    seq:   u64,
    value: P,
}

impl<P> HeapEntry<P> {
    #[inline]
    fn precedes(&self, other: &HeapEntry<P>) -> bool {
        match self.key.total_cmp(&other.key) {
            Ordering::Less    => true,
            Ordering::Greater => false,
            Ordering::Equal   => self.seq < other.seq,
        }
    }
}

/// A min-heap of `(key, value)` pairs.
pub struct PriorityQueue<P> {
    heap:     Vec<HeapEntry<P>>,
    next_seq: u64,
}

impl<P> Default for PriorityQueue<P> {
    fn default() -> Self {
        Self { heap: Vec::new(), next_seq: 0 }
    }
}

impl<P> PriorityQueue<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` with priority `key`.
    pub fn push(&mut self, value: P, key: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(HeapEntry { key, seq, value });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the entry with the smallest `(key, seq)`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::EmptyQueue`] if the heap is empty.  That is a caller
    /// bug, not a steady-state outcome.
    pub fn pop_min(&mut self) -> ScheduleResult<(f64, P)> {
        if self.heap.is_empty() {
            return Err(ScheduleError::EmptyQueue);
        }
        // The last leaf takes the root's slot, then sinks.
        let entry = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok((entry.key, entry.value))
    }

    /// The entry `pop_min` would return, without removing it.
    pub fn peek_min(&self) -> Option<(f64, &P)> {
        self.heap.first().map(|e| (e.key, &e.value))
    }

    /// Add `delta` to every key.  A uniform shift never changes heap order.
    pub fn shift_all(&mut self, delta: f64) {
        for entry in &mut self.heap {
            entry.key += delta;
        }
    }

    /// Iterate entries as `(key, value)` in heap-array order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (f64, &P)> {
        self.heap.iter().map(|e| (e.key, &e.value))
    }

    /// Drop every entry.  The insertion sequence keeps counting.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    // ── Heap maintenance ──────────────────────────────────────────────────

    /// Move the entry at `i` towards the root; returns its final index.
    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.heap[i].precedes(&self.heap[parent]) {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left  = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }

    /// `true` if every parent precedes both of its children.
    #[cfg(test)]
    pub(crate) fn is_heap_ordered(&self) -> bool {
        (1..self.heap.len()).all(|i| !self.heap[i].precedes(&self.heap[(i - 1) / 2]))
    }
}

impl<P: PartialEq> PriorityQueue<P> {
    /// Key of the first entry holding `value`, if any.
    pub fn find(&self, value: &P) -> Option<f64> {
        self.heap.iter().find(|e| &e.value == value).map(|e| e.key)
    }

    /// Remove the first entry holding `value`.  Returns whether one existed.
    pub fn remove(&mut self, value: &P) -> bool {
        let Some(idx) = self.heap.iter().position(|e| &e.value == value) else {
            return false;
        };
        self.heap.swap_remove(idx);
        if idx < self.heap.len() {
            // The former last leaf is unrelated to the hole's subtree, so it
            // may need to go either way.
            let idx = self.sift_up(idx);
            self.sift_down(idx);
        }
        true
    }
}
