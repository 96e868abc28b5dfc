//! Bounded top-N selection
//!
//! A fixed-capacity min-heap that keeps the `capacity` highest-priority keys
//! offered to it. The heap is pre-filled with default-priority placeholders
//! so it always has a minimum to compare against.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap slot; `Ord` is reversed so `BinaryHeap` pops the minimum
#[derive(Debug)]
struct Slot<K, P> {
    priority: P,
    arrival: u64,
    key: K,
}

impl<K, P: Ord> PartialEq for Slot<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K, P: Ord> Eq for Slot<K, P> {}

impl<K, P: Ord> Ord for Slot<K, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // lowest priority on top; among equals the latest arrival goes first
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.arrival.cmp(&other.arrival))
    }
}

impl<K, P: Ord> PartialOrd for Slot<K, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
pub struct TopN<K, P> {
    heap: BinaryHeap<Slot<K, P>>,
    arrivals: u64,
}

impl<K: Default, P: Ord + Copy + Default> TopN<K, P> {
    pub fn new(capacity: usize) -> Self {
        let mut heap = BinaryHeap::with_capacity(capacity);
        for arrival in 0..capacity as u64 {
            heap.push(Slot {
                priority: P::default(),
                arrival,
                key: K::default(),
            });
        }
        Self {
            heap,
            arrivals: capacity as u64,
        }
    }

    pub fn capacity(&self) -> usize {
        self.heap.len()
    }

    /// Current minimum retained priority, `None` for a zero-capacity selector
    #[inline]
    pub fn min(&self) -> Option<P> {
        self.heap.peek().map(|slot| slot.priority)
    }

    /// Offer a candidate. It replaces the current minimum only if its priority
    /// is strictly greater, so ties keep the earlier occupant. `make_key` is
    /// only called when the candidate is kept.
    #[inline]
    pub fn offer(&mut self, priority: P, make_key: impl FnOnce() -> K) -> bool {
        let Some(mut top) = self.heap.peek_mut() else {
            return false;
        };
        if priority <= top.priority {
            return false;
        }
        *top = Slot {
            priority,
            arrival: self.arrivals,
            key: make_key(),
        };
        drop(top);
        self.arrivals += 1;
        true
    }

    /// Drain into `(key, priority)` pairs, highest priority first
    pub fn into_sorted_vec(self) -> Vec<(K, P)> {
        // ascending by Slot order == descending by priority
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|slot| (slot.key, slot.priority))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(top: TopN<&'static str, u64>) -> Vec<(&'static str, u64)> {
        top.into_sorted_vec()
    }

    #[test]
    fn test_placeholders() {
        let top: TopN<&str, u64> = TopN::new(3);
        assert_eq!(top.capacity(), 3);
        assert_eq!(top.min(), Some(0));
        assert_eq!(sorted(top), vec![("", 0), ("", 0), ("", 0)]);
    }

    #[test]
    fn test_keeps_highest() {
        let mut top = TopN::new(2);
        for (key, p) in [("a", 5), ("b", 1), ("c", 9), ("d", 3), ("e", 7)] {
            top.offer(p, || key);
        }
        assert_eq!(top.min(), Some(7));
        assert_eq!(sorted(top), vec![("c", 9), ("e", 7)]);
    }

    #[test]
    fn test_zero_priority_never_enters() {
        let mut top = TopN::new(2);
        assert!(!top.offer(0, || "zero"));
        assert!(top.offer(1, || "one"));
        assert_eq!(sorted(top), vec![("one", 1), ("", 0)]);
    }

    #[test]
    fn test_tie_loses_to_first_arrival() {
        let mut top = TopN::new(1);
        assert!(top.offer(4, || "first"));
        assert!(!top.offer(4, || "second"));
        assert_eq!(sorted(top), vec![("first", 4)]);
    }

    #[test]
    fn test_equal_priorities_keep_arrival_order() {
        let mut top = TopN::new(3);
        top.offer(2, || "x");
        top.offer(2, || "y");
        top.offer(5, || "z");
        assert_eq!(sorted(top), vec![("z", 5), ("x", 2), ("y", 2)]);
    }

    #[test]
    fn test_key_built_only_when_kept() {
        let mut top = TopN::new(1);
        top.offer(3, || "kept");
        let mut called = false;
        top.offer(2, || {
            called = true;
            "dropped"
        });
        assert!(!called);
    }

    #[test]
    fn test_zero_capacity() {
        let mut top: TopN<&str, u64> = TopN::new(0);
        assert_eq!(top.min(), None);
        assert!(!top.offer(100, || "x"));
        assert!(sorted(top).is_empty());
    }
}
