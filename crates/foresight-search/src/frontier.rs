//! Open set of the search: a binary heap with lazy deletion.
//!
//! Each push gets a fresh sequence number. The position index remembers the
//! latest sequence per cell, so heap entries left behind by a relaxation are
//! recognised as stale and skipped when popped. Equal priorities pop in
//! insertion order.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use foresight_core::types::GridCoords;

use crate::node::NodeId;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    priority: f64,
    seq: u64,
    position: GridCoords,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Reversed: BinaryHeap is a max-heap and we want the smallest key first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending nodes keyed by `(priority, insertion sequence)`.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<HeapEntry>,
    pending: HashMap<GridCoords, (NodeId, u64)>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or re-key it if its position is already pending.
    pub fn push(&mut self, position: GridCoords, node: NodeId, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(position, (node, seq));
        self.heap.push(HeapEntry {
            priority,
            seq,
            position,
            node,
        });
    }

    /// Remove and return the pending node with the smallest key.
    pub fn pop(&mut self) -> Option<NodeId> {
        while let Some(entry) = self.heap.pop() {
            if let Entry::Occupied(live) = self.pending.entry(entry.position) {
                if live.get().1 == entry.seq {
                    live.remove();
                    return Some(entry.node);
                }
            }
        }
        None
    }

    /// Node pending at `position`, if any.
    pub fn get(&self, position: &GridCoords) -> Option<NodeId> {
        self.pending.get(position).map(|&(node, _)| node)
    }

    pub fn contains(&self, position: &GridCoords) -> bool {
        self.pending.contains_key(position)
    }

    /// Number of live (non-stale) entries.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i32) -> GridCoords {
        GridCoords::new(x, 0, 0)
    }

    #[test]
    fn test_pops_smallest_first() {
        let mut f = Frontier::new();
        f.push(at(0), 0, 3.0);
        f.push(at(1), 1, 1.0);
        f.push(at(2), 2, 2.0);
        assert_eq!(f.pop(), Some(1));
        assert_eq!(f.pop(), Some(2));
        assert_eq!(f.pop(), Some(0));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn test_equal_priorities_are_fifo() {
        let mut f = Frontier::new();
        for i in 0..5 {
            f.push(at(i), i as NodeId, 1.0);
        }
        let order: Vec<_> = std::iter::from_fn(|| f.pop()).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_rekey_skips_stale_entry() {
        let mut f = Frontier::new();
        f.push(at(0), 0, 5.0);
        f.push(at(1), 1, 3.0);
        f.push(at(0), 0, 1.0);
        assert_eq!(f.len(), 2);
        assert_eq!(f.pop(), Some(0));
        assert_eq!(f.pop(), Some(1));
        // The old 5.0 entry for position 0 is stale.
        assert_eq!(f.pop(), None);
        assert!(f.is_empty());
    }

    #[test]
    fn test_membership() {
        let mut f = Frontier::new();
        f.push(at(4), 9, 0.0);
        assert!(f.contains(&at(4)));
        assert_eq!(f.get(&at(4)), Some(9));
        assert_eq!(f.get(&at(3)), None);
        f.pop();
        assert!(!f.contains(&at(4)));
    }
}
