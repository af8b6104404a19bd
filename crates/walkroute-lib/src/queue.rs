//! Open-set containers for best-first search.
//!
//! [`OpenSet`] is the contract the A* search is written against. Two
//! implementations are provided:
//!
//! - [`HeapQueue`] - `BinaryHeap` backed, O(log n) enqueue and dequeue. This
//!   is what the path finder uses.
//! - [`SortedQueue`] - ordered insertion into a `VecDeque`, O(n) enqueue and
//!   O(1) dequeue. Only worthwhile for graphs of a few dozen nodes.
//!
//! Both allow the same item to be queued several times with different
//! priorities; the smallest priority always comes out first. Among equal
//! priorities, items come out in the order they were enqueued (FIFO).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Min-priority container used as the A* open set.
pub trait OpenSet<T> {
    /// Insert `item` with `priority`. Duplicates are allowed.
    fn enqueue(&mut self, item: T, priority: f64);

    /// Remove the item with the smallest priority, or `None` when empty.
    fn dequeue(&mut self) -> Option<(T, f64)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, Q> OpenSet<T> for &mut Q
where
    Q: OpenSet<T> + ?Sized,
{
    fn enqueue(&mut self, item: T, priority: f64) {
        (**self).enqueue(item, priority);
    }

    fn dequeue(&mut self) -> Option<(T, f64)> {
        (**self).dequeue()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug)]
struct HeapEntry<T> {
    priority: FloatOrd,
    sequence: u64,
    item: T,
}

impl<T> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl<T> Eq for HeapEntry<T> {}

impl<T> Ord for HeapEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority, then
        // by insertion sequence.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary-heap open set.
#[derive(Debug)]
pub struct HeapQueue<T> {
    heap: BinaryHeap<HeapEntry<T>>,
    next_sequence: u64,
}

impl<T> HeapQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }
}

impl<T> Default for HeapQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OpenSet<T> for HeapQueue<T> {
    fn enqueue(&mut self, item: T, priority: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(HeapEntry {
            priority: FloatOrd(priority),
            sequence,
            item,
        });
    }

    fn dequeue(&mut self) -> Option<(T, f64)> {
        self.heap
            .pop()
            .map(|entry| (entry.item, entry.priority.0))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Ordered-insertion open set.
#[derive(Debug)]
pub struct SortedQueue<T> {
    items: VecDeque<(T, f64)>,
}

impl<T> SortedQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> Default for SortedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OpenSet<T> for SortedQueue<T> {
    fn enqueue(&mut self, item: T, priority: f64) {
        // First slot whose priority is strictly greater keeps equal
        // priorities in arrival order.
        let position = self
            .items
            .iter()
            .position(|(_, existing)| existing.total_cmp(&priority) == Ordering::Greater)
            .unwrap_or(self.items.len());
        self.items.insert(position, (item, priority));
    }

    fn dequeue(&mut self) -> Option<(T, f64)> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
