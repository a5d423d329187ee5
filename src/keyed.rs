//! Owning `(priority, item)` heap with stale-checked handles
//!
//! [`KeyedHeap`] wraps an [`IndexedMinHeap`] around its own node table. Popped
//! entries go on a free list and are reused by later pushes; every reuse bumps
//! the entry's generation, so a handle kept past its element's removal is
//! reported as [`HeapError::StaleHandle`] instead of silently aliasing a new
//! element.
//!
//! # Time Complexity
//!
//! | Operation          | Complexity   |
//! |--------------------|--------------|
//! | `push`             | O(log n)     |
//! | `pop`              | O(log n)     |
//! | `peek`             | O(1)         |
//! | `decrease_key`     | O(log n)     |
//! | `merge`            | O(n + m)     |
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::{DecreaseKeyHeap, Heap, HeapError};
//! use rust_indexed_heap::keyed::KeyedHeap;
//!
//! let mut heap = KeyedHeap::new();
//! let a = heap.push_with_handle(10, 'a');
//! heap.push(20, 'b');
//!
//! heap.decrease_key(&a, 5).unwrap();
//! assert_eq!(heap.pop(), Some((5, 'a')));
//! assert_eq!(heap.decrease_key(&a, 1), Err(HeapError::StaleHandle { index: 0 }));
//! ```

use crate::element::{HeapElement, NodeIndex, UNSET_SLOT};
use crate::error::HeapError;
use crate::indexed::IndexedMinHeap;
use crate::traits::{DecreaseKeyHeap, Handle, Heap};

/// Handle to an element of a [`KeyedHeap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyedHandle {
    index: NodeIndex,
    generation: u32,
}

impl KeyedHandle {
    /// Position of the element in the heap's entry table
    pub fn index(&self) -> NodeIndex {
        self.index
    }
}

impl Handle for KeyedHandle {}

/// One entry of the node table. Both options are `Some` while the entry is live.
#[derive(Debug, Clone)]
struct Entry<T, P> {
    priority: Option<P>,
    item: Option<T>,
    slot: usize,
    generation: u32,
}

impl<T, P: Ord> HeapElement for Entry<T, P> {
    // Vacant entries are never in the heap, so `None` sorting first is harmless
    type Key = Option<P>;

    fn key(&self) -> &Option<P> {
        &self.priority
    }

    fn heap_slot(&self) -> usize {
        self.slot
    }

    fn set_heap_slot(&mut self, slot: usize) {
        self.slot = slot;
    }
}

/// A min-heap of `(priority, item)` pairs supporting `decrease_key`
#[derive(Debug, Clone)]
pub struct KeyedHeap<T, P: Ord> {
    entries: Vec<Entry<T, P>>,
    vacant: Vec<NodeIndex>,
    heap: IndexedMinHeap,
}

impl<T, P: Ord> KeyedHeap<T, P> {
    /// Creates an empty heap able to hold `capacity` elements without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        KeyedHeap {
            entries: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            heap: IndexedMinHeap::with_capacity(capacity),
        }
    }

    /// Returns true if the handle still refers to an element in the heap
    pub fn contains(&self, handle: &KeyedHandle) -> bool {
        self.live_entry(handle).is_some()
    }

    /// Returns the current priority of the element behind `handle`
    pub fn priority(&self, handle: &KeyedHandle) -> Option<&P> {
        self.live_entry(handle)?.priority.as_ref()
    }

    /// Returns the item behind `handle`
    pub fn item(&self, handle: &KeyedHandle) -> Option<&T> {
        self.live_entry(handle)?.item.as_ref()
    }

    fn live_entry(&self, handle: &KeyedHandle) -> Option<&Entry<T, P>> {
        self.entries
            .get(handle.index)
            .filter(|entry| entry.generation == handle.generation && entry.item.is_some())
    }

    /// Stores a pair in a vacant or new entry without adding it to the heap
    fn allocate(&mut self, priority: P, item: T) -> KeyedHandle {
        let index = match self.vacant.pop() {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.priority = Some(priority);
                entry.item = Some(item);
                index
            }
            None => {
                self.entries.push(Entry {
                    priority: Some(priority),
                    item: Some(item),
                    slot: UNSET_SLOT,
                    generation: 0,
                });
                self.entries.len() - 1
            }
        };
        KeyedHandle {
            index,
            generation: self.entries[index].generation,
        }
    }
}

impl<T, P: Ord> Heap<T, P> for KeyedHeap<T, P> {
    fn new() -> Self {
        KeyedHeap {
            entries: Vec::new(),
            vacant: Vec::new(),
            heap: IndexedMinHeap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn push(&mut self, priority: P, item: T) {
        self.push_with_handle(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        let entry = &self.entries[self.heap.peek()?];
        Some((entry.priority.as_ref()?, entry.item.as_ref()?))
    }

    fn pop(&mut self) -> Option<(P, T)> {
        let index = self.heap.pop(&mut self.entries).ok()?;
        self.vacant.push(index);

        let entry = &mut self.entries[index];
        entry.generation = entry.generation.wrapping_add(1);
        entry.priority.take().zip(entry.item.take())
    }

    fn merge(&mut self, other: Self) {
        for entry in other.entries {
            if let (Some(priority), Some(item)) = (entry.priority, entry.item) {
                self.allocate(priority, item);
            }
        }

        let live: Vec<NodeIndex> = (0..self.entries.len())
            .filter(|&index| self.entries[index].item.is_some())
            .collect();
        let rebuilt = IndexedMinHeap::from_indices(&mut self.entries, live);
        debug_assert!(rebuilt.is_ok(), "live entries are distinct and in bounds");
        if let Ok(heap) = rebuilt {
            self.heap = heap;
        }
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for KeyedHeap<T, P> {
    type Handle = KeyedHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> KeyedHandle {
        let handle = self.allocate(priority, item);
        let added = self.heap.add(&mut self.entries, handle.index);
        debug_assert!(added.is_ok(), "freshly allocated entry was already tracked");
        handle
    }

    fn decrease_key(&mut self, handle: &KeyedHandle, new_priority: P) -> Result<(), HeapError> {
        let stale = HeapError::StaleHandle {
            index: handle.index,
        };
        let current = self
            .live_entry(handle)
            .and_then(|entry| entry.priority.as_ref())
            .ok_or(stale)?;
        if new_priority >= *current {
            return Err(HeapError::PriorityNotDecreased);
        }
        if !self.heap.contains(&self.entries, handle.index) {
            return Err(stale);
        }

        self.entries[handle.index].priority = Some(new_priority);
        self.heap.decrease_key(&mut self.entries, handle.index)
    }
}

impl<T, P: Ord> Default for KeyedHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}
