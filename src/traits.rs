//! Common traits for owning heaps
//!
//! This module provides a two-tier trait hierarchy for priority queues that
//! own their `(priority, item)` pairs:
//!
//! - [`Heap`]: push/pop/peek/merge, shaped like `std::collections::BinaryHeap`
//!   but min-first
//! - [`DecreaseKeyHeap`]: adds handle-based `decrease_key`, the operation
//!   Dijkstra-style searches need
//!
//! [`IndexedMinHeap`](crate::indexed::IndexedMinHeap) sits below these traits:
//! it does not own elements, so it is used directly by code that keeps its own
//! node table. [`KeyedHeap`](crate::keyed::KeyedHeap) implements both traits on
//! top of it.

pub use crate::error::HeapError;

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use rust_indexed_heap::Heap;
/// use rust_indexed_heap::keyed::KeyedHeap;
///
/// let mut heap = KeyedHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Returns `None` when the heap is empty.
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use rust_indexed_heap::{DecreaseKeyHeap, Heap};
/// use rust_indexed_heap::keyed::KeyedHeap;
///
/// let mut heap = KeyedHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Decreases the priority of an element identified by the handle
    ///
    /// # Errors
    /// - `HeapError::StaleHandle` if the element was already popped
    /// - `HeapError::PriorityNotDecreased` if the new priority is not
    ///   less than the current priority
    ///
    /// The heap is unchanged when an error is returned.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}
