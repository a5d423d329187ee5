//! Elements that an [`IndexedMinHeap`](crate::indexed::IndexedMinHeap) can order
//!
//! The heap never owns its elements. They live in a caller-owned node table
//! (any `&mut [E]`), and the heap only stores their positions in that table.
//! Each element carries one bookkeeping field, its current slot in the heap's
//! backing sequence, which the heap reads and writes through [`HeapElement`].

/// Position of an element in the caller's node table.
///
/// This is the element's identity as far as the heap is concerned.
pub type NodeIndex = usize;

/// Slot value for an element that has never been added to a heap.
pub const UNSET_SLOT: usize = usize::MAX;

/// Capability trait for elements stored in an indexed heap.
///
/// Implementors expose an ordering key and a mutable slot field. The slot
/// field belongs to the heap: application code should never read it for
/// anything other than diagnostics, and must not write it.
///
/// # Example
///
/// ```rust
/// use rust_indexed_heap::element::HeapElement;
///
/// struct Job {
///     deadline: u64,
///     slot: usize,
/// }
///
/// impl HeapElement for Job {
///     type Key = u64;
///
///     fn key(&self) -> &u64 {
///         &self.deadline
///     }
///
///     fn heap_slot(&self) -> usize {
///         self.slot
///     }
///
///     fn set_heap_slot(&mut self, slot: usize) {
///         self.slot = slot;
///     }
/// }
/// ```
pub trait HeapElement {
    /// The ordering key; smaller keys pop first
    type Key: Ord + ?Sized;

    /// Returns the current ordering key
    fn key(&self) -> &Self::Key;

    /// Returns the slot this element occupied when the heap last moved it
    fn heap_slot(&self) -> usize;

    /// Records the slot the heap just moved this element into
    fn set_heap_slot(&mut self, slot: usize);
}

/// A general-purpose heap element: a key plus the slot field.
///
/// Useful when the node table only needs to hold keys, or as a building
/// block inside a larger node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapNode<K> {
    /// The ordering key. Lower it in place, then call `decrease_key`.
    pub key: K,
    slot: usize,
}

impl<K> HeapNode<K> {
    /// Creates an element with the given key and an unset slot
    pub fn new(key: K) -> Self {
        HeapNode {
            key,
            slot: UNSET_SLOT,
        }
    }

    /// Consumes the node, returning its key
    pub fn into_key(self) -> K {
        self.key
    }
}

impl<K: Ord> HeapElement for HeapNode<K> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }

    fn heap_slot(&self) -> usize {
        self.slot
    }

    fn set_heap_slot(&mut self, slot: usize) {
        self.slot = slot;
    }
}

impl<K> From<K> for HeapNode<K> {
    fn from(key: K) -> Self {
        HeapNode::new(key)
    }
}

/// Builds a node table of [`HeapNode`]s from a sequence of keys.
pub fn node_table<K, I>(keys: I) -> Vec<HeapNode<K>>
where
    I: IntoIterator<Item = K>,
{
    keys.into_iter().map(HeapNode::new).collect()
}
