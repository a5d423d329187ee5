//! Indexed binary min-heap with O(log n) `decrease_key`
//!
//! An ordinary binary heap cannot find an element whose key changed without
//! scanning its whole array. This heap avoids the scan by having every element
//! remember its own slot: whenever the heap moves an element it writes the new
//! slot back through [`HeapElement::set_heap_slot`], so `decrease_key` can jump
//! straight to the element and sift it up.
//!
//! The elements stay in a node table owned by the caller. The heap stores
//! [`NodeIndex`] values into that table and every operation receives the table
//! explicitly, so identity is the table index rather than an address.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity |
//! |----------------|------------|
//! | `from_indices` | O(n)       |
//! | `add`          | O(log n)   |
//! | `pop`          | O(log n)   |
//! | `decrease_key` | O(log n)   |
//! | `peek`, `len`  | O(1)       |
//! | `contains`     | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::element::node_table;
//! use rust_indexed_heap::indexed::IndexedMinHeap;
//!
//! let mut nodes = node_table([10, 20, 30]);
//! let mut heap = IndexedMinHeap::from_table(&mut nodes);
//!
//! // A cheaper path to node 2 was found
//! nodes[2].key = 5;
//! heap.decrease_key(&mut nodes, 2).unwrap();
//!
//! assert_eq!(heap.pop(&mut nodes), Ok(2));
//! assert_eq!(heap.pop(&mut nodes), Ok(0));
//! assert_eq!(heap.pop(&mut nodes), Ok(1));
//! assert!(heap.pop(&mut nodes).is_err());
//! ```
//!
//! # Panics
//!
//! Every method taking a node table assumes it is the same table the heap's
//! indices were validated against. Passing a shorter table panics on the
//! out-of-range access.

use crate::element::{HeapElement, NodeIndex};
use crate::error::HeapError;

/// A binary min-heap over indices into a caller-owned node table.
///
/// Ordering is decided with the strict `<` of the elements' keys only. Equal
/// keys never swap, and no ordering between equal keys is guaranteed across
/// pops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedMinHeap {
    /// Backing sequence: `slots[i]` is the node index occupying slot `i`
    slots: Vec<NodeIndex>,
}

impl IndexedMinHeap {
    /// Creates a new empty heap
    pub fn new() -> Self {
        IndexedMinHeap { slots: Vec::new() }
    }

    /// Creates an empty heap able to hold `capacity` elements without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        IndexedMinHeap {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Builds a heap from an initial sequence of node indices in O(n).
    ///
    /// The sequence becomes the backing storage and is put into heap order by
    /// a bottom-up heapify pass, after which every element's slot field is
    /// assigned.
    ///
    /// # Errors
    ///
    /// - [`HeapError::IndexOutOfBounds`] if an index does not address `nodes`
    /// - [`HeapError::DuplicateElement`] if an index appears more than once
    ///
    /// Nothing in `nodes` is modified when an error is returned.
    pub fn from_indices<E: HeapElement>(
        nodes: &mut [E],
        indices: Vec<NodeIndex>,
    ) -> Result<Self, HeapError> {
        let len = nodes.len();
        let mut seen = vec![false; len];
        for &index in &indices {
            if index >= len {
                return Err(HeapError::IndexOutOfBounds { index, len });
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(HeapError::DuplicateElement { index });
            }
        }

        let mut heap = IndexedMinHeap { slots: indices };
        heap.heapify(nodes);
        Ok(heap)
    }

    /// Builds a heap holding every element of `nodes` in O(n).
    pub fn from_table<E: HeapElement>(nodes: &mut [E]) -> Self {
        let mut heap = IndexedMinHeap {
            slots: (0..nodes.len()).collect(),
        };
        heap.heapify(nodes);
        heap
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the index of the minimum element without removing it
    pub fn peek(&self) -> Option<NodeIndex> {
        self.slots.first().copied()
    }

    /// Returns the index occupying a raw backing-sequence slot.
    ///
    /// Only slot 0 has a meaning for priority ordering; this is meant for
    /// diagnostics.
    pub fn get(&self, slot: usize) -> Option<NodeIndex> {
        self.slots.get(slot).copied()
    }

    /// Returns the raw backing sequence
    pub fn as_slice(&self) -> &[NodeIndex] {
        &self.slots
    }

    /// Returns true if the element at `index` is currently tracked by this heap
    pub fn contains<E: HeapElement>(&self, nodes: &[E], index: NodeIndex) -> bool {
        self.slot_of(nodes, index).is_ok()
    }

    /// Adds the element at `index` to the heap.
    ///
    /// # Errors
    ///
    /// - [`HeapError::IndexOutOfBounds`] if `index` does not address `nodes`
    /// - [`HeapError::DuplicateElement`] if the element is already in the heap
    pub fn add<E: HeapElement>(
        &mut self,
        nodes: &mut [E],
        index: NodeIndex,
    ) -> Result<(), HeapError> {
        match self.slot_of(nodes, index) {
            Ok(_) => return Err(HeapError::DuplicateElement { index }),
            Err(HeapError::StaleHandle { .. }) => {}
            Err(err) => return Err(err),
        }

        let slot = self.slots.len();
        self.slots.push(index);
        nodes[index].set_heap_slot(slot);
        self.sift_up(nodes, slot);

        self.debug_validate(nodes);
        Ok(())
    }

    /// Removes and returns the index of the minimum element.
    ///
    /// The returned element's slot field is left as it was; it must not be
    /// trusted until the element is added again.
    ///
    /// # Errors
    ///
    /// [`HeapError::EmptyHeap`] if there is nothing to pop. The heap is unchanged.
    pub fn pop<E: HeapElement>(&mut self, nodes: &mut [E]) -> Result<NodeIndex, HeapError> {
        let last = self.slots.pop().ok_or(HeapError::EmptyHeap)?;
        if self.slots.is_empty() {
            return Ok(last);
        }

        let root = std::mem::replace(&mut self.slots[0], last);
        nodes[last].set_heap_slot(0);
        self.sift_down(nodes, 0);

        self.debug_validate(nodes);
        Ok(root)
    }

    /// Restores heap order after the key of the element at `index` was lowered.
    ///
    /// The caller writes the smaller key into its element first, then calls
    /// this. Raising a key and calling `decrease_key` breaks heap order.
    ///
    /// # Errors
    ///
    /// - [`HeapError::IndexOutOfBounds`] if `index` does not address `nodes`
    /// - [`HeapError::StaleHandle`] if the element is not in the heap, e.g. it
    ///   was already popped
    ///
    /// The heap is unchanged when an error is returned.
    pub fn decrease_key<E: HeapElement>(
        &mut self,
        nodes: &mut [E],
        index: NodeIndex,
    ) -> Result<(), HeapError> {
        let slot = self.slot_of(nodes, index)?;
        self.sift_up(nodes, slot);

        self.debug_validate(nodes);
        Ok(())
    }

    /// Removes every element. The node table is not touched.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Checks heap order and slot bookkeeping for every element.
    ///
    /// Returns false if any element is smaller than its parent, or if any
    /// element's slot field disagrees with where it actually sits.
    pub fn is_valid<E: HeapElement>(&self, nodes: &[E]) -> bool {
        self.slots.iter().enumerate().all(|(slot, &index)| {
            let Some(node) = nodes.get(index) else {
                return false;
            };
            if node.heap_slot() != slot {
                return false;
            }
            slot == 0 || !(node.key() < nodes[self.slots[parent_of(slot)]].key())
        })
    }

    /// Looks up the slot of a tracked element, checking that the element's
    /// bookkeeping actually points back at it.
    fn slot_of<E: HeapElement>(&self, nodes: &[E], index: NodeIndex) -> Result<usize, HeapError> {
        let node = nodes.get(index).ok_or(HeapError::IndexOutOfBounds {
            index,
            len: nodes.len(),
        })?;
        let slot = node.heap_slot();
        if self.slots.get(slot) == Some(&index) {
            Ok(slot)
        } else {
            Err(HeapError::StaleHandle { index })
        }
    }

    fn heapify<E: HeapElement>(&mut self, nodes: &mut [E]) {
        if self.slots.len() > 1 {
            let start = parent_of(self.slots.len() - 1);
            for slot in (0..=start).rev() {
                self.sift_down(nodes, slot);
            }
        }
        for (slot, &index) in self.slots.iter().enumerate() {
            nodes[index].set_heap_slot(slot);
        }

        self.debug_validate(nodes);
    }

    /// Move the element at `slot` up while it is smaller than its parent
    fn sift_up<E: HeapElement>(&mut self, nodes: &mut [E], mut slot: usize) {
        let index = self.slots[slot];
        while slot > 0 {
            let parent = parent_of(slot);
            let parent_index = self.slots[parent];
            if !(nodes[index].key() < nodes[parent_index].key()) {
                break;
            }
            self.place(nodes, slot, parent_index);
            slot = parent;
        }
        self.place(nodes, slot, index);
    }

    /// Move the element at `slot` down while its smaller child is smaller than it
    fn sift_down<E: HeapElement>(&mut self, nodes: &mut [E], mut slot: usize) {
        let len = self.slots.len();
        let index = self.slots[slot];
        loop {
            let left = left_child_of(slot);
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && nodes[self.slots[right]].key() < nodes[self.slots[left]].key() {
                child = right;
            }

            let child_index = self.slots[child];
            if !(nodes[child_index].key() < nodes[index].key()) {
                break;
            }
            self.place(nodes, slot, child_index);
            slot = child;
        }
        self.place(nodes, slot, index);
    }

    /// Puts `index` into `slot` and records the move on the element
    #[inline]
    fn place<E: HeapElement>(&mut self, nodes: &mut [E], slot: usize, index: NodeIndex) {
        self.slots[slot] = index;
        nodes[index].set_heap_slot(slot);
    }

    #[inline]
    fn debug_validate<E: HeapElement>(&self, nodes: &[E]) {
        #[cfg(feature = "debug-invariants")]
        debug_assert!(self.is_valid(nodes), "heap order or slot bookkeeping violated");
        #[cfg(not(feature = "debug-invariants"))]
        let _ = nodes;
    }
}

#[inline]
fn parent_of(slot: usize) -> usize {
    (slot - 1) / 2
}

#[inline]
fn left_child_of(slot: usize) -> usize {
    2 * slot + 1
}
