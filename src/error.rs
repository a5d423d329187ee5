//! Error types for heap operations and grid searches

use crate::element::NodeIndex;
use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `pop` was called on a heap with no elements
    #[error("heap is empty")]
    EmptyHeap,
    /// The element is not tracked by the heap (already popped, or never added)
    #[error("element {index} is not tracked by the heap (stale handle)")]
    StaleHandle { index: NodeIndex },
    /// The element is already present in the heap
    #[error("element {index} is already in the heap")]
    DuplicateElement { index: NodeIndex },
    /// The index does not address an element of the node table
    #[error("index {index} is out of bounds for a node table of {len} elements")]
    IndexOutOfBounds { index: NodeIndex, len: usize },
    /// The new priority is not less than the current priority
    #[error("new priority is not less than current priority")]
    PriorityNotDecreased,
}

/// Error type for parsing and searching a [`WeightGrid`](crate::grid::WeightGrid)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid digit {found:?} at row {row}, column {col}")]
    InvalidDigit { row: usize, col: usize, found: char },
    #[error("invalid run bounds {min_run}..={max_run}")]
    InvalidRun { min_run: usize, max_run: usize },
    #[error(transparent)]
    Heap(#[from] HeapError),
}
