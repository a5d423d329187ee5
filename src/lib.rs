//! Indexed Binary Heap for Rust
//!
//! This crate provides a binary min-heap whose elements remember their own
//! slot, so a key lowered in place can be restored to heap order in O(log n)
//! with `decrease_key`. On top of it sit the searches that need exactly that
//! operation.
//!
//! # Modules
//!
//! - [`indexed`]: **IndexedMinHeap**, the heap itself, over a caller-owned node table
//! - [`element`]: the [`HeapElement`] capability trait and a generic [`HeapNode`]
//! - [`keyed`]: **KeyedHeap**, an owning `(priority, item)` heap with stale-checked handles
//! - [`pathfinding`]: Dijkstra / A* over implicit graphs, bulk-loaded Dijkstra over
//!   explicit ones
//! - [`grid`]: shortest paths over a digit grid with minimum and maximum straight runs
//!
//! # Features
//!
//! - `debug-invariants`: check heap order and slot bookkeeping after every
//!   mutating operation (in builds with debug assertions). Run the suite
//!   with it enabled via `cargo test --features debug-invariants`.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::{HeapError, HeapNode, IndexedMinHeap};
//!
//! let mut nodes: Vec<HeapNode<u32>> = vec![5, 3, 8].into_iter().map(HeapNode::new).collect();
//! let mut heap = IndexedMinHeap::from_table(&mut nodes);
//!
//! nodes[2].key = 1;
//! heap.decrease_key(&mut nodes, 2).unwrap();
//!
//! assert_eq!(heap.pop(&mut nodes), Ok(2));
//! assert_eq!(heap.pop(&mut nodes), Ok(1));
//! assert_eq!(heap.pop(&mut nodes), Ok(0));
//! assert_eq!(heap.pop(&mut nodes), Err(HeapError::EmptyHeap));
//! ```

pub mod element;
pub mod error;
pub mod grid;
pub mod indexed;
pub mod keyed;
pub mod pathfinding;
pub mod traits;

// Re-export the main types for convenience
pub use element::{HeapElement, HeapNode, NodeIndex};
pub use error::{GridError, HeapError};
pub use indexed::IndexedMinHeap;
pub use traits::{DecreaseKeyHeap, Heap};
