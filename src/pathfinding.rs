//! Dijkstra's and A* searches built on `decrease_key`
//!
//! Two styles of search are provided:
//!
//! - [`dijkstra`], [`astar`] and [`PathFinderBuilder`] explore an implicit
//!   graph from a start state, discovering nodes lazily. Node states are mapped
//!   to table indices with a fast hash map (FxHash) and only those indices are
//!   stored in the heap, which can be any [`DecreaseKeyHeap`].
//! - [`shortest_paths`] runs over an explicit [`Graph`] whose nodes are already
//!   numbered. Every node starts at [`Distance::Unreached`], the whole table is
//!   bulk-loaded into an [`IndexedMinHeap`] in O(n), and each improvement is
//!   written into the node before calling `decrease_key`.
//!
//! Note: Dijkstra and A* are the same algorithm - A* just adds a heuristic to
//! guide the search. Dijkstra is A* with h(n) = 0.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::pathfinding::{SearchNode, dijkstra};
//! use rust_indexed_heap::keyed::KeyedHeap;
//!
//! // Node carries its goal coordinates
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, ..self.clone() }, 1),
//!             (GridPos { x: self.x - 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y + 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y - 1, ..self.clone() }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//!
//! let (path, cost) = dijkstra::<_, KeyedHeap<_, _>>(&start).unwrap();
//! assert_eq!(cost, 4); // Manhattan distance
//! assert_eq!(path.len(), 5);
//! ```

use crate::element::{HeapElement, NodeIndex, UNSET_SLOT};
use crate::error::HeapError;
use crate::indexed::IndexedMinHeap;
use crate::traits::DecreaseKeyHeap;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` supplies the zero cost of a start node.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate successors and to check
/// whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Trait for nodes that can provide a heuristic estimate for A* search.
///
/// The heuristic must be admissible (never overestimate the true cost)
/// for A* to find optimal paths.
pub trait AStarNode: SearchNode {
    /// Returns a heuristic estimate of the cost from this node to any goal.
    fn heuristic(&self) -> Self::Cost;
}

/// A wrapper for costs in the heap that orders by f-score.
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// The f-score: g + h (where h=0 for Dijkstra)
    pub f_score: C,
    /// The actual cost from start (g-score)
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

/// Metadata stored for each discovered node during a lazy search.
struct NodeEntry<N: SearchNode, H> {
    node: N,
    /// Cost from start to this node (g-score)
    g_score: N::Cost,
    /// Handle into the heap (if still in open set)
    handle: Option<H>,
    /// Previous node in the path (for reconstruction)
    came_from: Option<NodeIndex>,
    /// Whether this node has been fully processed
    closed: bool,
}

/// Node table of a lazy search: discovered states plus a state-to-index map.
struct PathFinder<N: SearchNode, H> {
    nodes: Vec<NodeEntry<N, H>>,
    state_to_index: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode, H> PathFinder<N, H> {
    fn new() -> Self {
        PathFinder {
            nodes: Vec::new(),
            state_to_index: FxHashMap::default(),
        }
    }

    /// Gets or creates an index for a node state.
    fn get_or_create_index(&mut self, node: N, g_score: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.state_to_index.get(&node) {
            return (index, false);
        }
        let index = self.nodes.len();
        self.state_to_index.insert(node.clone(), index);
        self.nodes.push(NodeEntry {
            node,
            g_score,
            handle: None,
            came_from: None,
            closed: false,
        });
        (index, true)
    }

    /// Reconstructs the path from start to the given node index.
    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.nodes[current].node.clone()];
        while let Some(prev) = self.nodes[current].came_from {
            path.push(self.nodes[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Limits applied to a lazy search
#[derive(Debug, Clone, Copy)]
struct SearchLimits<C> {
    max_cost: Option<C>,
    max_nodes: Option<usize>,
}

impl<C> Default for SearchLimits<C> {
    fn default() -> Self {
        SearchLimits {
            max_cost: None,
            max_nodes: None,
        }
    }
}

/// Runs Dijkstra's algorithm from the start node until `is_goal()` returns true.
///
/// # Returns
/// - `Some((path, cost))` if a path is found; the path includes both ends
/// - `None` if no path exists
///
/// # Example
/// ```rust
/// use rust_indexed_heap::pathfinding::{SearchNode, dijkstra};
/// use rust_indexed_heap::keyed::KeyedHeap;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// struct Node {
///     value: i32,
///     goal: i32,
/// }
///
/// impl SearchNode for Node {
///     type Cost = u32;
///
///     fn successors(&self) -> Vec<(Self, u32)> {
///         if self.value < 100 {
///             vec![(Node { value: self.value + 1, goal: self.goal }, 1)]
///         } else {
///             vec![]
///         }
///     }
///
///     fn is_goal(&self) -> bool {
///         self.value == self.goal
///     }
/// }
///
/// let start = Node { value: 0, goal: 5 };
/// let (_, cost) = dijkstra::<_, KeyedHeap<_, _>>(&start).unwrap();
/// assert_eq!(cost, 5);
/// ```
pub fn dijkstra<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    search_impl::<N, H>(start, |_| N::Cost::default(), SearchLimits::default())
}

/// Runs A* search from the start node until `is_goal()` returns true.
///
/// Uses the node's `heuristic()` method to guide the search.
pub fn astar<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: AStarNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    search_impl::<N, H>(start, |n| n.heuristic(), SearchLimits::default())
}

/// Builder for lazy searches with a cost budget or a node budget.
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    limits: SearchLimits<N::Cost>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            limits: SearchLimits::default(),
        }
    }

    /// Sets the maximum path cost to explore.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.limits.max_cost = Some(cost);
        self
    }

    /// Sets the maximum number of nodes to expand.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.limits.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured limits.
    pub fn dijkstra<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        search_impl::<N, H>(&self.start, |_| N::Cost::default(), self.limits)
    }

    /// Runs A* search with the configured limits.
    pub fn astar<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
        H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        search_impl::<N, H>(&self.start, |n| n.heuristic(), self.limits)
    }
}

fn search_impl<N, H>(
    start: &N,
    heuristic: impl Fn(&N) -> N::Cost,
    limits: SearchLimits<N::Cost>,
) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let mut heap = H::new();
    let mut finder: PathFinder<N, H::Handle> = PathFinder::new();
    let mut expanded = 0usize;

    let zero = N::Cost::default();
    let (start_index, _) = finder.get_or_create_index(start.clone(), zero);
    let priority = PriorityCost {
        f_score: heuristic(start),
        g_score: zero,
    };
    finder.nodes[start_index].handle = Some(heap.push_with_handle(priority, start_index));

    while let Some((priority, current_index)) = heap.pop() {
        if limits.max_nodes.is_some_and(|max| expanded >= max) {
            return None;
        }
        expanded += 1;

        let current_entry = &mut finder.nodes[current_index];
        if current_entry.closed {
            continue;
        }
        current_entry.closed = true;
        current_entry.handle = None;

        let current_node = current_entry.node.clone();
        let current_g = priority.g_score;

        if current_node.is_goal() {
            return Some((finder.reconstruct_path(current_index), current_g));
        }

        for (neighbor, edge_cost) in current_node.successors() {
            let tentative_g = current_g + edge_cost;
            if limits.max_cost.is_some_and(|max| tentative_g > max) {
                continue;
            }
            let new_priority = PriorityCost {
                f_score: tentative_g + heuristic(&neighbor),
                g_score: tentative_g,
            };

            let (neighbor_index, is_new) = finder.get_or_create_index(neighbor, tentative_g);
            let neighbor_entry = &mut finder.nodes[neighbor_index];

            if neighbor_entry.closed {
                continue;
            }

            if is_new {
                neighbor_entry.came_from = Some(current_index);
                neighbor_entry.handle = Some(heap.push_with_handle(new_priority, neighbor_index));
            } else if tentative_g < neighbor_entry.g_score {
                neighbor_entry.g_score = tentative_g;
                neighbor_entry.came_from = Some(current_index);

                if let Some(handle) = &neighbor_entry.handle {
                    let decreased = heap.decrease_key(handle, new_priority);
                    debug_assert!(decreased.is_ok(), "open node lost its heap entry");
                }
            }
        }
    }

    None
}

/// An explicit graph whose nodes are numbered `0..node_count()`.
pub trait Graph {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Appends the outgoing edges of `node` to `edges` as `(target, weight)`
    fn successors(&self, node: NodeIndex, edges: &mut Vec<(NodeIndex, Self::Cost)>);
}

/// Adjacency lists: `graph[u]` holds the `(v, weight)` edges leaving `u`.
impl<C: Cost> Graph for Vec<Vec<(NodeIndex, C)>> {
    type Cost = C;

    fn node_count(&self) -> usize {
        self.len()
    }

    fn successors(&self, node: NodeIndex, edges: &mut Vec<(NodeIndex, C)>) {
        edges.extend_from_slice(&self[node]);
    }
}

/// Best-known distance of a node during a bulk-loaded search.
///
/// `Unreached` plays the part of infinity and sorts after every reached cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance<C> {
    Reached(C),
    Unreached,
}

impl<C> Distance<C> {
    /// Returns the cost if the node was reached
    pub fn reached(self) -> Option<C> {
        match self {
            Distance::Reached(cost) => Some(cost),
            Distance::Unreached => None,
        }
    }
}

/// Node table entry of a bulk-loaded search
#[derive(Debug, Clone)]
struct SearchSlot<C> {
    distance: Distance<C>,
    came_from: Option<NodeIndex>,
    slot: usize,
}

impl<C: Ord> HeapElement for SearchSlot<C> {
    type Key = Distance<C>;

    fn key(&self) -> &Distance<C> {
        &self.distance
    }

    fn heap_slot(&self) -> usize {
        self.slot
    }

    fn set_heap_slot(&mut self, slot: usize) {
        self.slot = slot;
    }
}

/// Result of [`shortest_paths`]: distances and predecessors for every node.
#[derive(Debug, Clone)]
pub struct ShortestPaths<C> {
    table: Vec<SearchSlot<C>>,
}

impl<C: Copy> ShortestPaths<C> {
    /// Shortest distance from the nearest source, or `None` if unreachable
    pub fn distance(&self, node: NodeIndex) -> Option<C> {
        self.table.get(node)?.distance.reached()
    }

    /// Predecessor of `node` on its shortest path
    pub fn predecessor(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.table.get(node)?.came_from
    }

    /// Nodes of the shortest path from a source to `node`, both ends included
    pub fn path_to(&self, node: NodeIndex) -> Option<Vec<NodeIndex>> {
        self.distance(node)?;
        let mut path = vec![node];
        let mut current = node;
        while let Some(prev) = self.table[current].came_from {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Number of nodes in the searched graph
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the searched graph had no nodes
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Single- or multi-source Dijkstra over an explicit graph.
///
/// All nodes are loaded into the heap up front with an unreached distance
/// (sources at zero). The minimum is popped repeatedly; when a shorter path
/// to a neighbour is found, its distance is overwritten and the heap is told
/// with `decrease_key`. The search stops at the first unreached pop, since
/// everything left is unreachable.
///
/// Edge weights must not be negative.
///
/// # Errors
///
/// [`HeapError::IndexOutOfBounds`] if a source or an edge target is not a
/// node of the graph.
///
/// # Example
///
/// ```rust
/// use rust_indexed_heap::pathfinding::shortest_paths;
///
/// let graph: Vec<Vec<(usize, u32)>> = vec![
///     vec![(1, 4), (2, 1)],
///     vec![(3, 1)],
///     vec![(1, 2), (3, 5)],
///     vec![],
/// ];
/// let paths = shortest_paths(&graph, &[0]).unwrap();
/// assert_eq!(paths.distance(3), Some(4));
/// assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
/// ```
pub fn shortest_paths<G>(
    graph: &G,
    sources: &[NodeIndex],
) -> Result<ShortestPaths<G::Cost>, HeapError>
where
    G: Graph + ?Sized,
{
    let len = graph.node_count();
    let mut table: Vec<SearchSlot<G::Cost>> = (0..len)
        .map(|_| SearchSlot {
            distance: Distance::Unreached,
            came_from: None,
            slot: UNSET_SLOT,
        })
        .collect();
    for &source in sources {
        table
            .get_mut(source)
            .ok_or(HeapError::IndexOutOfBounds { index: source, len })?
            .distance = Distance::Reached(G::Cost::default());
    }

    let mut heap = IndexedMinHeap::from_table(&mut table);
    let mut edges = Vec::new();

    while let Ok(current) = heap.pop(&mut table) {
        let Distance::Reached(base) = table[current].distance else {
            break;
        };

        edges.clear();
        graph.successors(current, &mut edges);
        for &(next, weight) in &edges {
            if next >= len {
                return Err(HeapError::IndexOutOfBounds { index: next, len });
            }
            if !heap.contains(&table, next) {
                continue;
            }
            let candidate = Distance::Reached(base + weight);
            if candidate >= table[next].distance {
                continue;
            }
            table[next].distance = candidate;
            table[next].came_from = Some(current);
            heap.decrease_key(&mut table, next)?;
        }
    }

    Ok(ShortestPaths { table })
}
