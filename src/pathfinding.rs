//! Dijkstra's and A* pathfinding driven by the ternary heap's decrease-priority
//!
//! This module provides Dijkstra's shortest path algorithm and A* search over
//! implicit graphs. Every discovered node enters the open set exactly once; when
//! a cheaper route to a queued node is found, its heap element is moved up with
//! [`TernaryHeap::decrease_priority`] instead of being pushed again.
//!
//! # Design
//!
//! Only lightweight indices are stored in the heap. A fast hash map (FxHash)
//! maps node states to their index, and a dense table holds per-node metadata:
//! best known cost, predecessor, and the node's heap element while it is open.
//!
//! Dijkstra is A* with h(n) = 0.
//!
//! # Example
//!
//! ```rust
//! use dynamic_ternary_heap::pathfinding::{dijkstra, SearchNode};
//!
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
//! let (path, cost) = dijkstra(&start).unwrap();
//! assert_eq!(cost, 4);
//! assert_eq!(path.len(), 5);
//! ```

use crate::element::Entry;
use crate::ternary::TernaryHeap;
use crate::traits::ElementRef;
use log::{debug, warn};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` must be the zero cost.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate successors and to decide
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

/// Heap priority for an open node, ordered by f-score only.
///
/// Lower costs have higher priority (min-heap behavior).
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

/// Index of a discovered node in the pathfinder's table.
type NodeIndex = usize;

/// Heap element for an open node.
type OpenElement<C> = Entry<NodeIndex, PriorityCost<C>>;

/// Metadata stored for each discovered node.
struct NodeEntry<N: SearchNode> {
    node: N,
    /// Best known cost from start (g-score)
    g_score: N::Cost,
    /// Heap element while the node is in the open set
    element: Option<ElementRef<OpenElement<N::Cost>>>,
    /// Previous node on the best known path
    came_from: Option<NodeIndex>,
    /// Whether this node has been settled
    closed: bool,
}

/// Optional bounds on a search.
#[derive(Clone, Copy)]
struct Limits<C> {
    max_cost: Option<C>,
    max_nodes: Option<usize>,
}

impl<C> Limits<C> {
    fn none() -> Self {
        Limits {
            max_cost: None,
            max_nodes: None,
        }
    }
}

/// Open set plus discovered-node table for one search.
struct PathFinder<N: SearchNode> {
    nodes: Vec<NodeEntry<N>>,
    state_to_index: FxHashMap<N, NodeIndex>,
    open: TernaryHeap<OpenElement<N::Cost>>,
}

impl<N: SearchNode> PathFinder<N> {
    fn new() -> Self {
        PathFinder {
            nodes: Vec::new(),
            state_to_index: FxHashMap::default(),
            open: TernaryHeap::new(),
        }
    }

    /// Records a newly discovered node and queues it.
    fn open_new(&mut self, node: N, priority: PriorityCost<N::Cost>, came_from: Option<NodeIndex>) {
        let index = self.nodes.len();
        self.state_to_index.insert(node.clone(), index);
        let element = self.open.push(priority, index);
        self.nodes.push(NodeEntry {
            node,
            g_score: priority.g_score,
            element: Some(element),
            came_from,
            closed: false,
        });
    }

    /// Offers a path to `node` through `from` with cost `g_score`.
    fn relax(&mut self, from: NodeIndex, node: N, g_score: N::Cost, h: N::Cost) {
        let priority = PriorityCost {
            f_score: g_score + h,
            g_score,
        };

        let Some(&index) = self.state_to_index.get(&node) else {
            self.open_new(node, priority, Some(from));
            return;
        };

        let entry = &mut self.nodes[index];
        if entry.closed || g_score >= entry.g_score {
            return;
        }

        // The table only follows the heap once the decrease is accepted.
        if let Some(element) = &entry.element {
            if let Err(err) = self.open.decrease_priority(element, priority) {
                warn!("decrease_priority failed for open node {}: {}", index, err);
                return;
            }
        }
        entry.g_score = g_score;
        entry.came_from = Some(from);
    }

    /// Removes the cheapest open node and marks it settled.
    fn settle_next(&mut self) -> Option<(NodeIndex, N::Cost)> {
        let element = self.open.extract_minimum().ok()?;
        let (index, g_score) = {
            let inner = element.borrow();
            (*inner.item(), inner.priority().g_score)
        };

        let entry = &mut self.nodes[index];
        entry.closed = true;
        entry.element = None;
        Some((index, g_score))
    }

    /// Reconstructs the path from start to the given node index.
    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = Vec::new();

        loop {
            let entry = &self.nodes[current];
            path.push(entry.node.clone());

            match entry.came_from {
                Some(prev) => current = prev,
                None => break,
            }
        }

        path.reverse();
        path
    }
}

/// Shared search loop.
///
/// `settle` is called once per settled node with its final cost and returns
/// true to stop the search there.
fn search_impl<N, H, S>(
    start: &N,
    limits: Limits<N::Cost>,
    heuristic: H,
    mut settle: S,
) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: Fn(&N) -> N::Cost,
    S: FnMut(&N, N::Cost) -> bool,
{
    let mut finder = PathFinder::new();
    let priority = PriorityCost {
        f_score: heuristic(start),
        g_score: N::Cost::default(),
    };
    finder.open_new(start.clone(), priority, None);

    let mut settled = 0usize;
    while let Some((current_index, current_g)) = finder.settle_next() {
        if limits.max_nodes.is_some_and(|max| settled >= max) {
            debug!("search stopped at node limit after settling {} nodes", settled);
            return None;
        }
        settled += 1;

        let current_node = finder.nodes[current_index].node.clone();
        if settle(&current_node, current_g) {
            debug!(
                "search reached goal after settling {} of {} discovered nodes",
                settled,
                finder.nodes.len()
            );
            return Some((finder.reconstruct_path(current_index), current_g));
        }

        for (neighbor, edge_cost) in current_node.successors() {
            let tentative_g = current_g + edge_cost;
            if limits.max_cost.is_some_and(|max| tentative_g > max) {
                continue;
            }
            let h = heuristic(&neighbor);
            finder.relax(current_index, neighbor, tentative_g, h);
        }
    }

    debug!("search exhausted after settling {} nodes", settled);
    None
}

/// Runs Dijkstra's algorithm from the start node until `is_goal()` returns true.
///
/// # Returns
/// - `Some((path, cost))` with the path from start to goal inclusive
/// - `None` if no goal is reachable
///
/// # Example
/// ```rust
/// use dynamic_ternary_heap::pathfinding::{SearchNode, dijkstra};
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
/// let (path, cost) = dijkstra(&Node { value: 0, goal: 5 }).unwrap();
/// assert_eq!(cost, 5);
/// assert_eq!(path.len(), 6);
/// ```
pub fn dijkstra<N: SearchNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    search_impl(start, Limits::none(), |_| N::Cost::default(), |n, _| n.is_goal())
}

/// Runs A* search from the start node until `is_goal()` returns true.
///
/// Uses the node's `heuristic()` method to guide the search. Settled nodes are
/// never reopened, so the heuristic should be consistent as well as admissible.
pub fn astar<N: AStarNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    search_impl(start, Limits::none(), |n| n.heuristic(), |n, _| n.is_goal())
}

/// Builder for pathfinding queries with search limits.
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    limits: Limits<N::Cost>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            limits: Limits::none(),
        }
    }

    /// Sets the maximum path cost to explore.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.limits.max_cost = Some(cost);
        self
    }

    /// Sets the maximum number of nodes to settle.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.limits.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured limits.
    pub fn dijkstra(self) -> Option<(Vec<N>, N::Cost)> {
        search_impl(
            &self.start,
            self.limits,
            |_| N::Cost::default(),
            |n, _| n.is_goal(),
        )
    }

    /// Runs A* search with the configured limits.
    pub fn astar(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
    {
        search_impl(&self.start, self.limits, |n| n.heuristic(), |n, _| n.is_goal())
    }
}

/// Returns all nodes reachable from the start within a given cost budget.
///
/// Nodes are listed in the order they are settled, so costs are non-decreasing.
/// `is_goal()` is not consulted.
pub fn reachable_within<N: SearchNode>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)> {
    let mut result = Vec::new();
    let limits = Limits {
        max_cost: Some(max_cost),
        max_nodes: None,
    };

    search_impl(
        start,
        limits,
        |_| N::Cost::default(),
        |n, cost| {
            result.push((n.clone(), cost));
            false
        },
    );

    result
}
