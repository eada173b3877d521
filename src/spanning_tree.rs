//! Prim's minimum spanning tree driven by the ternary heap's decrease-priority
//!
//! Prim grows a tree from a root vertex, repeatedly attaching the cheapest
//! vertex outside the tree. Each vertex outside the tree sits in the heap keyed
//! by the lightest edge connecting it to the tree so far; finding a lighter edge
//! lowers that key in place.
//!
//! # Time Complexity
//!
//! O((V + E) log₃ V) for a graph with V vertices and E edges.
//!
//! # Example
//!
//! ```rust
//! use dynamic_ternary_heap::spanning_tree::{prim, UndirectedGraph};
//!
//! let mut graph = UndirectedGraph::new(4);
//! graph.add_edge(0, 1, 4u32);
//! graph.add_edge(0, 2, 1);
//! graph.add_edge(2, 1, 2);
//! graph.add_edge(1, 3, 5);
//!
//! let tree = prim(&graph, 0);
//! assert_eq!(tree.total_weight, 8);
//! assert_eq!(tree.edges, vec![(0, 2, 1), (2, 1, 2), (1, 3, 5)]);
//! ```

use crate::element::Entry;
use crate::pathfinding::Cost;
use crate::ternary::TernaryHeap;
use crate::traits::ElementRef;
use log::{debug, warn};

/// Undirected graph with weighted edges over vertices `0..vertex_count`
#[derive(Debug, Clone)]
pub struct UndirectedGraph<C> {
    adjacency: Vec<Vec<(usize, C)>>,
}

impl<C: Copy> UndirectedGraph<C> {
    /// Creates a graph with `vertex_count` isolated vertices
    pub fn new(vertex_count: usize) -> Self {
        UndirectedGraph {
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    /// Returns the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds an edge between `u` and `v`
    ///
    /// Parallel edges and self-loops are accepted; Prim ignores the heavier
    /// parallel edges and every self-loop.
    ///
    /// # Panics
    ///
    /// Panics if `u` or `v` is not a vertex of the graph.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: C) {
        let count = self.vertex_count();
        assert!(
            u < count && v < count,
            "edge ({}, {}) out of range for {} vertices",
            u,
            v,
            count
        );
        self.adjacency[u].push((v, weight));
        if u != v {
            self.adjacency[v].push((u, weight));
        }
    }

    /// Returns the neighbors of `v` with the connecting edge weights
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a vertex of the graph.
    pub fn neighbors(&self, v: usize) -> &[(usize, C)] {
        &self.adjacency[v]
    }
}

/// A spanning tree of one connected component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningTree<C> {
    /// `(parent, child, weight)` in the order children joined the tree
    pub edges: Vec<(usize, usize, C)>,
    /// Sum of all edge weights
    pub total_weight: C,
}

impl<C> SpanningTree<C> {
    /// Returns the number of vertices spanned, including the root
    pub fn vertices(&self) -> usize {
        self.edges.len() + 1
    }
}

/// Per-vertex state during Prim's algorithm
enum VertexState<C: Cost> {
    /// Not yet reached by any edge
    Unseen,
    /// Queued, keyed by the lightest known edge from the tree
    Frontier {
        element: ElementRef<Entry<usize, C>>,
        parent: usize,
    },
    /// Part of the tree
    Tree,
}

/// Computes a minimum spanning tree of the component containing `root`
///
/// Vertices not connected to `root` are not part of the result.
///
/// # Panics
///
/// Panics if `root` is not a vertex of the graph.
pub fn prim<C: Cost>(graph: &UndirectedGraph<C>, root: usize) -> SpanningTree<C> {
    assert!(
        root < graph.vertex_count(),
        "root {} out of range for {} vertices",
        root,
        graph.vertex_count()
    );

    let mut state: Vec<VertexState<C>> = (0..graph.vertex_count())
        .map(|_| VertexState::Unseen)
        .collect();
    let mut heap = TernaryHeap::new();
    let mut tree = SpanningTree {
        edges: Vec::new(),
        total_weight: C::default(),
    };

    let root_element = heap.push(C::default(), root);
    state[root] = VertexState::Frontier {
        element: root_element,
        parent: root,
    };

    while let Ok(element) = heap.extract_minimum() {
        let (vertex, weight) = {
            let inner = element.borrow();
            (*inner.item(), *inner.priority())
        };

        let previous = std::mem::replace(&mut state[vertex], VertexState::Tree);
        if let VertexState::Frontier { parent, .. } = previous {
            if vertex != root {
                tree.edges.push((parent, vertex, weight));
                tree.total_weight = tree.total_weight + weight;
            }
        }

        for &(neighbor, edge_weight) in graph.neighbors(vertex) {
            if matches!(state[neighbor], VertexState::Unseen) {
                let element = heap.push(edge_weight, neighbor);
                state[neighbor] = VertexState::Frontier {
                    element,
                    parent: vertex,
                };
                continue;
            }

            if let VertexState::Frontier { element, parent } = &mut state[neighbor] {
                if edge_weight >= *element.borrow().priority() {
                    continue;
                }
                match heap.decrease_priority(element, edge_weight) {
                    Ok(()) => *parent = vertex,
                    Err(err) => warn!("decrease_priority failed for vertex {}: {}", neighbor, err),
                }
            }
        }
    }

    debug!(
        "prim spanned {} vertices from root {}",
        tree.vertices(),
        root
    );
    tree
}
