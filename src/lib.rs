//! Dynamic Ternary Heap for Rust
//!
//! This crate provides a min-priority queue backed by a ternary (3-ary) heap whose
//! elements can have their priority lowered in place after insertion. Every queued
//! element tracks its own position in the heap's array (its *handle*), so a caller
//! holding an element can request a decrease without the heap searching for it.
//!
//! # Contents
//!
//! - **[`TernaryHeap`]**: O(log₃ n) insert, extract-minimum and decrease-priority; O(1) minimum
//! - **[`PriorityQueueElement`]**: the capability contract for queued values
//! - **[`Entry`]**: a ready-made element pairing an item with a priority
//! - **[`pathfinding`]**: Dijkstra and A* search driven by decrease-priority
//! - **[`spanning_tree`]**: Prim's minimum spanning tree driven by decrease-priority
//!
//! # Example
//!
//! ```rust
//! use dynamic_ternary_heap::{HeapError, TernaryHeap};
//!
//! let mut heap = TernaryHeap::new();
//! let slow = heap.push(40, "slow");
//! heap.push(10, "ten");
//! heap.push(20, "twenty");
//!
//! heap.decrease_priority(&slow, 5).unwrap();
//! assert_eq!(*heap.minimum().unwrap().borrow().item(), "slow");
//!
//! assert_eq!(heap.decrease_priority(&slow, 5), Err(HeapError::InvalidArgument(
//!     dynamic_ternary_heap::ArgumentError::PriorityNotDecreased,
//! )));
//! ```

pub mod element;
pub mod pathfinding;
pub mod spanning_tree;
pub mod ternary;
pub mod traits;

// Re-export the main types for convenience
pub use element::Entry;
pub use ternary::TernaryHeap;
pub use traits::{ArgumentError, ElementRef, HeapError, PriorityQueueElement};
