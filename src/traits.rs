//! Common traits and error types for the dynamic ternary heap
//!
//! This module defines the contract between the heap and the values it queues:
//!
//! - [`PriorityQueueElement`]: the capability an element must expose (a priority
//!   and a handle slot the heap is allowed to rewrite)
//! - [`ElementRef`]: the shared reference through which both the caller and the
//!   heap reach an element
//! - [`HeapError`]: the errors returned by heap operations
//!
//! The handle is a back-reference, not ownership: the heap writes the element's
//! current array position into it on every move and clears it on removal, which
//! is what makes `decrease_priority` possible without a linear scan.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, mutable reference to a queued element
///
/// The caller keeps a clone to request priority decreases later; the heap keeps
/// one clone per queued element. Identity is pointer identity.
pub type ElementRef<E> = Rc<RefCell<E>>;

/// Reason an argument was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// The element already carries a handle, i.e. it is queued in some heap
    AlreadyQueued,
    /// The new priority is not strictly less than the current priority
    PriorityNotDecreased,
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::AlreadyQueued => write!(f, "element is already queued in a heap"),
            ArgumentError::PriorityNotDecreased => {
                write!(f, "new priority is not strictly less than current priority")
            }
        }
    }
}

/// Error type for heap operations
///
/// Every operation detects its error before touching the heap, so a returned
/// error always means the heap and its elements are unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// An argument violates the operation's contract
    InvalidArgument(ArgumentError),
    /// The heap has no elements
    EmptyCollection,
    /// The element is not currently queued in this heap
    NotFound,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
            HeapError::EmptyCollection => write!(f, "heap is empty"),
            HeapError::NotFound => write!(f, "element is not queued in this heap"),
        }
    }
}

impl std::error::Error for HeapError {}

impl From<ArgumentError> for HeapError {
    fn from(reason: ArgumentError) -> Self {
        HeapError::InvalidArgument(reason)
    }
}

/// Capability contract for values placed in a [`TernaryHeap`](crate::ternary::TernaryHeap)
///
/// The heap reads and writes only these two fields; the rest of the element is
/// opaque to it. While an element is queued the heap owns both fields: callers
/// change the priority through
/// [`decrease_priority`](crate::ternary::TernaryHeap::decrease_priority) and must
/// never write the handle themselves.
///
/// # Example
///
/// ```rust
/// use dynamic_ternary_heap::PriorityQueueElement;
///
/// struct Vertex {
///     id: usize,
///     distance: u64,
///     slot: Option<usize>,
/// }
///
/// impl PriorityQueueElement for Vertex {
///     type Priority = u64;
///
///     fn priority(&self) -> &u64 {
///         &self.distance
///     }
///
///     fn set_priority(&mut self, priority: u64) {
///         self.distance = priority;
///     }
///
///     fn handle(&self) -> Option<usize> {
///         self.slot
///     }
///
///     fn set_handle(&mut self, handle: Option<usize>) {
///         self.slot = handle;
///     }
/// }
/// ```
pub trait PriorityQueueElement {
    /// Totally ordered key; smaller values are extracted first
    type Priority: Ord;

    /// Returns the current priority
    fn priority(&self) -> &Self::Priority;

    /// Overwrites the priority
    fn set_priority(&mut self, priority: Self::Priority);

    /// Returns the position in the heap's backing array, or `None` if not queued
    fn handle(&self) -> Option<usize>;

    /// Records the position in the heap's backing array (`None` when removed)
    fn set_handle(&mut self, handle: Option<usize>);

    /// Returns true if the element currently carries a handle
    fn is_queued(&self) -> bool {
        self.handle().is_some()
    }
}
