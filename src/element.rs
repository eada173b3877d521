//! Ready-made queue element
//!
//! [`Entry`] pairs an arbitrary item with a priority and the handle slot the
//! heap needs, for callers who do not want to implement
//! [`PriorityQueueElement`] on their own types.

use crate::traits::{ElementRef, PriorityQueueElement};
use std::cell::RefCell;
use std::rc::Rc;

/// An item with a priority and a heap handle
///
/// # Example
///
/// ```rust
/// use dynamic_ternary_heap::{Entry, TernaryHeap};
///
/// let mut heap = TernaryHeap::new();
/// let job = Entry::shared(7, "compile");
/// heap.insert(job.clone()).unwrap();
/// assert!(job.borrow().handle().is_some());
/// ```
#[derive(Debug)]
pub struct Entry<T, P> {
    item: T,
    priority: P,
    handle: Option<usize>,
}

impl<T, P> Entry<T, P> {
    /// Creates an unqueued entry
    pub fn new(priority: P, item: T) -> Self {
        Entry {
            item,
            priority,
            handle: None,
        }
    }

    /// Creates an unqueued entry wrapped for sharing with a heap
    pub fn shared(priority: P, item: T) -> ElementRef<Self> {
        Rc::new(RefCell::new(Self::new(priority, item)))
    }

    /// Returns the item
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Returns the item mutably; the priority stays under heap control
    pub fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    /// Returns the current priority
    pub fn priority(&self) -> &P {
        &self.priority
    }

    /// Returns the current heap position, if queued
    pub fn handle(&self) -> Option<usize> {
        self.handle
    }

    /// Consumes the entry, returning `(priority, item)`
    pub fn into_parts(self) -> (P, T) {
        (self.priority, self.item)
    }
}

// A clone is a different element and starts unqueued.
impl<T: Clone, P: Clone> Clone for Entry<T, P> {
    fn clone(&self) -> Self {
        Entry {
            item: self.item.clone(),
            priority: self.priority.clone(),
            handle: None,
        }
    }
}

impl<T, P: Ord> PriorityQueueElement for Entry<T, P> {
    type Priority = P;

    fn priority(&self) -> &P {
        &self.priority
    }

    fn set_priority(&mut self, priority: P) {
        self.priority = priority;
    }

    fn handle(&self) -> Option<usize> {
        self.handle
    }

    fn set_handle(&mut self, handle: Option<usize>) {
        self.handle = handle;
    }
}
