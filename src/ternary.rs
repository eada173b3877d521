//! Dynamic ternary min-heap with handle-based decrease-key
//!
//! A ternary heap is an array-backed tree in which every node has up to three
//! children. Compared to a binary heap the tree is shallower (log₃ n levels),
//! so sift-up is cheaper, at the price of one extra comparison per level when
//! sifting down.
//!
//! Each queued element records its own array position (its *handle*), and the
//! heap rewrites that handle on every move. A caller holding an element can
//! therefore ask for a priority decrease without the heap searching for it.
//!
//! # Time Complexity
//!
//! | Operation           | Complexity |
//! |---------------------|------------|
//! | `insert`            | O(log₃ n)  |
//! | `minimum`           | O(1)       |
//! | `extract_minimum`   | O(log₃ n)  |
//! | `decrease_priority` | O(log₃ n)  |
//! | `from_elements`     | O(n)       |
//! | `clear`             | O(n)       |
//!
//! # Layout
//!
//! The tree is never materialized as linked nodes. With the root at index 0:
//! - `parent(i) = (i - 1) / 3`
//! - `child(i, k) = 3i + 1 + k` for `k` in `0..3`
//!
//! # Example
//!
//! ```rust
//! use dynamic_ternary_heap::TernaryHeap;
//!
//! let mut heap = TernaryHeap::new();
//! let a = heap.push(10, "a");
//! let _b = heap.push(20, "b");
//! let c = heap.push(40, "c");
//!
//! heap.decrease_priority(&c, 5).unwrap();
//! assert!(std::rc::Rc::ptr_eq(heap.minimum().unwrap(), &c));
//!
//! let first = heap.extract_minimum().unwrap();
//! assert_eq!(*first.borrow().item(), "c");
//! assert_eq!(first.borrow().handle(), None);
//! assert_eq!(a.borrow().handle(), Some(0));
//! ```

use crate::element::Entry;
use crate::traits::{ArgumentError, ElementRef, HeapError, PriorityQueueElement};
use log::{debug, trace};
use std::fmt;
use std::rc::Rc;

/// Branching factor of the tree
const ARITY: usize = 3;

#[inline]
fn parent_of(index: usize) -> usize {
    (index - 1) / ARITY
}

#[inline]
fn first_child_of(index: usize) -> usize {
    ARITY * index + 1
}

/// Dynamic min-priority queue backed by a ternary heap
///
/// Elements are shared with the caller as [`ElementRef`]s. The heap holds one
/// reference per queued element and keeps every element's handle equal to its
/// array index.
///
/// # Panics
///
/// Operations borrow elements through their `RefCell`. Calling into the heap
/// while holding a `RefCell` borrow of a queued element panics.
pub struct TernaryHeap<E: PriorityQueueElement> {
    /// Dense array of queued elements; index 0 is the minimum
    data: Vec<ElementRef<E>>,
}

impl<E: PriorityQueueElement> TernaryHeap<E> {
    /// Creates an empty heap
    pub fn new() -> Self {
        TernaryHeap { data: Vec::new() }
    }

    /// Creates an empty heap able to hold `capacity` elements without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        TernaryHeap {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Builds a heap from a sequence of unqueued elements in O(n)
    ///
    /// The result satisfies the same invariants as inserting the elements one
    /// by one, but uses bottom-up heapify instead of repeated sift-up.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument(AlreadyQueued)` if any element is already
    /// queued (including an element appearing twice in `elements`). In that
    /// case no handle is left modified.
    pub fn from_elements<I>(elements: I) -> Result<Self, HeapError>
    where
        I: IntoIterator<Item = ElementRef<E>>,
    {
        let iter = elements.into_iter();
        let mut heap = Self::with_capacity(iter.size_hint().0);

        for element in iter {
            if element.borrow().is_queued() {
                debug!(
                    "from_elements rejected element #{}: already queued",
                    heap.data.len()
                );
                // Dropping `heap` resets every handle assigned so far.
                return Err(ArgumentError::AlreadyQueued.into());
            }
            element.borrow_mut().set_handle(Some(heap.data.len()));
            heap.data.push(element);
        }

        if heap.data.len() > 1 {
            for index in (0..=parent_of(heap.data.len() - 1)).rev() {
                heap.sift_down(index);
            }
        }
        trace!("heapified {} elements", heap.data.len());

        Ok(heap)
    }

    /// Returns the number of queued elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no element is queued
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Inserts an element, placing it according to its current priority
    ///
    /// The element's handle is set to its final position.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument(AlreadyQueued)` if the element already has a
    /// handle, i.e. it is queued in this or another heap.
    pub fn insert(&mut self, element: ElementRef<E>) -> Result<(), HeapError> {
        if element.borrow().is_queued() {
            debug!("insert rejected: element already queued");
            return Err(ArgumentError::AlreadyQueued.into());
        }

        let index = self.data.len();
        element.borrow_mut().set_handle(Some(index));
        self.data.push(element);
        self.sift_up(index);
        Ok(())
    }

    /// Returns the minimum element without removing it
    ///
    /// # Errors
    ///
    /// Returns `EmptyCollection` if the heap is empty.
    pub fn minimum(&self) -> Result<&ElementRef<E>, HeapError> {
        self.data.first().ok_or(HeapError::EmptyCollection)
    }

    /// Removes and returns the minimum element
    ///
    /// The last element takes the root's place and sinks to its position. The
    /// returned element's handle is cleared.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCollection` if the heap is empty.
    pub fn extract_minimum(&mut self) -> Result<ElementRef<E>, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyCollection);
        }

        let min = self.data.swap_remove(0);
        if let Some(root) = self.data.first() {
            root.borrow_mut().set_handle(Some(0));
            self.sift_down(0);
        }
        min.borrow_mut().set_handle(None);
        Ok(min)
    }

    /// Lowers the priority of a queued element and moves it toward the root
    ///
    /// # Errors
    ///
    /// - `NotFound` if the element is not queued in this heap (never inserted,
    ///   already extracted, or queued in another heap)
    /// - `InvalidArgument(PriorityNotDecreased)` if `new_priority` is not
    ///   strictly less than the current priority
    pub fn decrease_priority(
        &mut self,
        element: &ElementRef<E>,
        new_priority: E::Priority,
    ) -> Result<(), HeapError> {
        let Some(index) = self.position_of(element) else {
            debug!("decrease_priority rejected: element not queued in this heap");
            return Err(HeapError::NotFound);
        };

        {
            let mut inner = element.borrow_mut();
            if new_priority >= *inner.priority() {
                debug!("decrease_priority rejected at index {}: priority not decreased", index);
                return Err(ArgumentError::PriorityNotDecreased.into());
            }
            inner.set_priority(new_priority);
        }

        self.sift_up(index);
        Ok(())
    }

    /// Removes every element, clearing their handles
    ///
    /// Cleared elements can be inserted again, into this or another heap.
    pub fn clear(&mut self) {
        trace!("clearing {} elements", self.data.len());
        for element in self.data.drain(..) {
            element.borrow_mut().set_handle(None);
        }
    }

    /// Returns true if the element is queued in this heap
    pub fn contains(&self, element: &ElementRef<E>) -> bool {
        self.position_of(element).is_some()
    }

    /// Returns the backing array in heap order (index 0 is the minimum)
    pub fn as_slice(&self) -> &[ElementRef<E>] {
        &self.data
    }

    /// Iterates over the queued elements in array order, not priority order
    pub fn iter(&self) -> std::slice::Iter<'_, ElementRef<E>> {
        self.data.iter()
    }

    /// Checks heap order and handle consistency at every index
    ///
    /// Returns false if any parent is greater than one of its children or any
    /// element's handle differs from its index.
    pub fn verify_invariants(&self) -> bool {
        self.data.iter().enumerate().all(|(index, element)| {
            let inner = element.borrow();
            if inner.handle() != Some(index) {
                return false;
            }
            if index == 0 {
                return true;
            }
            let parent = self.data[parent_of(index)].borrow();
            *parent.priority() <= *inner.priority()
        })
    }

    /// Resolves an element to its index, if it is live in this heap
    fn position_of(&self, element: &ElementRef<E>) -> Option<usize> {
        let index = element.borrow().handle()?;
        self.data
            .get(index)
            .filter(|slot| Rc::ptr_eq(slot, element))
            .map(|_| index)
    }

    /// Returns true if the element at `a` has strictly smaller priority than at `b`
    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        *self.data[a].borrow().priority() < *self.data[b].borrow().priority()
    }

    /// Exchanges two slots and rewrites both handles
    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.data[a].borrow_mut().set_handle(Some(a));
        self.data[b].borrow_mut().set_handle(Some(b));
    }

    /// Moves the element at `index` up while it is smaller than its parent
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = parent_of(index);
            if !self.less(index, parent) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    /// Moves the element at `index` down while some child is smaller
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let first = first_child_of(index);
            if first >= len {
                break;
            }

            let mut smallest = index;
            for child in first..(first + ARITY).min(len) {
                if self.less(child, smallest) {
                    smallest = child;
                }
            }

            if smallest == index {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T, P: Ord> TernaryHeap<Entry<T, P>> {
    /// Wraps `(priority, item)` in a new [`Entry`], inserts it and returns it
    ///
    /// Keep the returned reference to call
    /// [`decrease_priority`](Self::decrease_priority) later.
    pub fn push(&mut self, priority: P, item: T) -> ElementRef<Entry<T, P>> {
        let entry = Entry::shared(priority, item);
        let index = self.data.len();
        entry.borrow_mut().set_handle(Some(index));
        self.data.push(Rc::clone(&entry));
        self.sift_up(index);
        entry
    }
}

impl<E: PriorityQueueElement> Default for TernaryHeap<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PriorityQueueElement + fmt::Debug> fmt::Debug for TernaryHeap<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TernaryHeap").field("data", &self.data).finish()
    }
}

impl<E: PriorityQueueElement> Drop for TernaryHeap<E> {
    fn drop(&mut self) {
        // Elements outlive the heap through the caller's references.
        for element in &self.data {
            if let Ok(mut inner) = element.try_borrow_mut() {
                inner.set_handle(None);
            }
        }
    }
}

impl<'a, E: PriorityQueueElement> IntoIterator for &'a TernaryHeap<E> {
    type Item = &'a ElementRef<E>;
    type IntoIter = std::slice::Iter<'a, ElementRef<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
