//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify that the
//! heap order, handle consistency, extraction order and size accounting
//! hold after every single step. A model (a plain list of live elements)
//! provides the expected answers.

use dynamic_ternary_heap::{ArgumentError, ElementRef, Entry, HeapError, TernaryHeap};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use std::rc::Rc;

type Element = Entry<u32, i32>;

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Extract,
    /// Decrease the live element selected by the index (mod live count) by the amount
    Decrease(usize, i32),
    /// Decrease by zero: must be rejected
    DecreaseEqual(usize),
    Minimum,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (-1000i32..1000).prop_map(Op::Insert),
        3 => Just(Op::Extract),
        4 => (any::<usize>(), 1i32..500).prop_map(|(i, d)| Op::Decrease(i, d)),
        1 => any::<usize>().prop_map(Op::DecreaseEqual),
        1 => Just(Op::Minimum),
        1 => Just(Op::Clear),
    ]
}

/// Checks every structural invariant by walking the backing array
fn check_structure<T>(heap: &TernaryHeap<Entry<T, i32>>) -> Result<(), TestCaseError> {
    let slots = heap.as_slice();
    for (index, element) in slots.iter().enumerate() {
        let inner = element.borrow();
        prop_assert_eq!(inner.handle(), Some(index), "handle mismatch at {}", index);
        if index > 0 {
            let parent = slots[(index - 1) / 3].borrow();
            prop_assert!(
                parent.priority() <= inner.priority(),
                "heap order violated between {} and {}",
                (index - 1) / 3,
                index
            );
        }
    }
    prop_assert!(heap.verify_invariants());
    Ok(())
}

fn run_ops(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut heap = TernaryHeap::new();
    let mut live: Vec<ElementRef<Element>> = Vec::new();
    let mut next_id = 0u32;

    for op in ops {
        let len_before = heap.len();
        match op {
            Op::Insert(priority) => {
                live.push(heap.push(priority, next_id));
                next_id += 1;
                prop_assert_eq!(heap.len(), len_before + 1);
            }
            Op::Extract => {
                let result = heap.extract_minimum();
                if live.is_empty() {
                    prop_assert_eq!(result.err(), Some(HeapError::EmptyCollection));
                } else {
                    let element = result.unwrap();
                    let expected = live.iter().map(|e| *e.borrow().priority()).min().unwrap();
                    prop_assert_eq!(*element.borrow().priority(), expected);
                    prop_assert_eq!(element.borrow().handle(), None);
                    live.retain(|e| !Rc::ptr_eq(e, &element));
                    prop_assert_eq!(heap.len(), len_before - 1);
                }
            }
            Op::Decrease(selector, amount) => {
                if !live.is_empty() {
                    let element = Rc::clone(&live[selector % live.len()]);
                    let new_priority = *element.borrow().priority() - amount;
                    heap.decrease_priority(&element, new_priority).unwrap();
                    prop_assert_eq!(*element.borrow().priority(), new_priority);
                }
                prop_assert_eq!(heap.len(), len_before);
            }
            Op::DecreaseEqual(selector) => {
                if !live.is_empty() {
                    let element = Rc::clone(&live[selector % live.len()]);
                    let handle = element.borrow().handle();
                    let priority = *element.borrow().priority();
                    prop_assert_eq!(
                        heap.decrease_priority(&element, priority),
                        Err(HeapError::InvalidArgument(ArgumentError::PriorityNotDecreased))
                    );
                    prop_assert_eq!(element.borrow().handle(), handle);
                }
            }
            Op::Minimum => {
                if live.is_empty() {
                    prop_assert_eq!(heap.minimum().err(), Some(HeapError::EmptyCollection));
                } else {
                    let first = Rc::clone(heap.minimum().unwrap());
                    let second = Rc::clone(heap.minimum().unwrap());
                    prop_assert!(Rc::ptr_eq(&first, &second));
                    let expected = live.iter().map(|e| *e.borrow().priority()).min().unwrap();
                    prop_assert_eq!(*first.borrow().priority(), expected);
                }
                prop_assert_eq!(heap.len(), len_before);
            }
            Op::Clear => {
                heap.clear();
                prop_assert_eq!(heap.len(), 0);
                for element in live.drain(..) {
                    prop_assert_eq!(element.borrow().handle(), None);
                }
            }
        }

        prop_assert_eq!(heap.len(), live.len());
        check_structure(&heap)?;
    }

    Ok(())
}

/// Inserting a multiset then draining yields non-decreasing priorities
fn check_pop_order(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap = TernaryHeap::new();
    for &value in &values {
        heap.push(value, ());
    }

    let mut drained = Vec::new();
    while let Ok(element) = heap.extract_minimum() {
        drained.push(*element.borrow().priority());
    }

    let mut expected = values;
    expected.sort_unstable();
    prop_assert_eq!(drained, expected);
    Ok(())
}

/// Decreasing to a value below every other priority makes the element the minimum
fn check_decrease_to_minimum(values: Vec<i32>, selector: usize) -> Result<(), TestCaseError> {
    let mut heap = TernaryHeap::new();
    let handles: Vec<_> = values.iter().map(|&v| heap.push(v, ())).collect();

    let target = &handles[selector % handles.len()];
    let floor = values.iter().copied().min().unwrap();
    heap.decrease_priority(target, floor - 1).unwrap();

    prop_assert!(Rc::ptr_eq(heap.minimum().unwrap(), target));
    prop_assert_eq!(target.borrow().handle(), Some(0));
    check_structure(&heap)
}

/// Bulk construction satisfies the same invariants as repeated insertion
fn check_from_elements(values: Vec<i32>) -> Result<(), TestCaseError> {
    let elements: Vec<_> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| Entry::shared(v, i as u32))
        .collect();

    let mut heap = TernaryHeap::from_elements(elements.iter().cloned()).unwrap();
    prop_assert_eq!(heap.len(), values.len());
    check_structure(&heap)?;

    let mut expected = values;
    expected.sort_unstable();
    for priority in expected {
        let element = heap.extract_minimum().unwrap();
        prop_assert_eq!(*element.borrow().priority(), priority);
        check_structure(&heap)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_random_operation_sequences(ops in prop::collection::vec(op_strategy(), 0..200)) {
        run_ops(ops)?;
    }

    #[test]
    fn test_pop_order_invariant(values in prop::collection::vec(-100i32..100, 0..200)) {
        check_pop_order(values)?;
    }

    #[test]
    fn test_decrease_to_minimum(
        values in prop::collection::vec(-100i32..100, 1..100),
        selector in any::<usize>()
    ) {
        check_decrease_to_minimum(values, selector)?;
    }

    #[test]
    fn test_from_elements_invariant(values in prop::collection::vec(-100i32..100, 0..150)) {
        check_from_elements(values)?;
    }
}
