//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify
//! that heap order and slot bookkeeping are always maintained.

use proptest::prelude::*;
use rust_indexed_heap::element::node_table;
use rust_indexed_heap::keyed::KeyedHeap;
use rust_indexed_heap::{DecreaseKeyHeap, Heap, HeapError, HeapNode, IndexedMinHeap};

/// One step of a random operation sequence
#[derive(Debug, Clone)]
enum Op {
    Add(i32),
    Pop,
    /// Decrease the element in this raw slot (modulo len) by the given amount
    Decrease(usize, i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-1000i32..1000).prop_map(Op::Add),
        Just(Op::Pop),
        (0usize..64, 0i32..500).prop_map(|(slot, by)| Op::Decrease(slot, by)),
    ]
}

/// Heap order and bookkeeping hold after every single operation, and len()
/// moves by exactly one on every successful add and pop
fn test_random_ops_invariant(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut nodes: Vec<HeapNode<i32>> = Vec::new();
    let mut heap = IndexedMinHeap::new();
    let mut live: Vec<i32> = Vec::new();

    for op in ops {
        let before = heap.len();
        match op {
            Op::Add(key) => {
                nodes.push(HeapNode::new(key));
                let index = nodes.len() - 1;
                heap.add(&mut nodes, index).unwrap();
                live.push(key);
                prop_assert_eq!(heap.len(), before + 1);
            }
            Op::Pop => match heap.pop(&mut nodes) {
                Ok(index) => {
                    let key = nodes[index].key;
                    let min = *live.iter().min().unwrap();
                    prop_assert_eq!(key, min);
                    let pos = live.iter().position(|&k| k == key).unwrap();
                    live.swap_remove(pos);
                    prop_assert_eq!(heap.len(), before - 1);
                }
                Err(err) => {
                    prop_assert_eq!(err, HeapError::EmptyHeap);
                    prop_assert_eq!(before, 0);
                }
            },
            Op::Decrease(slot, by) => {
                if let Some(index) = heap.get(slot % before.max(1)) {
                    let old = nodes[index].key;
                    nodes[index].key = old - by;
                    heap.decrease_key(&mut nodes, index).unwrap();
                    let pos = live.iter().position(|&k| k == old).unwrap();
                    live[pos] = old - by;
                    prop_assert_eq!(heap.len(), before);
                }
            }
        }

        prop_assert!(heap.is_valid(&nodes), "invariants broken after {:?}", heap.as_slice());
    }

    Ok(())
}

/// Adding n elements then popping n times yields them fully sorted, and the
/// heapify constructor yields the same order
fn test_sort_and_heapify_agree(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut expected = values.clone();
    expected.sort();

    let mut added_nodes = node_table(values.iter().copied());
    let mut added = IndexedMinHeap::new();
    for index in 0..added_nodes.len() {
        added.add(&mut added_nodes, index).unwrap();
    }

    let mut bulk_nodes = node_table(values.iter().copied());
    let mut bulk =
        IndexedMinHeap::from_indices(&mut bulk_nodes, (0..values.len()).collect()).unwrap();
    prop_assert!(bulk.is_valid(&bulk_nodes));

    let mut from_add = Vec::new();
    while let Ok(index) = added.pop(&mut added_nodes) {
        from_add.push(added_nodes[index].key);
    }
    let mut from_bulk = Vec::new();
    while let Ok(index) = bulk.pop(&mut bulk_nodes) {
        from_bulk.push(bulk_nodes[index].key);
    }

    prop_assert_eq!(&from_add, &expected);
    prop_assert_eq!(&from_bulk, &expected);
    Ok(())
}

/// Decreasing keys in place ends with the same pop order as inserting the
/// final keys fresh
fn test_decrease_key_matches_reinsert(
    initial: Vec<i32>,
    decreases: Vec<(usize, i32)>,
) -> Result<(), TestCaseError> {
    let mut nodes = node_table(initial.iter().copied());
    let mut heap = IndexedMinHeap::from_table(&mut nodes);

    for (index, by) in decreases {
        let index = index % nodes.len();
        nodes[index].key -= by;
        heap.decrease_key(&mut nodes, index).unwrap();
        prop_assert!(heap.is_valid(&nodes));
    }

    let mut expected: Vec<i32> = nodes.iter().map(|n| n.key).collect();
    expected.sort();

    let mut popped = Vec::new();
    while let Ok(index) = heap.pop(&mut nodes) {
        popped.push(nodes[index].key);
    }
    prop_assert_eq!(popped, expected);
    Ok(())
}

/// KeyedHeap behaves like a sorted multiset under push/pop/decrease_key
fn test_keyed_heap_model(
    initial: Vec<i32>,
    decreases: Vec<(usize, i32)>,
) -> Result<(), TestCaseError> {
    let mut heap = KeyedHeap::new();
    let mut handles = Vec::new();
    let mut priorities = Vec::new();

    for (i, &priority) in initial.iter().enumerate() {
        handles.push(heap.push_with_handle(priority, i));
        priorities.push(priority);
    }

    for (i, new_priority) in decreases {
        let i = i % handles.len();
        let result = heap.decrease_key(&handles[i], new_priority);
        if new_priority < priorities[i] {
            prop_assert_eq!(result, Ok(()));
            priorities[i] = new_priority;
        } else {
            prop_assert_eq!(result, Err(HeapError::PriorityNotDecreased));
        }
        prop_assert_eq!(heap.peek().map(|(p, _)| *p), priorities.iter().min().copied());
    }

    let mut last = i32::MIN;
    while let Some((priority, item)) = heap.pop() {
        prop_assert!(priority >= last);
        prop_assert_eq!(priority, priorities[item]);
        prop_assert!(!heap.contains(&handles[item]));
        last = priority;
    }
    Ok(())
}

/// Merge keeps every element and the overall minimum
fn test_keyed_merge_invariant(
    heap1_values: Vec<i32>,
    heap2_values: Vec<i32>,
) -> Result<(), TestCaseError> {
    let mut heap1 = KeyedHeap::new();
    let mut heap2 = KeyedHeap::new();
    for &val in &heap1_values {
        heap1.push(val, val);
    }
    for &val in &heap2_values {
        heap2.push(val, val);
    }

    heap1.merge(heap2);

    let mut expected: Vec<i32> = heap1_values.into_iter().chain(heap2_values).collect();
    expected.sort();
    let popped: Vec<i32> = std::iter::from_fn(|| heap1.pop()).map(|(p, _)| p).collect();
    prop_assert_eq!(popped, expected);
    Ok(())
}

proptest! {
    #[test]
    fn test_indexed_random_ops(ops in prop::collection::vec(op_strategy(), 0..200)) {
        test_random_ops_invariant(ops)?;
    }

    #[test]
    fn test_indexed_sort_and_heapify(values in prop::collection::vec(-100i32..100, 0..200)) {
        test_sort_and_heapify_agree(values)?;
    }

    #[test]
    fn test_indexed_decrease_key(
        initial in prop::collection::vec(-100i32..100, 1..80),
        decreases in prop::collection::vec((0usize..80, 0i32..100), 0..40)
    ) {
        test_decrease_key_matches_reinsert(initial, decreases)?;
    }

    #[test]
    fn test_keyed_decrease_key(
        initial in prop::collection::vec(-100i32..100, 1..50),
        decreases in prop::collection::vec((0usize..50, -150i32..100), 0..20)
    ) {
        test_keyed_heap_model(initial, decreases)?;
    }

    #[test]
    fn test_keyed_merge(
        heap1 in prop::collection::vec(-100i32..100, 0..50),
        heap2 in prop::collection::vec(-100i32..100, 0..50)
    ) {
        test_keyed_merge_invariant(heap1, heap2)?;
    }
}
