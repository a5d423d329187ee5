//! Stress tests that push the heaps through large operation counts
//!
//! These tests perform large numbers of operations in various patterns
//! and check the invariants after every single step, not just at the end.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_indexed_heap::element::node_table;
use rust_indexed_heap::keyed::KeyedHeap;
use rust_indexed_heap::{DecreaseKeyHeap, Heap, HeapError, HeapNode, IndexedMinHeap};

/// Insert 1000 random keys, checking the heap after every add and every pop
#[test]
fn test_thousand_random_keys_checked_every_step() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut nodes: Vec<HeapNode<u32>> = (0..1000)
        .map(|_| HeapNode::new(rng.gen_range(0..10_000)))
        .collect();
    let mut heap = IndexedMinHeap::new();

    for index in 0..nodes.len() {
        heap.add(&mut nodes, index).unwrap();
        assert!(heap.is_valid(&nodes), "invalid after adding element {index}");
        assert_eq!(heap.len(), index + 1);
    }

    let mut last = 0;
    for remaining in (0..1000).rev() {
        let index = heap.pop(&mut nodes).unwrap();
        assert!(heap.is_valid(&nodes), "invalid with {remaining} elements left");
        assert_eq!(heap.len(), remaining);
        assert!(nodes[index].key >= last);
        last = nodes[index].key;
    }

    assert_eq!(heap.pop(&mut nodes), Err(HeapError::EmptyHeap));
}

/// Ascending, descending and constant inputs through the heapify path
#[test]
fn test_heapify_degenerate_orders() {
    for keys in [
        (0..1000).collect::<Vec<i32>>(),
        (0..1000).rev().collect(),
        vec![7; 1000],
    ] {
        let mut expected = keys.clone();
        expected.sort();

        let mut nodes = node_table(keys);
        let mut heap = IndexedMinHeap::from_table(&mut nodes);
        assert!(heap.is_valid(&nodes));

        let mut popped = Vec::with_capacity(expected.len());
        while let Ok(index) = heap.pop(&mut nodes) {
            popped.push(nodes[index].key);
        }
        assert_eq!(popped, expected);
    }
}

/// Decrease every key, many times each, then drain
#[test]
fn test_many_decrease_keys() {
    let mut nodes = node_table((0..500).map(|i| 10_000 + i));
    let mut heap = IndexedMinHeap::from_table(&mut nodes);

    for round in 0..5 {
        for index in (0..500).rev() {
            nodes[index].key -= 1000 + round;
            heap.decrease_key(&mut nodes, index).unwrap();
        }
        assert!(heap.is_valid(&nodes));
    }

    for index in 0..500 {
        assert_eq!(heap.pop(&mut nodes), Ok(index));
    }
    assert!(heap.is_empty());
}

/// Interleave adds, pops and decreases with random choices
#[test]
fn test_random_interleaving() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut nodes: Vec<HeapNode<i64>> = Vec::new();
    let mut heap = IndexedMinHeap::new();
    let mut popped = Vec::new();

    for _ in 0..5000 {
        match rng.gen_range(0..3) {
            0 => {
                nodes.push(HeapNode::new(rng.gen_range(-1000..1000)));
                let index = nodes.len() - 1;
                heap.add(&mut nodes, index).unwrap();
            }
            1 => {
                if let Ok(index) = heap.pop(&mut nodes) {
                    popped.push(index);
                }
            }
            _ => {
                if !heap.is_empty() {
                    let index = heap.get(rng.gen_range(0..heap.len())).unwrap();
                    nodes[index].key -= rng.gen_range(0..100);
                    heap.decrease_key(&mut nodes, index).unwrap();
                }
            }
        }
        assert!(heap.is_valid(&nodes));
    }

    // Every popped element is now stale
    for &index in &popped {
        if !heap.contains(&nodes, index) {
            assert_eq!(
                heap.decrease_key(&mut nodes, index),
                Err(HeapError::StaleHandle { index })
            );
        }
    }
    assert!(heap.is_valid(&nodes));
}

/// Alternating insert and pop through the owning heap
#[test]
fn test_keyed_alternating_ops() {
    let mut heap = KeyedHeap::new();

    for i in 0..200 {
        heap.push(i * 2, i);
        heap.push(i * 2 + 1, i + 1000);
        assert!(heap.pop().is_some());
    }
    assert_eq!(heap.len(), 200);

    let mut last = i32::MIN;
    while let Some((priority, _)) = heap.pop() {
        assert!(priority >= last);
        last = priority;
    }
    assert!(heap.is_empty());
}

/// Handles survive heavy entry reuse without aliasing
#[test]
fn test_keyed_handle_reuse() {
    let mut heap = KeyedHeap::new();
    let mut stale = Vec::new();

    for round in 0..50 {
        let handle = heap.push_with_handle(round, round);
        heap.push(round + 100, round);
        assert_eq!(heap.pop(), Some((round, round)));
        stale.push(handle);

        for old in &stale {
            assert!(!heap.contains(old));
            assert!(heap.decrease_key(old, -1).is_err());
        }
    }
    assert_eq!(heap.len(), 50);
}
