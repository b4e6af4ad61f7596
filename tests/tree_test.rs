//! Behaviour of the tree container through its public API

use std::collections::HashSet;

use bintree::{BinaryTree, Node, Order, TreeError};
use rstest::{fixture, rstest};

// ============================================================
// Fixtures
// ============================================================

//        1
//       / \
//      2   3
//     /
//    4
#[fixture]
fn sample() -> BinaryTree<i32> {
    let mut tree = BinaryTree::new();
    tree.add_root(1)
        .add_left(&1, 2)
        .and_then(|t| t.add_right(&1, 3))
        .and_then(|t| t.add_left(&2, 4))
        .unwrap();
    tree
}

//          a
//        /   \
//       b     c
//      / \     \
//     d   e     f
//        /
//       g
#[fixture]
fn wide() -> BinaryTree<&'static str> {
    let mut tree = BinaryTree::new();
    tree.add_root("a");
    for (parent, left, right) in [("a", "b", "c"), ("b", "d", "e")] {
        tree.add_left(&parent, left).unwrap();
        tree.add_right(&parent, right).unwrap();
    }
    tree.add_right(&"c", "f").unwrap();
    tree.add_left(&"e", "g").unwrap();
    tree
}

fn position<T: PartialEq>(seq: &[&T], value: &T) -> usize {
    seq.iter().position(|v| *v == value).unwrap()
}

fn subtree_values<T>(node: Option<&Node<T>>, out: &mut Vec<*const T>) {
    if let Some(n) = node {
        out.push(n.value() as *const T);
        subtree_values(n.left(), out);
        subtree_values(n.right(), out);
    }
}

// ============================================================
// Traversal orders
// ============================================================

#[rstest]
#[case(Order::InOrder, vec![4, 2, 1, 3])]
#[case(Order::PreOrder, vec![1, 2, 4, 3])]
#[case(Order::PostOrder, vec![4, 2, 3, 1])]
fn given_sample_when_traversing_then_yields_expected_order(
    sample: BinaryTree<i32>,
    #[case] order: Order,
    #[case] expected: Vec<i32>,
) {
    let values: Vec<i32> = sample.begin_order(order).copied().collect();
    assert_eq!(values, expected);
}

#[rstest]
#[case(Order::InOrder, "d b g e a c f")]
#[case(Order::PreOrder, "a b d e g c f")]
#[case(Order::PostOrder, "d g e b f c a")]
fn given_wide_tree_when_traversing_then_yields_expected_order(
    wide: BinaryTree<&'static str>,
    #[case] order: Order,
    #[case] expected: &str,
) {
    let values: Vec<&str> = wide.traverse(order).into_iter().copied().collect();
    assert_eq!(values.join(" "), expected);
}

#[rstest]
fn given_empty_tree_when_beginning_any_order_then_begin_equals_end() {
    let tree: BinaryTree<i32> = BinaryTree::new();
    assert_eq!(tree.begin(), tree.end());
    assert_eq!(tree.begin_preorder(), tree.end_preorder());
    assert_eq!(tree.begin_inorder(), tree.end_inorder());
    assert_eq!(tree.begin_postorder(), tree.end_postorder());
    for order in Order::ALL {
        assert!(tree.traverse(order).is_empty());
    }
}

#[rstest]
fn given_wide_tree_when_traversing_then_every_value_appears_exactly_once(
    wide: BinaryTree<&'static str>,
) {
    for order in Order::ALL {
        let seq = wide.traverse(order);
        let unique: HashSet<_> = seq.iter().collect();
        assert_eq!(seq.len(), wide.len());
        assert_eq!(unique.len(), wide.len());
    }
}

#[rstest]
fn given_wide_tree_when_traversing_then_parent_child_positions_hold(
    wide: BinaryTree<&'static str>,
) {
    let pre = wide.traverse(Order::PreOrder);
    let inorder = wide.traverse(Order::InOrder);
    let post = wide.traverse(Order::PostOrder);

    let mut stack: Vec<&Node<&str>> = wide.root().into_iter().collect();
    while let Some(node) = stack.pop() {
        let v = node.value();
        if let Some(left) = node.left() {
            assert!(position(&pre, v) < position(&pre, left.value()));
            assert!(position(&inorder, left.value()) < position(&inorder, v));
            assert!(position(&post, left.value()) < position(&post, v));
            stack.push(left);
        }
        if let Some(right) = node.right() {
            assert!(position(&pre, v) < position(&pre, right.value()));
            assert!(position(&inorder, v) < position(&inorder, right.value()));
            assert!(position(&post, right.value()) < position(&post, v));
            stack.push(right);
        }
    }
}

#[rstest]
fn given_sample_when_materializing_then_references_point_into_live_nodes(
    sample: BinaryTree<i32>,
) {
    let mut live = Vec::new();
    subtree_values(sample.root(), &mut live);

    for value in sample.traverse(Order::PostOrder) {
        assert!(live.contains(&(value as *const i32)));
    }
}

// ============================================================
// Cursor protocol
// ============================================================

#[rstest]
fn given_cache_when_walking_with_begin_and_end_then_stops_at_sentinel(sample: BinaryTree<i32>) {
    let mut cache = sample.orders();
    let mut it = cache.begin(Order::PreOrder);
    let end = cache.end(Order::PreOrder);

    let mut seen = Vec::new();
    while it != end {
        seen.push(*it.get().unwrap());
        it.advance().unwrap();
    }

    assert_eq!(seen, vec![1, 2, 4, 3]);
    assert!(it.get().is_none());
    assert!(matches!(it.advance(), Err(TreeError::PastEnd { .. })));
}

#[rstest]
fn given_tree_begin_when_compared_to_tree_end_then_equal_only_when_exhausted(
    sample: BinaryTree<i32>,
) {
    let mut it = sample.begin();
    let end = sample.end();
    let mut steps = 0;
    while it != end {
        it.advance().unwrap();
        steps += 1;
    }
    assert_eq!(steps, 4);
}

#[rstest]
fn given_cache_when_end_requested_before_begin_then_end_is_empty_sentinel(
    sample: BinaryTree<i32>,
) {
    let cache = sample.orders();
    let end = cache.end(Order::InOrder);
    assert!(end.is_end());
    assert_eq!(end.position(), 0);
}

#[rstest]
fn given_tree_when_iterating_by_reference_then_uses_in_order(sample: BinaryTree<i32>) {
    let mut values = Vec::new();
    for v in &sample {
        values.push(*v);
    }
    assert_eq!(values, vec![4, 2, 1, 3]);
}

// ============================================================
// Mutation
// ============================================================

#[rstest]
fn given_root_twice_when_adding_then_single_node_holds_last_value() {
    let mut tree = BinaryTree::new();
    tree.add_root(1).add_root(2);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.traverse(Order::PreOrder), vec![&2]);
    assert!(tree.root().unwrap().is_leaf());
}

#[rstest]
fn given_only_root_when_adding_under_missing_value_then_fails_with_tree_unchanged() {
    let mut tree = BinaryTree::new();
    tree.add_root(1);

    let result = tree.add_left(&5, 9);
    assert!(matches!(result, Err(TreeError::ValueNotFound { .. })));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.traverse(Order::InOrder), vec![&1]);
}

#[rstest]
fn given_missing_value_when_adding_then_all_orders_are_unchanged(mut sample: BinaryTree<i32>) {
    let before: Vec<Vec<i32>> = Order::ALL
        .iter()
        .map(|&o| sample.traverse(o).into_iter().copied().collect())
        .collect();

    assert!(sample.add_right(&42, 7).is_err());
    assert!(sample.add_left(&42, 7).is_err());

    let after: Vec<Vec<i32>> = Order::ALL
        .iter()
        .map(|&o| sample.traverse(o).into_iter().copied().collect())
        .collect();
    assert_eq!(before, after);
}

#[rstest]
fn given_occupied_left_when_adding_left_then_value_replaced_and_grandchildren_kept(
    mut sample: BinaryTree<i32>,
) {
    sample.add_left(&1, 9).unwrap();
    assert_eq!(sample.traverse(Order::PreOrder), vec![&1, &9, &4, &3]);
    assert_eq!(sample.len(), 4);
}

#[rstest]
fn given_chained_calls_when_building_then_returns_tree_for_chaining() -> Result<(), TreeError> {
    let mut tree = BinaryTree::new();
    tree.add_root('m')
        .add_left(&'m', 'f')?
        .add_right(&'m', 't')?
        .add_right(&'f', 'h')?;
    assert_eq!(tree.iter().collect::<String>(), "fhmt");
    Ok(())
}

// ============================================================
// Ownership
// ============================================================

#[rstest]
fn given_tree_when_cloned_and_copy_mutated_then_original_unchanged(sample: BinaryTree<i32>) {
    let mut copy = sample.clone();
    assert_eq!(copy, sample);

    copy.add_root(100);
    assert_eq!(sample.root_value(), Some(&1));
    assert_eq!(copy.root_value(), Some(&100));
    assert_eq!(copy.traverse(Order::InOrder), vec![&4, &2, &100, &3]);
}

#[rstest]
fn given_tree_when_taken_then_source_empty_and_target_owns_nodes(mut sample: BinaryTree<i32>) {
    let moved = sample.take();
    assert!(sample.is_empty());
    assert!(sample.begin() == sample.end());
    assert_eq!(moved.traverse(Order::PostOrder), vec![&4, &2, &3, &1]);
}

#[rstest]
fn given_deep_chain_when_traversing_then_no_stack_overflow() {
    let mut tree = BinaryTree::new();
    tree.add_root(0u32);
    for i in 0..2_000u32 {
        tree.add_right(&i, i + 1).unwrap();
    }
    assert_eq!(tree.depth(), 2_001);
    assert_eq!(tree.begin_postorder().next(), Some(&2_000));
}
