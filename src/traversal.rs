//! Traversal materialization and cursors.
//!
//! A traversal is materialized into an immutable snapshot of references to the
//! live values of the tree. Cursors walk that snapshot up to a past-the-end
//! sentinel. Every snapshot borrows the tree, so the tree cannot be mutated
//! while a cursor or cache over it is alive.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;
use std::rc::Rc;

use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::node::Node;
use crate::order::Order;
use crate::tree::BinaryTree;

type Snapshot<'a, T> = Rc<[&'a T]>;

fn empty_snapshot<'a, T>() -> Snapshot<'a, T> {
    Rc::from(Vec::new())
}

enum Visit<'a, T> {
    Expand(&'a Node<T>),
    Emit(&'a T),
}

/// Linearizes the subtree under `root` in `order`.
///
/// Uses an explicit stack: each expanded node pushes its own value and its
/// children in reverse emission order, so deep trees cannot overflow the call stack.
pub fn load_order<T>(root: Option<&Node<T>>, order: Order) -> Vec<&T> {
    let mut sequence = Vec::new();
    let mut stack: Vec<Visit<'_, T>> = root.map(Visit::Expand).into_iter().collect();

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Emit(value) => sequence.push(value),
            Visit::Expand(node) => {
                let left = node.left().map(Visit::Expand);
                let right = node.right().map(Visit::Expand);
                let this = Some(Visit::Emit(node.value()));
                let pending = match order {
                    Order::PreOrder => [right, left, this],
                    Order::InOrder => [right, this, left],
                    Order::PostOrder => [this, right, left],
                };
                stack.extend(pending.into_iter().flatten());
            }
        }
    }

    sequence
}

/// Per-order cache of materialized sequences over one tree.
///
/// `begin` rebuilds the sequence for its order, `end` reuses whatever is cached,
/// so the usual pattern is `begin` immediately followed by `end`.
pub struct OrderCache<'a, T> {
    tree: &'a BinaryTree<T>,
    pre_order: Snapshot<'a, T>,
    in_order: Snapshot<'a, T>,
    post_order: Snapshot<'a, T>,
}

impl<'a, T> OrderCache<'a, T> {
    pub fn new(tree: &'a BinaryTree<T>) -> Self {
        Self {
            tree,
            pre_order: empty_snapshot(),
            in_order: empty_snapshot(),
            post_order: empty_snapshot(),
        }
    }

    fn snapshot(&self, order: Order) -> &Snapshot<'a, T> {
        match order {
            Order::PreOrder => &self.pre_order,
            Order::InOrder => &self.in_order,
            Order::PostOrder => &self.post_order,
        }
    }

    fn snapshot_mut(&mut self, order: Order) -> &mut Snapshot<'a, T> {
        match order {
            Order::PreOrder => &mut self.pre_order,
            Order::InOrder => &mut self.in_order,
            Order::PostOrder => &mut self.post_order,
        }
    }

    /// Currently cached sequence for `order`, empty until first loaded.
    pub fn cached(&self, order: Order) -> &[&'a T] {
        self.snapshot(order)
    }

    /// Clears and rebuilds the sequence for `order` from the tree.
    #[instrument(level = "trace", skip(self))]
    pub fn load_order(&mut self, order: Order) -> &[&'a T] {
        let sequence = load_order(self.tree.root(), order);
        debug!("Materialized {} values in {}", sequence.len(), order);
        *self.snapshot_mut(order) = Rc::from(sequence);
        self.snapshot(order)
    }

    /// Rebuilds `order` and returns a cursor on its first element.
    pub fn begin(&mut self, order: Order) -> Cursor<'a, T> {
        self.load_order(order);
        Cursor::new(order, Rc::clone(self.snapshot(order)), 0)
    }

    /// Sentinel cursor for the cached `order`, without rebuilding.
    pub fn end(&self, order: Order) -> Cursor<'a, T> {
        let snapshot = Rc::clone(self.snapshot(order));
        let len = snapshot.len();
        Cursor::new(order, snapshot, len)
    }
}

/// Position in a materialized traversal, from the first element up to the
/// past-the-end sentinel.
///
/// Two cursors are equal when both sit on the sentinel or both point at the
/// same value (by identity, not by `PartialEq` of the values).
pub struct Cursor<'a, T> {
    order: Order,
    sequence: Snapshot<'a, T>,
    position: usize,
}

impl<'a, T> Cursor<'a, T> {
    fn new(order: Order, sequence: Snapshot<'a, T>, position: usize) -> Self {
        Self {
            order,
            sequence,
            position,
        }
    }

    /// Sentinel cursor not tied to any materialized sequence.
    pub fn sentinel(order: Order) -> Self {
        Self::new(order, empty_snapshot(), 0)
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Value under the cursor, `None` at the sentinel.
    pub fn get(&self) -> Option<&'a T> {
        self.sequence.get(self.position).copied()
    }

    pub fn is_end(&self) -> bool {
        self.position >= self.sequence.len()
    }

    /// Steps to the next position; fails when already at the sentinel.
    pub fn advance(&mut self) -> TreeResult<()> {
        if self.is_end() {
            return Err(TreeError::PastEnd { order: self.order });
        }
        self.position += 1;
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.sequence.len().saturating_sub(self.position)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self::new(self.order, Rc::clone(&self.sequence), self.position)
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("order", &self.order)
            .field("position", &self.position)
            .field("len", &self.sequence.len())
            .finish()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.get(), other.get()) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.get()?;
        self.position += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}

impl<T> BinaryTree<T> {
    /// Empty per-order cache over this tree.
    pub fn orders(&self) -> OrderCache<'_, T> {
        OrderCache::new(self)
    }

    /// Materialized sequence of values in `order`.
    pub fn traverse(&self, order: Order) -> Vec<&T> {
        load_order(self.root(), order)
    }

    pub fn begin_order(&self, order: Order) -> Cursor<'_, T> {
        self.orders().begin(order)
    }

    /// Sentinel cursor for `order`; does not materialize anything.
    pub fn end_order(&self, order: Order) -> Cursor<'_, T> {
        Cursor::sentinel(order)
    }

    pub fn begin(&self) -> Cursor<'_, T> {
        self.begin_order(Order::InOrder)
    }

    pub fn end(&self) -> Cursor<'_, T> {
        self.end_order(Order::InOrder)
    }

    pub fn begin_preorder(&self) -> Cursor<'_, T> {
        self.begin_order(Order::PreOrder)
    }

    pub fn end_preorder(&self) -> Cursor<'_, T> {
        self.end_order(Order::PreOrder)
    }

    pub fn begin_inorder(&self) -> Cursor<'_, T> {
        self.begin_order(Order::InOrder)
    }

    pub fn end_inorder(&self) -> Cursor<'_, T> {
        self.end_order(Order::InOrder)
    }

    pub fn begin_postorder(&self) -> Cursor<'_, T> {
        self.begin_order(Order::PostOrder)
    }

    pub fn end_postorder(&self) -> Cursor<'_, T> {
        self.end_order(Order::PostOrder)
    }

    /// In-order iterator over the values.
    pub fn iter(&self) -> Cursor<'_, T> {
        self.begin()
    }
}

impl<'a, T> IntoIterator for &'a BinaryTree<T> {
    type Item = &'a T;
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
