use std::fmt;
use std::mem;

use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::node::{Link, Node, Side};

/// Binary tree owning zero or one root [`Node`].
///
/// Children are attached explicitly by the caller, keyed by the value of an
/// existing node. There is no ordering, balancing or removal.
///
/// ```
/// use bintree::BinaryTree;
///
/// let mut tree = BinaryTree::new();
/// tree.add_root(1).add_left(&1, 2)?.add_right(&1, 3)?.add_left(&2, 4)?;
///
/// let in_order: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(in_order, vec![4, 2, 1, 3]);
/// # Ok::<(), bintree::TreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTree<T> {
    root: Link<T>,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryTree<T> {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    pub fn root_value(&self) -> Option<&T> {
        self.root().map(Node::value)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Places `value` at the root.
    ///
    /// An existing root keeps its node and children; only its value is replaced.
    #[instrument(level = "trace", skip_all)]
    pub fn add_root(&mut self, value: T) -> &mut Self {
        match self.root.as_deref_mut() {
            Some(root) => {
                debug!("Overwriting root value");
                root.value = value;
            }
            None => {
                debug!("Creating root node");
                self.root = Some(Box::new(Node::new(value)));
            }
        }
        self
    }

    /// Moves the whole tree out, leaving `self` empty.
    pub fn take(&mut self) -> BinaryTree<T> {
        mem::take(self)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    /// Number of levels, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&Node<T>, usize)> = self.root().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in [node.left(), node.right()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }

    /// Values of all leaf nodes, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();

        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                leaves.push(node.value());
            } else {
                // right pushed first so the left subtree is reported first
                stack.extend(node.right());
                stack.extend(node.left());
            }
        }

        leaves
    }

    /// Nodes in search order: pop a node, then push its left and right child,
    /// so the right subtree is explored before the left one.
    pub(crate) fn nodes(&self) -> SearchOrder<'_, T> {
        SearchOrder {
            stack: self.root().into_iter().collect(),
        }
    }
}

impl<T: PartialEq> BinaryTree<T> {
    /// First node holding `value` in search order.
    ///
    /// With duplicate values the match is the first one met by the stack-driven
    /// search, which is not necessarily the shallowest.
    pub fn find(&self, value: &T) -> Option<&Node<T>> {
        self.nodes().find(|node| node.value == *value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    fn find_mut(&mut self, value: &T) -> Option<&mut Node<T>> {
        let mut stack: Vec<&mut Node<T>> = self.root.as_deref_mut().into_iter().collect();

        while let Some(node) = stack.pop() {
            if node.value == *value {
                return Some(node);
            }
            let Node { left, right, .. } = node;
            stack.extend(left.as_deref_mut());
            stack.extend(right.as_deref_mut());
        }

        None
    }

    /// Sets the left child of the node holding `existing` to `value`.
    ///
    /// An occupied slot keeps its node and subtree; only the value is replaced.
    /// Fails with [`TreeError::ValueNotFound`] when no node holds `existing`,
    /// leaving the tree unchanged.
    pub fn add_left(&mut self, existing: &T, value: T) -> TreeResult<&mut Self> {
        self.add_child(Side::Left, existing, value)
    }

    /// Sets the right child of the node holding `existing` to `value`.
    ///
    /// Same rules as [`BinaryTree::add_left`].
    pub fn add_right(&mut self, existing: &T, value: T) -> TreeResult<&mut Self> {
        self.add_child(Side::Right, existing, value)
    }

    #[instrument(level = "trace", skip_all, fields(side = %side))]
    pub fn add_child(&mut self, side: Side, existing: &T, value: T) -> TreeResult<&mut Self> {
        let parent = self
            .find_mut(existing)
            .ok_or(TreeError::ValueNotFound { side })?;

        let slot = parent.slot_mut(side);
        match slot.as_deref_mut() {
            Some(child) => {
                debug!("Overwriting existing {} child", side);
                child.value = value;
            }
            None => {
                debug!("Attaching new {} child", side);
                *slot = Some(Box::new(Node::new(value)));
            }
        }
        Ok(self)
    }
}

/// Stack-driven walk used by value search and the debug rendering.
pub(crate) struct SearchOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for SearchOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.left());
        self.stack.extend(node.right());
        Some(node)
    }
}

/// Debug dump, one line per node: `value<left,right>` with `None` for an empty
/// slot. Nodes appear in search order, which is not a stable format.
impl<T: fmt::Display> fmt::Display for BinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn slot<U: fmt::Display>(f: &mut fmt::Formatter<'_>, node: Option<&Node<U>>) -> fmt::Result {
            match node {
                Some(n) => write!(f, "{}", n.value),
                None => f.write_str("None"),
            }
        }

        for node in self.nodes() {
            write!(f, "{}<", node.value)?;
            slot(f, node.left())?;
            f.write_str(",")?;
            slot(f, node.right())?;
            writeln!(f, ">")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BinaryTree<i32> {
        let mut tree = BinaryTree::new();
        tree.add_root(1);
        tree.add_left(&1, 2).unwrap();
        tree.add_right(&1, 3).unwrap();
        tree.add_left(&2, 4).unwrap();
        tree
    }

    #[test]
    fn given_empty_tree_when_queried_then_has_no_nodes() {
        let tree: BinaryTree<i32> = BinaryTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.leaves().is_empty());
        assert!(tree.root_value().is_none());
    }

    #[test]
    fn given_root_when_adding_root_again_then_overwrites_value() {
        let mut tree = BinaryTree::new();
        tree.add_root(1).add_root(2);
        assert_eq!(tree.root_value(), Some(&2));
        assert_eq!(tree.len(), 1);
        assert!(tree.root().unwrap().is_leaf());
    }

    #[test]
    fn given_children_when_adding_root_again_then_children_are_kept() {
        let mut tree = sample();
        tree.add_root(10);
        assert_eq!(tree.root_value(), Some(&10));
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root().unwrap().left().map(Node::value), Some(&2));
    }

    #[test]
    fn given_missing_target_when_adding_child_then_fails_and_tree_unchanged() {
        let mut tree = BinaryTree::new();
        tree.add_root(1);
        let before = tree.clone();

        let err = tree.add_left(&5, 9).unwrap_err();
        assert!(matches!(err, TreeError::ValueNotFound { side: Side::Left }));
        assert_eq!(tree, before);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn given_empty_tree_when_adding_child_then_fails() {
        let mut tree: BinaryTree<i32> = BinaryTree::new();
        assert!(matches!(
            tree.add_right(&1, 2),
            Err(TreeError::ValueNotFound { side: Side::Right })
        ));
        assert!(tree.is_empty());
    }

    #[test]
    fn given_occupied_slot_when_adding_child_then_overwrites_and_keeps_subtree() {
        let mut tree = sample();
        tree.add_left(&1, 20).unwrap();

        let left = tree.root().unwrap().left().unwrap();
        assert_eq!(*left.value(), 20);
        assert_eq!(left.left().map(Node::value), Some(&4));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_sample_when_measuring_then_reports_depth_and_leaves() {
        let tree = sample();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaves(), vec![&4, &3]);
        assert!(tree.contains(&4));
        assert!(!tree.contains(&5));
    }

    #[test]
    fn given_duplicate_values_when_searching_then_right_subtree_is_searched_first() {
        let mut tree = BinaryTree::new();
        tree.add_root(0).add_left(&0, 7).unwrap().add_right(&0, 7).unwrap();
        tree.add_left(&7, 8).unwrap();

        let root = tree.root().unwrap();
        assert!(root.left().unwrap().is_leaf());
        assert_eq!(root.right().unwrap().left().map(Node::value), Some(&8));
    }

    #[test]
    fn given_tree_when_taking_then_source_is_empty() {
        let mut tree = sample();
        let moved = tree.take();
        assert!(tree.is_empty());
        assert_eq!(moved.len(), 4);
    }

    #[test]
    fn given_tree_when_cloning_then_copy_is_independent() {
        let original = sample();
        let mut copy = original.clone();
        copy.add_root(100);
        copy.add_left(&2, 40).unwrap();

        assert_eq!(original.root_value(), Some(&1));
        assert!(original.contains(&4));
        assert!(!original.contains(&40));
        assert_eq!(copy.root_value(), Some(&100));
    }

    #[test]
    fn given_sample_when_displaying_then_renders_in_search_order() {
        let rendered = sample().to_string();
        assert_eq!(rendered, "1<2,3>\n3<None,None>\n2<4,None>\n4<None,None>\n");
    }

    #[test]
    fn given_empty_tree_when_displaying_then_renders_nothing() {
        let tree: BinaryTree<String> = BinaryTree::new();
        assert_eq!(tree.to_string(), "");
    }
}
