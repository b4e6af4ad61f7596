use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::node::{Node, Side};
use crate::tree::BinaryTree;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: Display> TreeNodeConvert for Node<T> {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = [Side::Left, Side::Right]
            .into_iter()
            .filter_map(|side| {
                self.child(side).map(|child| {
                    let mut subtree = child.to_tree_string();
                    subtree.root = format!("{}: {}", side_tag(side), subtree.root);
                    subtree
                })
            })
            .collect();

        Tree::new(self.value().to_string()).with_leaves(leaves)
    }
}

impl<T: Display> TreeNodeConvert for BinaryTree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => root.to_tree_string(),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

fn side_tag(side: Side) -> &'static str {
    match side {
        Side::Left => "L",
        Side::Right => "R",
    }
}
