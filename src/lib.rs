//! Generic binary tree container.
//!
//! Nodes are attached explicitly by the caller, keyed by the value of an
//! existing node, and the tree is walked through cursors over a materialized
//! pre-, in- or post-order sequence.

pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod node;
pub mod order;
pub mod script;
pub mod traversal;
pub mod tree;
pub mod tree_traits;
pub mod util;

pub use errors::{TreeError, TreeResult};
pub use node::{Link, Node, Side};
pub use order::Order;
pub use traversal::{load_order, Cursor, OrderCache};
pub use tree::BinaryTree;
pub use tree_traits::TreeNodeConvert;
