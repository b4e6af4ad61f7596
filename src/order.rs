use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Depth-first linearization of a binary tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    /// Node, then left subtree, then right subtree
    #[serde(rename = "pre")]
    PreOrder,
    /// Left subtree, then node, then right subtree
    #[default]
    #[serde(rename = "in")]
    InOrder,
    /// Left subtree, then right subtree, then node
    #[serde(rename = "post")]
    PostOrder,
}

impl Order {
    pub const ALL: [Order; 3] = [Order::PreOrder, Order::InOrder, Order::PostOrder];

    pub fn name(&self) -> &'static str {
        match self {
            Order::PreOrder => "pre-order",
            Order::InOrder => "in-order",
            Order::PostOrder => "post-order",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pre" | "preorder" | "pre-order" => Ok(Order::PreOrder),
            "in" | "inorder" | "in-order" => Ok(Order::InOrder),
            "post" | "postorder" | "post-order" => Ok(Order::PostOrder),
            other => Err(format!("unknown traversal order: {other}")),
        }
    }
}
