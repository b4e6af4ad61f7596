use std::fmt;

/// Child slot of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Owning handle for a child subtree, `None` when the slot is empty.
pub type Link<T> = Option<Box<Node<T>>>;

/// Single tree cell owning a value and up to two child subtrees.
///
/// Ownership is strictly downward: a node owns its children exclusively, so the
/// node graph is always a tree. `Clone` deep-copies the whole subtree and
/// dropping a node drops everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    pub fn child(&self, side: Side) -> Option<&Node<T>> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    pub(crate) fn slot_mut(&mut self, side: Side) -> &mut Link<T> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
