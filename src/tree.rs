//! Arena-backed linked binary tree
//!
//! [`LinkedBinaryTree`] stores its nodes in a [`slotmap::SlotMap`], so node
//! links are generational keys rather than pointers:
//!
//! - No reference cycles between parents and children
//! - A [`Position`] from a detached node never resolves to a later node
//! - Every navigation step is a single O(1) arena lookup
//!
//! The tree only offers the primitive edits a heap needs: attaching a node in
//! an empty child slot and detaching a leaf. Shape policy (completeness) lives
//! one level up in [`CompleteBinaryTree`](crate::complete::CompleteBinaryTree).

use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::mem;
use std::ops::Index;

new_key_type! {
    /// Handle to one slot of a [`LinkedBinaryTree`]
    pub struct Position;
}

/// Error type for structural tree edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The tree has no nodes
    EmptyTree,
    /// A root was attached to a tree that already has one
    NonEmptyTree,
    /// The position does not name a node of this tree
    InvalidPosition,
    /// The requested child slot is already occupied
    OccupiedChild,
    /// Only leaves can be detached
    NotALeaf,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::EmptyTree => write!(f, "tree is empty"),
            TreeError::NonEmptyTree => write!(f, "tree already has a root"),
            TreeError::InvalidPosition => write!(f, "position is not in this tree"),
            TreeError::OccupiedChild => write!(f, "child slot is already occupied"),
            TreeError::NotALeaf => write!(f, "position still has children"),
        }
    }
}

impl std::error::Error for TreeError {}

#[derive(Debug, Clone)]
struct Node<E> {
    element: E,
    parent: Option<Position>,
    left: Option<Position>,
    right: Option<Position>,
}

impl<E> Node<E> {
    fn new(element: E, parent: Option<Position>) -> Self {
        Node {
            element,
            parent,
            left: None,
            right: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// A binary tree whose nodes live in a generational arena
///
/// # Example
///
/// ```rust
/// use linked_heap::tree::LinkedBinaryTree;
///
/// let mut tree = LinkedBinaryTree::new();
/// let root = tree.attach_root("root").unwrap();
/// let left = tree.attach_left(root, "left").unwrap();
///
/// assert_eq!(tree.parent(left), Some(root));
/// assert_eq!(tree[left], "left");
/// assert_eq!(tree.detach(left), Ok("left"));
/// assert!(!tree.contains(left));
/// ```
#[derive(Debug, Clone)]
pub struct LinkedBinaryTree<E> {
    nodes: SlotMap<Position, Node<E>>,
    root: Option<Position>,
}

impl<E> LinkedBinaryTree<E> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    /// Creates an empty tree with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            root: None,
        }
    }

    /// Returns true if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the root position, if any
    pub fn root(&self) -> Option<Position> {
        self.root
    }

    /// Returns true if `position` names a node of this tree
    pub fn contains(&self, position: Position) -> bool {
        self.nodes.contains_key(position)
    }

    /// Returns true if `position` is the root
    pub fn is_root(&self, position: Position) -> bool {
        self.root == Some(position)
    }

    /// Parent of `position`; `None` for the root or an unknown position
    pub fn parent(&self, position: Position) -> Option<Position> {
        self.nodes.get(position).and_then(|node| node.parent)
    }

    /// Left child of `position`
    pub fn left(&self, position: Position) -> Option<Position> {
        self.nodes.get(position).and_then(|node| node.left)
    }

    /// Right child of `position`
    pub fn right(&self, position: Position) -> Option<Position> {
        self.nodes.get(position).and_then(|node| node.right)
    }

    pub fn has_left(&self, position: Position) -> bool {
        self.left(position).is_some()
    }

    pub fn has_right(&self, position: Position) -> bool {
        self.right(position).is_some()
    }

    /// Element stored at `position`
    pub fn get(&self, position: Position) -> Option<&E> {
        self.nodes.get(position).map(|node| &node.element)
    }

    /// Mutable element stored at `position`
    pub fn get_mut(&mut self, position: Position) -> Option<&mut E> {
        self.nodes.get_mut(position).map(|node| &mut node.element)
    }

    /// Attaches `element` as the root of an empty tree
    ///
    /// # Errors
    /// `TreeError::NonEmptyTree` if a root already exists.
    pub fn attach_root(&mut self, element: E) -> Result<Position, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::NonEmptyTree);
        }
        let position = self.nodes.insert(Node::new(element, None));
        self.root = Some(position);
        Ok(position)
    }

    /// Attaches `element` as the left child of `parent`
    ///
    /// # Errors
    /// `TreeError::InvalidPosition` for an unknown parent,
    /// `TreeError::OccupiedChild` if the left slot is taken.
    pub fn attach_left(&mut self, parent: Position, element: E) -> Result<Position, TreeError> {
        self.attach(parent, element, Side::Left)
    }

    /// Attaches `element` as the right child of `parent`
    ///
    /// # Errors
    /// `TreeError::InvalidPosition` for an unknown parent,
    /// `TreeError::OccupiedChild` if the right slot is taken.
    pub fn attach_right(&mut self, parent: Position, element: E) -> Result<Position, TreeError> {
        self.attach(parent, element, Side::Right)
    }

    fn attach(&mut self, parent: Position, element: E, side: Side) -> Result<Position, TreeError> {
        let slot = match self.nodes.get(parent) {
            None => return Err(TreeError::InvalidPosition),
            Some(node) => match side {
                Side::Left => node.left,
                Side::Right => node.right,
            },
        };
        if slot.is_some() {
            return Err(TreeError::OccupiedChild);
        }

        let child = self.nodes.insert(Node::new(element, Some(parent)));
        if let Some(node) = self.nodes.get_mut(parent) {
            match side {
                Side::Left => node.left = Some(child),
                Side::Right => node.right = Some(child),
            }
        }
        Ok(child)
    }

    /// Removes the leaf at `position`, returning its element
    ///
    /// The position is invalidated; later lookups with it return `None`.
    ///
    /// # Errors
    /// `TreeError::InvalidPosition` for an unknown position,
    /// `TreeError::NotALeaf` if it still has children.
    pub fn detach(&mut self, position: Position) -> Result<E, TreeError> {
        let node = self.nodes.get(position).ok_or(TreeError::InvalidPosition)?;
        if node.left.is_some() || node.right.is_some() {
            return Err(TreeError::NotALeaf);
        }

        let node = self
            .nodes
            .remove(position)
            .ok_or(TreeError::InvalidPosition)?;
        match node.parent {
            None => self.root = None,
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    if parent_node.left == Some(position) {
                        parent_node.left = None;
                    } else if parent_node.right == Some(position) {
                        parent_node.right = None;
                    }
                }
            }
        }
        Ok(node.element)
    }

    /// Exchanges the elements stored at `a` and `b`; links are untouched
    ///
    /// # Errors
    /// `TreeError::InvalidPosition` if either position is not in the tree.
    /// Nothing is swapped in that case.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), TreeError> {
        if a == b {
            return if self.contains(a) {
                Ok(())
            } else {
                Err(TreeError::InvalidPosition)
            };
        }
        let [x, y] = self
            .nodes
            .get_disjoint_mut([a, b])
            .ok_or(TreeError::InvalidPosition)?;
        mem::swap(&mut x.element, &mut y.element);
        Ok(())
    }
}

impl<E> Default for LinkedBinaryTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Index<Position> for LinkedBinaryTree<E> {
    type Output = E;

    /// # Panics
    /// Panics if `position` is not in the tree.
    fn index(&self, position: Position) -> &E {
        &self.nodes[position].element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_and_navigate() {
        let mut tree = LinkedBinaryTree::new();
        assert!(tree.is_empty());

        let root = tree.attach_root(1).unwrap();
        let left = tree.attach_left(root, 2).unwrap();
        let right = tree.attach_right(root, 3).unwrap();

        assert_eq!(tree.len(), 3);
        assert!(tree.is_root(root));
        assert!(!tree.is_root(left));
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.left(root), Some(left));
        assert_eq!(tree.right(root), Some(right));
        assert_eq!(tree.parent(left), Some(root));
        assert_eq!(tree.parent(root), None);
        assert!(tree.has_left(root) && tree.has_right(root));
        assert!(!tree.has_left(left));
        assert_eq!(tree.get(right), Some(&3));
    }

    #[test]
    fn test_attach_errors() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.attach_root("a").unwrap();
        assert_eq!(tree.attach_root("b"), Err(TreeError::NonEmptyTree));

        tree.attach_left(root, "b").unwrap();
        assert_eq!(tree.attach_left(root, "c"), Err(TreeError::OccupiedChild));

        let leaf = tree.attach_right(root, "c").unwrap();
        tree.detach(leaf).unwrap();
        assert_eq!(tree.attach_left(leaf, "d"), Err(TreeError::InvalidPosition));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_detach_only_leaves() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.attach_root(10).unwrap();
        let left = tree.attach_left(root, 20).unwrap();

        assert_eq!(tree.detach(root), Err(TreeError::NotALeaf));
        assert_eq!(tree.detach(left), Ok(20));
        assert!(!tree.has_left(root));
        assert_eq!(tree.detach(left), Err(TreeError::InvalidPosition));
        assert_eq!(tree.detach(root), Ok(10));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_stale_position_does_not_alias() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.attach_root(1).unwrap();
        let old = tree.attach_left(root, 2).unwrap();
        tree.detach(old).unwrap();

        // The arena slot is reused, but with a new generation
        let new = tree.attach_left(root, 3).unwrap();
        assert_ne!(old, new);
        assert_eq!(tree.get(old), None);
        assert_eq!(tree.parent(old), None);
        assert_eq!(tree[new], 3);
    }

    #[test]
    fn test_swap_elements_keeps_links() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.attach_root('r').unwrap();
        let left = tree.attach_left(root, 'l').unwrap();

        tree.swap(root, left).unwrap();
        assert_eq!(tree[root], 'l');
        assert_eq!(tree[left], 'r');
        assert_eq!(tree.parent(left), Some(root));

        tree.swap(left, left).unwrap();
        assert_eq!(tree[left], 'r');

        *tree.get_mut(root).unwrap() = 'x';
        assert_eq!(tree[root], 'x');
    }

    #[test]
    fn test_swap_stale_position_fails() {
        let mut tree = LinkedBinaryTree::new();
        let root = tree.attach_root(0).unwrap();
        let leaf = tree.attach_left(root, 1).unwrap();
        tree.detach(leaf).unwrap();

        assert_eq!(tree.swap(root, leaf), Err(TreeError::InvalidPosition));
        assert_eq!(tree.swap(leaf, leaf), Err(TreeError::InvalidPosition));
        assert_eq!(tree[root], 0);
    }
}
