//! Complete binary tree with O(1) last-node tracking
//!
//! An array heap finds its insertion point and its last node by index
//! arithmetic. A linked tree has no indices, so [`CompleteBinaryTree`] keeps a
//! *frontier*: every position with fewer than two children, in level order.
//!
//! - The front of the frontier is the parent of the next insertion
//! - The back of the frontier is the current last node
//!
//! # Transitions
//!
//! **add**: attach under the front. If it was a left child, the front still
//! lacks a right child and stays; if it was a right child, the front is now
//! full and is popped. The new node is pushed to the back.
//!
//! **remove_last**: pop the back. If the removed node was a right child, its
//! parent has a free slot again and has the lowest level-order index of any
//! open parent, so it is pushed back onto the *front*. A left child's parent
//! never left the front.
//!
//! Both transitions are O(1) worst-case.

use crate::tree::{LinkedBinaryTree, Position, TreeError};
use std::collections::VecDeque;
use std::ops::Index;

/// A complete binary tree that only grows and shrinks at its last node
///
/// # Example
///
/// ```rust
/// use linked_heap::complete::CompleteBinaryTree;
///
/// let mut tree = CompleteBinaryTree::new();
/// let root = tree.add('a').unwrap();
/// let b = tree.add('b').unwrap();
/// let c = tree.add('c').unwrap();
///
/// assert_eq!(tree.tree().left(root), Some(b));
/// assert_eq!(tree.tree().right(root), Some(c));
/// assert_eq!(tree.last(), Some(c));
/// assert_eq!(tree.next_parent(), Some(b));
///
/// assert_eq!(tree.remove_last(), Ok((c, 'c')));
/// assert_eq!(tree.next_parent(), Some(root));
/// ```
#[derive(Debug, Clone)]
pub struct CompleteBinaryTree<E> {
    tree: LinkedBinaryTree<E>,
    /// Positions with fewer than two children, in level order
    frontier: VecDeque<Position>,
}

impl<E> CompleteBinaryTree<E> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            tree: LinkedBinaryTree::new(),
            frontier: VecDeque::new(),
        }
    }

    /// Creates an empty tree with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: LinkedBinaryTree::with_capacity(capacity),
            // Leaves plus at most one half-full parent
            frontier: VecDeque::with_capacity(capacity / 2 + 1),
        }
    }

    /// The underlying linked tree, for navigation
    pub fn tree(&self) -> &LinkedBinaryTree<E> {
        &self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn root(&self) -> Option<Position> {
        self.tree.root()
    }

    /// Position the next [`add`](Self::add) attaches under; `None` when empty
    pub fn next_parent(&self) -> Option<Position> {
        self.frontier.front().copied()
    }

    /// The current last node in level order; `None` when empty
    pub fn last(&self) -> Option<Position> {
        self.frontier.back().copied()
    }

    pub fn get(&self, position: Position) -> Option<&E> {
        self.tree.get(position)
    }

    /// Exchanges the elements at two positions
    ///
    /// # Errors
    /// `TreeError::InvalidPosition` if either position is not in the tree.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), TreeError> {
        self.tree.swap(a, b)
    }

    /// Adds `element` just after the last node, returning its position
    ///
    /// # Time Complexity
    /// O(1) worst-case
    pub fn add(&mut self, element: E) -> Result<Position, TreeError> {
        let position = match self.frontier.front().copied() {
            None => self.tree.attach_root(element)?,
            Some(parent) if !self.tree.has_left(parent) => {
                self.tree.attach_left(parent, element)?
            }
            Some(parent) => {
                let position = self.tree.attach_right(parent, element)?;
                self.frontier.pop_front();
                position
            }
        };
        self.frontier.push_back(position);

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.tree.len(), frontier = self.frontier.len(), "attached last node");

        Ok(position)
    }

    /// Removes the last node, returning its former position and element
    ///
    /// # Errors
    /// `TreeError::EmptyTree` if there is no node to remove.
    ///
    /// # Time Complexity
    /// O(1) worst-case
    pub fn remove_last(&mut self) -> Result<(Position, E), TreeError> {
        let last = self.frontier.back().copied().ok_or(TreeError::EmptyTree)?;
        let parent = self.tree.parent(last);
        let was_right = parent.is_some_and(|p| self.tree.right(p) == Some(last));

        let element = self.tree.detach(last)?;
        self.frontier.pop_back();
        if let (Some(parent), true) = (parent, was_right) {
            // The parent can take a right child again
            self.frontier.push_front(parent);

            #[cfg(feature = "tracing")]
            tracing::trace!(?parent, "reopened parent at frontier front");
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.tree.len(), frontier = self.frontier.len(), "retired last node");

        Ok((last, element))
    }

    /// Number of positions currently on the frontier
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Checks shape and frontier consistency
    ///
    /// Walks the tree in level order and verifies that:
    /// - parent/child links agree in both directions
    /// - no node appears after the first missing child slot (completeness)
    /// - the frontier is exactly the nodes with fewer than two children, in order
    ///
    /// Intended for tests; runs in O(n).
    pub fn verify_complete(&self) -> bool {
        let Some(root) = self.tree.root() else {
            return self.frontier.is_empty() && self.tree.len() == 0;
        };

        let mut queue = VecDeque::from([root]);
        let mut open = Vec::new();
        let mut seen_gap = false;
        let mut count = 0;

        while let Some(position) = queue.pop_front() {
            count += 1;
            for child in [self.tree.left(position), self.tree.right(position)] {
                match child {
                    Some(child) => {
                        if seen_gap || self.tree.parent(child) != Some(position) {
                            return false;
                        }
                        queue.push_back(child);
                    }
                    None => seen_gap = true,
                }
            }
            if !(self.tree.has_left(position) && self.tree.has_right(position)) {
                open.push(position);
            }
        }

        count == self.tree.len() && self.frontier.iter().copied().eq(open)
    }
}

impl<E> Default for CompleteBinaryTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Index<Position> for CompleteBinaryTree<E> {
    type Output = E;

    fn index(&self, position: Position) -> &E {
        &self.tree[position]
    }
}
