//! Adaptable priority queue on a linked complete binary tree
//!
//! This crate provides [`LinkedHeap`](linked_heap::LinkedHeap), a min-heap whose
//! entries are addressed by handles: any entry can be removed, re-keyed or
//! have its value replaced, not just the minimum.
//!
//! The heap is built from pointer-free tree nodes in a generational arena
//! rather than a flat array, so the positions that an array heap derives by
//! index arithmetic (insertion parent, last node) are tracked incrementally by
//! a frontier deque in [`CompleteBinaryTree`](complete::CompleteBinaryTree).
//!
//! # Modules
//!
//! - [`tree`]: arena-backed linked binary tree with generational positions
//! - [`complete`]: complete-tree shape with O(1) last-node tracking
//! - [`linked_heap`]: the adaptable heap itself
//! - [`compare`]: key orderings and key-domain checks
//!
//! # Example
//!
//! ```rust
//! use linked_heap::linked_heap::LinkedHeap;
//! use linked_heap::HeapError;
//!
//! let mut heap = LinkedHeap::new();
//! let job = heap.insert(30, "rebuild index").unwrap();
//! heap.insert(10, "flush log").unwrap();
//! heap.insert(20, "compact").unwrap();
//!
//! // Bump the rebuild to the front of the queue
//! heap.replace_key(&job, 5).unwrap();
//! assert_eq!(heap.remove_min().unwrap().value(), &"rebuild index");
//!
//! // The handle is dead once its entry leaves the heap
//! assert_eq!(heap.remove(&job), Err(HeapError::InvalidEntry));
//! ```
//!
//! # Features
//!
//! - `tracing`: emit `tracing` events for structural edits and rejected
//!   operations. Off by default.

pub mod compare;
pub mod complete;
pub mod linked_heap;
pub mod traits;
pub mod tree;

// Re-export the main traits for convenience
pub use traits::{AdaptableHeap, Heap, HeapError};
