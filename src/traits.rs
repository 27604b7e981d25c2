//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for priority queues:
//!
//! - [`Heap`]: Base trait for push / peek / pop on `(key, value)` pairs
//! - [`AdaptableHeap`]: Extended trait adding handle-based removal and key change
//!
//! The base [`Heap`] trait mirrors the usual `BinaryHeap` shape (except that it
//! is a min-heap), while [`AdaptableHeap`] adds the locator operations needed
//! by algorithms like Dijkstra's shortest path.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap holds no entries
    EmptyStructure,
    /// The handle belongs to another heap or its entry was already removed
    InvalidEntry,
    /// The key is outside the comparator's domain
    InvalidKey,
    /// The operation is not allowed in the heap's current state
    IllegalState,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyStructure => write!(f, "heap is empty"),
            HeapError::InvalidEntry => {
                write!(f, "entry is not in this heap (foreign or already removed)")
            }
            HeapError::InvalidKey => write!(f, "key is not accepted by the comparator"),
            HeapError::IllegalState => {
                write!(f, "operation requires an empty heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an entry in the heap, used for remove and key/value replacement
///
/// This is an opaque type that identifies a specific entry in a specific heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// Entries are `(key, value)` pairs ordered by key; the smallest key is
/// returned first.
///
/// # Example
///
/// ```rust
/// use linked_heap::Heap;
/// use linked_heap::linked_heap::LinkedHeap;
///
/// let mut heap: LinkedHeap<i32, &str> = Heap::new();
/// heap.push(3, "three").unwrap();
/// heap.push(1, "one").unwrap();
/// heap.push(2, "two").unwrap();
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<K, V> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of entries in the heap
    fn len(&self) -> usize;

    /// Inserts a key-value pair
    ///
    /// # Errors
    /// Returns `HeapError::InvalidKey` if the key is rejected by the heap's ordering.
    fn push(&mut self, key: K, value: V) -> Result<(), HeapError>;

    /// Returns the minimum key and its value without removing them
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<(&K, &V)>;

    /// Removes and returns the minimum key and its value
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Option<(K, V)>;
}

/// Extended heap trait with locator (handle) support
///
/// - `insert` returns a handle naming the inserted entry
/// - `remove`, `replace_key` and `replace_value` act on that entry wherever it
///   currently sits in the heap
///
/// # Example
///
/// ```rust
/// use linked_heap::{AdaptableHeap, Heap};
/// use linked_heap::linked_heap::LinkedHeap;
///
/// let mut heap: LinkedHeap<i32, &str> = Heap::new();
/// let handle = heap.insert(10, "item").unwrap();
/// heap.replace_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait AdaptableHeap<K, V>: Heap<K, V> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts a key-value pair, returning a handle to the new entry
    ///
    /// # Errors
    /// Returns `HeapError::InvalidKey` if the key is rejected by the heap's ordering.
    fn insert(&mut self, key: K, value: V) -> Result<Self::Handle, HeapError>;

    /// Removes the entry named by the handle, returning its key and value
    ///
    /// # Errors
    /// Returns `HeapError::InvalidEntry` if the handle is foreign or stale.
    fn remove(&mut self, handle: &Self::Handle) -> Result<(K, V), HeapError>;

    /// Replaces the entry's key, returning the old key
    ///
    /// The new key may be smaller or larger than the old one.
    ///
    /// # Errors
    /// Returns `HeapError::InvalidEntry` for a foreign or stale handle, then
    /// `HeapError::InvalidKey` if the new key is rejected.
    fn replace_key(&mut self, handle: &Self::Handle, key: K) -> Result<K, HeapError>;

    /// Replaces the entry's value, returning the old value
    ///
    /// # Errors
    /// Returns `HeapError::InvalidEntry` if the handle is foreign or stale.
    fn replace_value(&mut self, handle: &Self::Handle, value: V) -> Result<V, HeapError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(HeapError::EmptyStructure.to_string(), "heap is empty");
        assert_eq!(
            HeapError::InvalidKey.to_string(),
            "key is not accepted by the comparator"
        );
        assert!(HeapError::InvalidEntry.to_string().contains("already removed"));
        assert!(HeapError::IllegalState.to_string().contains("empty heap"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(HeapError::IllegalState);
        assert!(err.source().is_none());
    }
}
