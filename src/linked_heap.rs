//! Adaptable min-heap on a linked complete binary tree
//!
//! [`LinkedHeap`] is a locator-based priority queue: `insert` returns an
//! [`EntryHandle`] that can later remove the entry or change its key or value,
//! wherever the entry currently sits.
//!
//! # Time Complexity
//!
//! | Operation       | Complexity |
//! |-----------------|------------|
//! | `insert`        | O(log n)   |
//! | `remove_min`    | O(log n)   |
//! | `remove`        | O(log n)   |
//! | `replace_key`   | O(log n)   |
//! | `replace_value` | O(1)       |
//! | `min`           | O(1)       |
//! | `len`           | O(1)       |
//!
//! # Layout
//!
//! Entries live in a generational arena; each remembers the tree position
//! that holds it. The tree is a [`CompleteBinaryTree`] whose slots store entry
//! keys. Restoring heap order swaps the contents of two slots and rewrites
//! both entries' back-references, so tree positions stay put while a handle
//! keeps following its own key and value.

use crate::compare::{Comparator, NaturalOrder};
use crate::complete::CompleteBinaryTree;
use crate::traits::{AdaptableHeap, Handle, Heap, HeapError};
use crate::tree::{Position, TreeError};
use slotmap::{new_key_type, SlotMap};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

new_key_type! {
    struct EntryKey;
}

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

impl From<TreeError> for HeapError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::EmptyTree => HeapError::EmptyStructure,
            TreeError::NonEmptyTree
            | TreeError::InvalidPosition
            | TreeError::OccupiedChild
            | TreeError::NotALeaf => HeapError::InvalidEntry,
        }
    }
}

/// A key-value pair stored in a [`LinkedHeap`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry, returning `(key, value)`
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Handle to an entry in a [`LinkedHeap`]
///
/// A handle is bound to the heap that issued it. It stays valid while its
/// entry is in the heap, regardless of how often the entry moves, and is
/// rejected with [`HeapError::InvalidEntry`] once the entry is removed or when
/// presented to another heap, including a clone of the issuing heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle {
    heap: u64,
    key: EntryKey,
}

impl Handle for EntryHandle {}

#[derive(Debug, Clone)]
struct Located<K, V> {
    entry: Entry<K, V>,
    /// Tree slot currently holding this entry
    position: Position,
}

/// Adaptable min-heap ordered by a [`Comparator`]
///
/// # Example
///
/// ```rust
/// use linked_heap::linked_heap::LinkedHeap;
///
/// let mut heap = LinkedHeap::new();
/// let a = heap.insert(5, "a").unwrap();
/// let b = heap.insert(3, "b").unwrap();
/// heap.insert(8, "c").unwrap();
///
/// heap.replace_key(&a, 1).unwrap();
/// assert_eq!(heap.min().unwrap().value(), &"a");
///
/// let removed = heap.remove(&b).unwrap();
/// assert_eq!(removed.into_parts(), (3, "b"));
///
/// assert_eq!(heap.remove_min().unwrap().key(), &1);
/// assert_eq!(heap.remove_min().unwrap().key(), &8);
/// assert!(heap.is_empty());
/// ```
#[derive(Debug)]
pub struct LinkedHeap<K, V, C = NaturalOrder> {
    id: u64,
    tree: CompleteBinaryTree<EntryKey>,
    entries: SlotMap<EntryKey, Located<K, V>>,
    comparator: C,
}

impl<K: Ord, V> LinkedHeap<K, V> {
    /// Creates an empty heap ordered by `K: Ord`
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates an empty heap ordered by `K: Ord` with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K, V, C: Comparator<K>> LinkedHeap<K, V, C> {
    /// Creates an empty heap ordered by `comparator`
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            id: NEXT_HEAP_ID.fetch_add(1, AtomicOrdering::Relaxed),
            tree: CompleteBinaryTree::new(),
            entries: SlotMap::with_key(),
            comparator,
        }
    }

    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            id: NEXT_HEAP_ID.fetch_add(1, AtomicOrdering::Relaxed),
            tree: CompleteBinaryTree::with_capacity(capacity),
            entries: SlotMap::with_capacity_and_key(capacity),
            comparator,
        }
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the heap holds no entries
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Replaces the comparator
    ///
    /// # Errors
    /// `HeapError::IllegalState` unless the heap is empty, since existing
    /// entries were ordered by the old comparator.
    pub fn set_comparator(&mut self, comparator: C) -> Result<(), HeapError> {
        if !self.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(len = self.len(), "rejected comparator change on non-empty heap");
            return Err(HeapError::IllegalState);
        }
        self.comparator = comparator;
        Ok(())
    }

    /// Returns the entry with the minimum key
    ///
    /// # Errors
    /// `HeapError::EmptyStructure` if the heap is empty.
    pub fn min(&self) -> Result<&Entry<K, V>, HeapError> {
        let root = self.tree.root().ok_or(HeapError::EmptyStructure)?;
        Ok(&self.entries[self.tree[root]].entry)
    }

    /// Returns the entry named by `handle`
    ///
    /// # Errors
    /// `HeapError::InvalidEntry` for a foreign or stale handle.
    pub fn get(&self, handle: &EntryHandle) -> Result<&Entry<K, V>, HeapError> {
        self.locate(handle)?;
        Ok(&self.entries[handle.key].entry)
    }

    /// Returns true if `handle` names an entry currently in this heap
    pub fn contains(&self, handle: &EntryHandle) -> bool {
        self.locate(handle).is_ok()
    }

    /// Distance from the root to the slot holding the entry (root = 0)
    ///
    /// # Errors
    /// `HeapError::InvalidEntry` for a foreign or stale handle.
    pub fn depth(&self, handle: &EntryHandle) -> Result<usize, HeapError> {
        let tree = self.tree.tree();
        let mut position = self.locate(handle)?;
        let mut depth = 0;
        while let Some(parent) = tree.parent(position) {
            position = parent;
            depth += 1;
        }
        Ok(depth)
    }

    /// Inserts a key-value pair and returns a handle to the new entry
    ///
    /// # Errors
    /// `HeapError::InvalidKey` if the comparator does not accept `key`; the
    /// heap is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<EntryHandle, HeapError> {
        if !self.comparator.accepts(&key) {
            #[cfg(feature = "tracing")]
            tracing::debug!("rejected key outside comparator domain");
            return Err(HeapError::InvalidKey);
        }

        let entry_key = self.entries.insert(Located {
            entry: Entry { key, value },
            position: Position::default(),
        });
        let position = match self.tree.add(entry_key) {
            Ok(position) => position,
            Err(err) => {
                self.entries.remove(entry_key);
                return Err(err.into());
            }
        };
        self.entries[entry_key].position = position;
        self.up_heap(position)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(heap = self.id, len = self.len(), "inserted entry");

        Ok(EntryHandle {
            heap: self.id,
            key: entry_key,
        })
    }

    /// Removes and returns the entry with the minimum key
    ///
    /// # Errors
    /// `HeapError::EmptyStructure` if the heap is empty.
    pub fn remove_min(&mut self) -> Result<Entry<K, V>, HeapError> {
        let (root, last) = match (self.tree.root(), self.tree.last()) {
            (Some(root), Some(last)) => (root, last),
            _ => return Err(HeapError::EmptyStructure),
        };

        if root != last {
            self.swap(root, last)?;
        }
        let (_, entry_key) = self.tree.remove_last()?;
        if !self.tree.is_empty() {
            self.down_heap(root)?;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(heap = self.id, len = self.len(), "removed minimum");

        self.take(entry_key)
    }

    /// Removes and returns the entry named by `handle`
    ///
    /// # Errors
    /// `HeapError::InvalidEntry` for a foreign or stale handle.
    pub fn remove(&mut self, handle: &EntryHandle) -> Result<Entry<K, V>, HeapError> {
        let position = self.locate(handle)?;
        let last = self.tree.last().ok_or(HeapError::InvalidEntry)?;

        if position != last {
            self.swap(position, last)?;
        }
        let (retired, entry_key) = self.tree.remove_last()?;
        debug_assert_eq!(entry_key, handle.key);

        if !self.tree.is_empty() && retired != position {
            // The former last entry may belong above or below its new slot
            self.up_heap(position)?;
            self.down_heap(position)?;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(heap = self.id, len = self.len(), "removed entry");

        self.take(entry_key)
    }

    /// Replaces the key of the entry named by `handle`, returning the old key
    ///
    /// # Errors
    /// `HeapError::InvalidEntry` for a foreign or stale handle, otherwise
    /// `HeapError::InvalidKey` if the comparator does not accept `key`.
    pub fn replace_key(&mut self, handle: &EntryHandle, key: K) -> Result<K, HeapError> {
        let position = self.locate(handle)?;
        if !self.comparator.accepts(&key) {
            #[cfg(feature = "tracing")]
            tracing::debug!("rejected replacement key outside comparator domain");
            return Err(HeapError::InvalidKey);
        }

        let old = std::mem::replace(&mut self.entries[handle.key].entry.key, key);
        // At most one of these moves the entry
        self.down_heap(position)?;
        self.up_heap(position)?;
        Ok(old)
    }

    /// Replaces the value of the entry named by `handle`, returning the old value
    ///
    /// # Errors
    /// `HeapError::InvalidEntry` for a foreign or stale handle.
    pub fn replace_value(&mut self, handle: &EntryHandle, value: V) -> Result<V, HeapError> {
        self.locate(handle)?;
        Ok(std::mem::replace(
            &mut self.entries[handle.key].entry.value,
            value,
        ))
    }

    /// Checks heap order and every entry/slot back-reference
    ///
    /// Intended for tests; runs in O(n).
    pub fn verify_heap_order(&self) -> bool {
        let tree = self.tree.tree();
        self.entries.iter().all(|(entry_key, located)| {
            if tree.get(located.position) != Some(&entry_key) {
                return false;
            }
            match tree.parent(located.position) {
                None => true,
                Some(parent) => {
                    let parent_key = &self.entries[tree[parent]].entry.key;
                    self.comparator.compare(parent_key, &located.entry.key) != Ordering::Greater
                }
            }
        })
    }

    /// Checks completeness, frontier consistency, and heap order
    ///
    /// Intended for tests; runs in O(n).
    pub fn verify_structure(&self) -> bool {
        self.entries.len() == self.tree.len()
            && self.tree.verify_complete()
            && self.verify_heap_order()
    }

    fn locate(&self, handle: &EntryHandle) -> Result<Position, HeapError> {
        if handle.heap != self.id {
            return Err(HeapError::InvalidEntry);
        }
        self.entries
            .get(handle.key)
            .map(|located| located.position)
            .ok_or(HeapError::InvalidEntry)
    }

    fn take(&mut self, entry_key: EntryKey) -> Result<Entry<K, V>, HeapError> {
        self.entries
            .remove(entry_key)
            .map(|located| located.entry)
            .ok_or(HeapError::InvalidEntry)
    }

    fn key_at(&self, position: Position) -> &K {
        &self.entries[self.tree[position]].entry.key
    }

    fn less(&self, a: Position, b: Position) -> bool {
        self.comparator.compare(self.key_at(a), self.key_at(b)) == Ordering::Less
    }

    /// Exchanges the entries held by two slots and re-points both entries
    fn swap(&mut self, a: Position, b: Position) -> Result<(), HeapError> {
        self.tree.swap(a, b)?;
        let (at_a, at_b) = (self.tree[a], self.tree[b]);
        self.entries[at_a].position = a;
        self.entries[at_b].position = b;
        Ok(())
    }

    fn up_heap(&mut self, mut position: Position) -> Result<(), HeapError> {
        while let Some(parent) = self.tree.tree().parent(position) {
            if !self.less(position, parent) {
                break;
            }
            self.swap(position, parent)?;
            position = parent;
        }
        Ok(())
    }

    fn down_heap(&mut self, mut position: Position) -> Result<(), HeapError> {
        while let Some(left) = self.tree.tree().left(position) {
            let candidate = match self.tree.tree().right(position) {
                Some(right) if self.less(right, left) => right,
                _ => left,
            };
            if !self.less(candidate, position) {
                break;
            }
            self.swap(candidate, position)?;
            position = candidate;
        }
        Ok(())
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for LinkedHeap<K, V, C> {
    /// Copies every entry into a heap with its own identity
    fn clone(&self) -> Self {
        Self {
            id: NEXT_HEAP_ID.fetch_add(1, AtomicOrdering::Relaxed),
            tree: self.tree.clone(),
            entries: self.entries.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<K: Ord, V> Default for LinkedHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K> + Default> Heap<K, V> for LinkedHeap<K, V, C> {
    fn new() -> Self {
        Self::with_comparator(C::default())
    }

    fn is_empty(&self) -> bool {
        LinkedHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        LinkedHeap::len(self)
    }

    fn push(&mut self, key: K, value: V) -> Result<(), HeapError> {
        self.insert(key, value).map(|_| ())
    }

    fn peek(&self) -> Option<(&K, &V)> {
        self.min().ok().map(|entry| (&entry.key, &entry.value))
    }

    fn pop(&mut self) -> Option<(K, V)> {
        self.remove_min().ok().map(Entry::into_parts)
    }
}

impl<K, V, C: Comparator<K> + Default> AdaptableHeap<K, V> for LinkedHeap<K, V, C> {
    type Handle = EntryHandle;

    fn insert(&mut self, key: K, value: V) -> Result<EntryHandle, HeapError> {
        LinkedHeap::insert(self, key, value)
    }

    fn remove(&mut self, handle: &EntryHandle) -> Result<(K, V), HeapError> {
        LinkedHeap::remove(self, handle).map(Entry::into_parts)
    }

    fn replace_key(&mut self, handle: &EntryHandle, key: K) -> Result<K, HeapError> {
        LinkedHeap::replace_key(self, handle, key)
    }

    fn replace_value(&mut self, handle: &EntryHandle, value: V) -> Result<V, HeapError> {
        LinkedHeap::replace_value(self, handle, value)
    }
}
