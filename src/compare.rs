//! Key orderings for the heap
//!
//! A [`Comparator`] totally orders keys and may restrict which keys it accepts.
//! Restricting the domain is how a heap rejects unusable keys (for example NaN
//! floats) with [`HeapError::InvalidKey`](crate::traits::HeapError::InvalidKey)
//! instead of silently corrupting its order.
//!
//! Provided orderings:
//!
//! | Comparator       | Keys        | Order                          |
//! |------------------|-------------|--------------------------------|
//! | [`NaturalOrder`] | `K: Ord`    | ascending (min-heap)           |
//! | [`ReverseOrder`] | `K: Ord`    | descending (max-heap)          |
//! | [`FloatOrder`]   | `f32`/`f64` | ascending, NaN rejected        |
//! | closures         | any         | `Fn(&K, &K) -> Ordering`       |

use std::cmp::Ordering;

/// A total order over keys of type `K`
pub trait Comparator<K> {
    /// Compares two keys
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Returns true if `key` belongs to this comparator's domain
    ///
    /// The default accepts every key.
    fn accepts(&self, _key: &K) -> bool {
        true
    }
}

/// Ascending order for any `Ord` key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Descending order for any `Ord` key, turning the heap into a max-heap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseOrder;

impl<K: Ord> Comparator<K> for ReverseOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

/// Ascending order for floating-point keys
///
/// NaN has no place in a min-heap, so it is rejected by [`Comparator::accepts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatOrder;

impl Comparator<f64> for FloatOrder {
    #[inline]
    fn compare(&self, a: &f64, b: &f64) -> Ordering {
        a.total_cmp(b)
    }

    fn accepts(&self, key: &f64) -> bool {
        !key.is_nan()
    }
}

impl Comparator<f32> for FloatOrder {
    #[inline]
    fn compare(&self, a: &f32, b: &f32) -> Ordering {
        a.total_cmp(b)
    }

    fn accepts(&self, key: &f32) -> bool {
        !key.is_nan()
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
