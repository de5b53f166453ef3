//! `SortedVecSet` - a sorted vector set for low-degree vertices.
//!
//! Lookups are a binary search; insertion and removal shift the tail of the
//! vector, which is cheap while the set stays below [`BLOCK_SIZE`](super::BLOCK_SIZE).

use core::slice;

use super::intersect_sorted;
use crate::error::{GraphError, Result};
use crate::vertex_id::VertexId;

/// A single sorted, duplicate-free vector of identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedVecSet<T> {
    items: Vec<T>,
}

/// The low-degree adjacency layout.
pub type SmallSet<T> = SortedVecSet<T>;

impl<T> SortedVecSet<T> {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty set with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The elements in ascending order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the elements in ascending order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the set, returning its sorted elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Wraps `items` as-is, even if they are unsorted or repeated.
    #[cfg(any(test, feature = "diagnostics"))]
    pub fn from_vec_unchecked(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: VertexId> SortedVecSet<T> {
    /// Builds a set from elements that are already strictly ascending.
    pub(crate) fn from_sorted_vec(items: Vec<T>) -> Self {
        debug_assert!(super::is_strictly_ascending(&items));
        Self { items }
    }

    /// Inserts `id`, keeping the vector sorted.
    ///
    /// Returns `Ok(false)` if `id` was already present.
    pub fn add(&mut self, id: T) -> Result<bool> {
        if !id.is_defined() {
            return Err(GraphError::UndefinedElement);
        }
        match self.items.binary_search(&id) {
            Ok(_) => Ok(false),
            Err(pos) => {
                self.items.insert(pos, id);
                Ok(true)
            }
        }
    }

    /// Removes `id`. Returns `Ok(false)` if it was absent.
    pub fn remove(&mut self, id: &T) -> Result<bool> {
        if !id.is_defined() {
            return Err(GraphError::UndefinedElement);
        }
        match self.items.binary_search(id) {
            Ok(pos) => {
                self.items.remove(pos);
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    /// Returns `true` if `id` is present.
    #[inline]
    pub fn contains(&self, id: &T) -> bool {
        self.items.binary_search(id).is_ok()
    }

    /// Returns an owned copy of the elements in ascending order.
    pub fn list(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Returns the elements present in both sets, ascending.
    pub fn intersect(&self, other: &Self) -> Vec<T> {
        intersect_sorted(&self.items, &other.items)
    }
}

impl<T> Default for SortedVecSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a SortedVecSet<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
