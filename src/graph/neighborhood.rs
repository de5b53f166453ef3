//! Degree-adaptive adjacency sets.
//!
//! A [`Neighborhood`] is a closed choice between the two sorted layouts in
//! [`collections::sorted`](crate::collections::sorted). The graph decides when to
//! switch; conversion consumes the old layout and builds the new one from its
//! sorted contents.

use core::fmt;
use core::iter::FusedIterator;
use core::slice;

use serde::{Deserialize, Serialize};

use crate::collections::sorted::{intersect_sorted, large_set, LargeSet, SmallSet};
use crate::error::Result;
use crate::vertex_id::VertexId;

/// Which layout currently backs a [`Neighborhood`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// A single sorted vector.
    Small,
    /// A list of bounded sorted blocks.
    Large,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Small => "small",
            Self::Large => "large",
        };
        write!(f, "{s}")
    }
}

/// The adjacency set of a single vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Neighborhood<T> {
    /// Low-degree layout.
    Small(SmallSet<T>),
    /// High-degree layout.
    Large(LargeSet<T>),
}

impl<T> Default for Neighborhood<T> {
    fn default() -> Self {
        Neighborhood::Small(SmallSet::new())
    }
}

impl<T> Neighborhood<T> {
    /// Creates an empty small neighborhood.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active layout.
    #[inline]
    pub fn representation(&self) -> Representation {
        match self {
            Neighborhood::Small(_) => Representation::Small,
            Neighborhood::Large(_) => Representation::Large,
        }
    }

    /// Number of neighbors.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Neighborhood::Small(set) => set.len(),
            Neighborhood::Large(set) => set.len(),
        }
    }

    /// Returns `true` if there are no neighbors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the neighbors in ascending order.
    pub fn iter(&self) -> NeighborIter<'_, T> {
        match self {
            Neighborhood::Small(set) => NeighborIter::Small(set.iter()),
            Neighborhood::Large(set) => NeighborIter::Large(set.iter()),
        }
    }
}

impl<T: VertexId> Neighborhood<T> {
    /// Inserts `id`. Returns `Ok(false)` if it was already present.
    pub fn add(&mut self, id: T) -> Result<bool> {
        match self {
            Neighborhood::Small(set) => set.add(id),
            Neighborhood::Large(set) => set.add(id),
        }
    }

    /// Removes `id`. Returns `Ok(false)` if it was absent.
    pub fn remove(&mut self, id: &T) -> Result<bool> {
        match self {
            Neighborhood::Small(set) => set.remove(id),
            Neighborhood::Large(set) => set.remove(id),
        }
    }

    /// Returns `true` if `id` is a neighbor.
    #[inline]
    pub fn contains(&self, id: &T) -> bool {
        match self {
            Neighborhood::Small(set) => set.contains(id),
            Neighborhood::Large(set) => set.contains(id),
        }
    }

    /// Returns an owned, ascending copy of the neighbors.
    pub fn list(&self) -> Vec<T> {
        match self {
            Neighborhood::Small(set) => set.list(),
            Neighborhood::Large(set) => set.list(),
        }
    }

    /// Returns the neighbors shared with `other`, ascending.
    pub fn intersect(&self, other: &Self) -> Vec<T> {
        match (self, other) {
            (Neighborhood::Small(a), Neighborhood::Small(b)) => a.intersect(b),
            (Neighborhood::Large(a), Neighborhood::Large(b)) => a.intersect(b),
            _ => intersect_sorted(self.iter(), other.iter()),
        }
    }

    /// Converts to the block layout. No-op if already large.
    #[must_use]
    pub fn into_large(self) -> Self {
        match self {
            Neighborhood::Small(set) => {
                Neighborhood::Large(LargeSet::from_sorted_vec(set.into_vec()))
            }
            large @ Neighborhood::Large(_) => large,
        }
    }

    /// Converts to the vector layout. No-op if already small.
    #[must_use]
    pub fn into_small(self) -> Self {
        match self {
            Neighborhood::Large(set) => {
                Neighborhood::Small(SmallSet::from_sorted_vec(set.into_vec()))
            }
            small @ Neighborhood::Small(_) => small,
        }
    }

    /// Checks the layout's internal ordering and block invariants.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Neighborhood::Small(set) => crate::collections::sorted::is_strictly_ascending(set),
            Neighborhood::Large(set) => set.is_well_formed(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Neighborhood<T> {
    type Item = &'a T;
    type IntoIter = NeighborIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`Neighborhood`].
#[derive(Debug, Clone)]
pub enum NeighborIter<'a, T> {
    /// Iterating a small neighborhood.
    Small(slice::Iter<'a, T>),
    /// Iterating a large neighborhood.
    Large(large_set::Iter<'a, T>),
}

impl<'a, T> Iterator for NeighborIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            NeighborIter::Small(it) => it.next(),
            NeighborIter::Large(it) => it.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            NeighborIter::Small(it) => it.size_hint(),
            NeighborIter::Large(it) => it.size_hint(),
        }
    }
}

impl<T> ExactSizeIterator for NeighborIter<'_, T> {}
impl<T> FusedIterator for NeighborIter<'_, T> {}
