//! Bidirectional mapping between logical identities and dense physical slots.
//!
//! Slots always form the range `[0, len)`. Removing an identity moves the identity
//! held by the last slot into the vacated one, so slot numbers are not stable across
//! deletions; identities are.

use std::collections::HashMap;

use crate::error::{GraphError, Result};
use crate::vertex_id::VertexId;

/// Outcome of [`IdentityIndex::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    /// Slot that held the removed identity.
    pub slot: usize,
    /// Former slot of the identity that was moved into `slot`, if any.
    pub relocated_from: Option<usize>,
}

/// Forward (`identity -> slot`) and inverse (`slot -> identity`) maps.
#[derive(Debug, Clone)]
pub struct IdentityIndex<T> {
    forward: HashMap<T, usize>,
    inverse: Vec<T>,
}

impl<T: VertexId> Default for IdentityIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: VertexId> IdentityIndex<T> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            inverse: Vec::new(),
        }
    }

    /// Creates an empty index with room for `capacity` identities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: HashMap::with_capacity(capacity),
            inverse: Vec::with_capacity(capacity),
        }
    }

    /// Builds an index from a raw forward map without checking it.
    ///
    /// Slots missing from the map are left out of the inverse map, which makes the
    /// result fail the bijection check.
    #[cfg(any(test, feature = "diagnostics"))]
    pub(crate) fn from_raw_forward(forward: HashMap<T, usize>) -> Self {
        let mut by_slot: Vec<(usize, T)> =
            forward.iter().map(|(id, &slot)| (slot, id.clone())).collect();
        by_slot.sort_by_key(|(slot, _)| *slot);
        let inverse = by_slot.into_iter().map(|(_, id)| id).collect();
        Self { forward, inverse }
    }

    /// Number of mapped identities.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` if nothing is mapped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Reserves room for `additional` more identities.
    pub fn reserve(&mut self, additional: usize) {
        self.forward.reserve(additional);
        self.inverse.reserve_exact(additional);
    }

    /// Maps `identity` to the next free slot and returns that slot.
    pub fn insert(&mut self, identity: T) -> Result<usize> {
        if self.forward.contains_key(&identity) {
            return Err(GraphError::duplicate(&identity));
        }
        let slot = self.inverse.len();
        self.forward.insert(identity.clone(), slot);
        self.inverse.push(identity);
        Ok(slot)
    }

    /// The slot of `identity`, if mapped.
    #[inline]
    pub fn lookup(&self, identity: &T) -> Option<usize> {
        self.forward.get(identity).copied()
    }

    /// Returns `true` if `identity` is mapped.
    #[inline]
    pub fn contains(&self, identity: &T) -> bool {
        self.forward.contains_key(identity)
    }

    /// Unmaps `identity`, compacting by moving the last slot into the vacated one.
    pub fn remove(&mut self, identity: &T) -> Result<Removal> {
        let slot = self
            .forward
            .remove(identity)
            .ok_or_else(|| GraphError::unknown(identity))?;
        let last = self.inverse.len() - 1;
        self.inverse.swap_remove(slot);

        let relocated_from = if slot == last {
            None
        } else {
            let moved = &self.inverse[slot];
            if let Some(entry) = self.forward.get_mut(moved) {
                *entry = slot;
            }
            Some(last)
        };
        Ok(Removal {
            slot,
            relocated_from,
        })
    }

    /// The identity stored at `slot`.
    pub fn identity_at(&self, slot: usize) -> Result<&T> {
        self.inverse.get(slot).ok_or(GraphError::SlotOutOfRange {
            slot,
            vertex_count: self.inverse.len(),
        })
    }

    /// Identities in slot order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.inverse.iter()
    }

    /// Forward entries, in no particular order.
    pub(crate) fn forward_entries(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.forward.iter().map(|(id, &slot)| (id, slot))
    }

    /// The raw inverse map entry, without range checks against `len`.
    pub(crate) fn inverse_at(&self, slot: usize) -> Option<&T> {
        self.inverse.get(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(ids: &[u32]) -> IdentityIndex<u32> {
        let mut index = IdentityIndex::new();
        for &id in ids {
            index.insert(id).unwrap();
        }
        index
    }

    #[test]
    fn insert_assigns_dense_slots() {
        let index = index_of(&[40, 10, 30]);
        assert_eq!(index.lookup(&40), Some(0));
        assert_eq!(index.lookup(&10), Some(1));
        assert_eq!(index.lookup(&30), Some(2));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn duplicate_insert_fails_without_change() {
        let mut index = index_of(&[1, 2]);
        assert!(matches!(index.insert(2), Err(GraphError::DuplicateVertex(_))));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn remove_middle_moves_last_into_hole() {
        let mut index = index_of(&[1, 2, 3, 4, 5]);
        let removal = index.remove(&3).unwrap();
        assert_eq!(
            removal,
            Removal {
                slot: 2,
                relocated_from: Some(4)
            }
        );
        assert_eq!(index.lookup(&5), Some(2));
        assert_eq!(*index.identity_at(2).unwrap(), 5);
        assert_eq!(index.len(), 4);
        assert!(index.lookup(&3).is_none());
    }

    #[test]
    fn remove_last_does_not_relocate() {
        let mut index = index_of(&[1, 2]);
        let removal = index.remove(&2).unwrap();
        assert_eq!(removal.relocated_from, None);
        assert_eq!(index.iter().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn remove_unknown_fails() {
        let mut index = index_of(&[1]);
        assert!(matches!(index.remove(&9), Err(GraphError::UnknownVertex(_))));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn identity_at_checks_range() {
        let index = index_of(&[7]);
        assert_eq!(*index.identity_at(0).unwrap(), 7);
        assert!(matches!(
            index.identity_at(1),
            Err(GraphError::SlotOutOfRange {
                slot: 1,
                vertex_count: 1
            })
        ));
    }
}
