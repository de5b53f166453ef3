//! Per-vertex metadata stored in a graph slot.

use crate::error::Result;
use crate::graph::neighborhood::{Neighborhood, Representation};
use crate::vertex_id::VertexId;

use super::invariants::Violation;

/// A vertex's identity, adjacency set and cached degree.
///
/// The degree is maintained by the owning graph on every effective insertion or
/// removal so conversion decisions never need to walk the adjacency set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRecord<T> {
    identity: T,
    adjacency: Neighborhood<T>,
    degree: usize,
}

impl<T: Default> Default for VertexRecord<T> {
    fn default() -> Self {
        Self {
            identity: T::default(),
            adjacency: Neighborhood::default(),
            degree: 0,
        }
    }
}

impl<T> VertexRecord<T> {
    /// Creates a record with an empty small adjacency set.
    pub fn new(identity: T) -> Self {
        Self {
            identity,
            adjacency: Neighborhood::default(),
            degree: 0,
        }
    }

    /// Creates a record around an existing adjacency set, deriving the degree from it.
    pub fn with_adjacency(identity: T, adjacency: Neighborhood<T>) -> Self {
        let degree = adjacency.len();
        Self {
            identity,
            adjacency,
            degree,
        }
    }

    /// The vertex's logical identity.
    #[inline]
    pub fn identity(&self) -> &T {
        &self.identity
    }

    /// The adjacency set.
    #[inline]
    pub fn adjacency(&self) -> &Neighborhood<T> {
        &self.adjacency
    }

    /// Cached number of neighbors.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The layout backing the adjacency set.
    #[inline]
    pub fn representation(&self) -> Representation {
        self.adjacency.representation()
    }

    /// Overrides the cached degree. Only useful for building malformed states.
    #[cfg(any(test, feature = "diagnostics"))]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }
}

impl<T: VertexId> VertexRecord<T> {
    /// Adds `neighbor`, bumping the degree only if it was new.
    pub(crate) fn add_neighbor(&mut self, neighbor: T) -> Result<bool> {
        let added = self.adjacency.add(neighbor)?;
        if added {
            self.degree += 1;
        }
        Ok(added)
    }

    /// Removes `neighbor`, dropping the degree only if it was present.
    pub(crate) fn remove_neighbor(&mut self, neighbor: &T) -> Result<bool> {
        let removed = self.adjacency.remove(neighbor)?;
        if removed {
            self.degree -= 1;
        }
        Ok(removed)
    }

    /// Switches to the block layout. Returns `true` if the layout changed.
    pub(crate) fn promote(&mut self) -> bool {
        self.convert(Representation::Large)
    }

    /// Switches to the vector layout. Returns `true` if the layout changed.
    pub(crate) fn demote(&mut self) -> bool {
        self.convert(Representation::Small)
    }

    fn convert(&mut self, target: Representation) -> bool {
        if self.adjacency.representation() == target {
            return false;
        }
        let current = std::mem::take(&mut self.adjacency);
        self.adjacency = match target {
            Representation::Large => current.into_large(),
            Representation::Small => current.into_small(),
        };
        true
    }

    /// Checks the record-local invariants.
    pub fn check(&self, slot: usize) -> std::result::Result<(), Violation> {
        if !self.identity.is_defined() {
            return Err(Violation::UndefinedIdentity { slot });
        }
        let actual = self.adjacency.len();
        if self.degree != actual {
            return Err(Violation::DegreeMismatch {
                slot,
                cached: self.degree,
                actual,
            });
        }
        if !self.adjacency.is_well_formed() {
            return Err(Violation::MalformedNeighborhood { slot });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_empty_and_small() {
        let record = VertexRecord::new(3u32);
        assert_eq!(record.degree(), 0);
        assert_eq!(record.representation(), Representation::Small);
        assert!(record.check(0).is_ok());
    }

    #[test]
    fn degree_tracks_effective_changes_only() {
        let mut record = VertexRecord::new(1u32);
        assert!(record.add_neighbor(2).unwrap());
        assert!(!record.add_neighbor(2).unwrap());
        assert_eq!(record.degree(), 1);
        assert!(!record.remove_neighbor(&9).unwrap());
        assert!(record.remove_neighbor(&2).unwrap());
        assert_eq!(record.degree(), 0);
    }

    #[test]
    fn with_adjacency_derives_degree() {
        let mut hood = Neighborhood::new();
        hood.add(4u32).unwrap();
        hood.add(5).unwrap();
        let record = VertexRecord::with_adjacency(1, hood);
        assert_eq!(record.degree(), 2);
    }

    #[test]
    fn check_reports_degree_mismatch_and_negative_identity() {
        let record = VertexRecord::new(1i32).with_degree(4);
        assert_eq!(
            record.check(7),
            Err(Violation::DegreeMismatch {
                slot: 7,
                cached: 4,
                actual: 0
            })
        );
        let record = VertexRecord::new(-5i32);
        assert_eq!(record.check(0), Err(Violation::UndefinedIdentity { slot: 0 }));
    }

    #[test]
    fn promote_and_demote_keep_contents() {
        let mut record = VertexRecord::new(0u32);
        for n in 1..=10 {
            record.add_neighbor(n).unwrap();
        }
        assert!(record.promote());
        assert!(!record.promote());
        assert_eq!(record.representation(), Representation::Large);
        assert!(record.demote());
        assert_eq!(record.adjacency().list(), (1..=10).collect::<Vec<_>>());
        assert!(record.check(0).is_ok());
    }

    #[test]
    fn default_record_has_unset_identity() {
        let record: VertexRecord<u64> = VertexRecord::default();
        assert_eq!(*record.identity(), 0);
        assert_eq!(record.degree(), 0);
    }
}
