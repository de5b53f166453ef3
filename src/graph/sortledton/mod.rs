//! `SortledtonGraph` - a dynamic undirected graph with degree-adaptive adjacency sets.
//!
//! ## Layout
//!
//! - An [`IdentityIndex`] maps client identities to dense physical slots.
//! - A `Vec` of [`VertexRecord`]s is indexed by slot; each record owns one
//!   [`Neighborhood`](crate::graph::Neighborhood).
//! - Vertices with fewer than [`BLOCK_SIZE`] neighbors keep a sorted vector; vertices
//!   that reach it switch to a block list and switch back once they drop below it.
//!
//! Deleting a vertex moves the last slot into the hole, so slots are dense but not
//! stable. Every edge is stored on both endpoints.
//!
//! ## Invariant checking
//!
//! With [`GraphConfig::check_invariants`] enabled, every public mutator runs the
//! well-formedness predicate before and after it mutates. Violations go to the
//! configured [`ViolationReporter`]; debug builds additionally panic.
//!
//! ```rust
//! use sortledton::{Representation, SortledtonGraph};
//!
//! let mut graph = SortledtonGraph::<u32>::new();
//! graph.insert_edge(1, 2).unwrap();
//! graph.insert_edge(2, 3).unwrap();
//! graph.insert_edge(1, 3).unwrap();
//!
//! assert_eq!(graph.intersect_neighbors(&1, &2).unwrap(), vec![3]);
//! assert_eq!(graph.representation(&1).unwrap(), Representation::Small);
//! ```

mod identity_index;
mod invariants;
mod vertex_record;

#[cfg(any(test, feature = "diagnostics"))]
pub mod diagnostics;
#[cfg(feature = "parallel")]
mod parallel;

pub use identity_index::{IdentityIndex, Removal};
pub use invariants::{LogReporter, SilentReporter, Violation, ViolationReporter};
pub use vertex_record::VertexRecord;

use core::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::collections::sorted::BLOCK_SIZE;
use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::graph::neighborhood::{NeighborIter, Representation};
use crate::vertex_id::VertexId;

/// Summary counters for a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of distinct undirected edges, self loops included.
    pub edge_count: usize,
    /// Number of self loops.
    pub self_loops: usize,
    /// Vertices backed by the vector layout.
    pub small_vertices: usize,
    /// Vertices backed by the block layout.
    pub large_vertices: usize,
    /// Reserved vertex slots.
    pub capacity: usize,
}

/// An in-memory undirected graph keyed by logical vertex identities.
pub struct SortledtonGraph<T> {
    vertex_count: usize,
    capacity: usize,
    index: IdentityIndex<T>,
    records: Vec<VertexRecord<T>>,
    config: GraphConfig,
    reporter: Arc<dyn ViolationReporter>,
}

impl<T: VertexId> Default for SortledtonGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: VertexId> fmt::Debug for SortledtonGraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortledtonGraph")
            .field("vertex_count", &self.vertex_count)
            .field("capacity", &self.capacity)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: VertexId> SortledtonGraph<T> {
    /// Creates an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Creates an empty graph with the given configuration.
    ///
    /// # Panics
    /// If reserving `initial_capacity` slots overflows or exhausts memory. Configs
    /// loaded through [`GraphConfig::from_json`] are bounded.
    pub fn with_config(config: GraphConfig) -> Self {
        let capacity = config.initial_capacity;
        Self {
            vertex_count: 0,
            capacity,
            index: IdentityIndex::with_capacity(capacity),
            records: Vec::with_capacity(capacity),
            config,
            reporter: Arc::new(LogReporter),
        }
    }

    /// Replaces the violation reporter, builder style.
    #[must_use]
    pub fn with_reporter(mut self, reporter: impl ViolationReporter + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// Replaces the violation reporter.
    pub fn set_reporter(&mut self, reporter: Arc<dyn ViolationReporter>) {
        self.reporter = reporter;
    }

    /// Enables or disables invariant checking around mutators.
    pub fn set_check_invariants(&mut self, enabled: bool) {
        self.config.check_invariants = enabled;
    }

    /// The active configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Number of vertex slots reserved.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if `id` is a vertex.
    #[inline]
    pub fn has_vertex(&self, id: &T) -> bool {
        self.index.contains(id)
    }

    /// The current physical slot of `id`.
    ///
    /// Slots change when other vertices are deleted.
    #[inline]
    pub fn physical_id(&self, id: &T) -> Option<usize> {
        self.index.lookup(id)
    }

    /// The identity stored at physical `slot`.
    pub fn logical_id(&self, slot: usize) -> Result<&T> {
        if slot >= self.vertex_count {
            return Err(GraphError::SlotOutOfRange {
                slot,
                vertex_count: self.vertex_count,
            });
        }
        self.index.identity_at(slot)
    }

    /// Vertex identities in slot order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.index.iter()
    }

    /// Each undirected edge once, as `(smaller, larger)`; a self loop appears as `(v, v)`.
    pub fn edges(&self) -> impl Iterator<Item = (&T, &T)> + '_ {
        self.records.iter().flat_map(|record| {
            let src = record.identity();
            record
                .adjacency()
                .iter()
                .filter(move |dst| *dst >= src)
                .map(move |dst| (src, dst))
        })
    }

    /// The number of neighbors of `id`.
    pub fn degree(&self, id: &T) -> Result<usize> {
        self.record(id).map(VertexRecord::degree)
    }

    /// The layout currently backing `id`'s adjacency set.
    pub fn representation(&self, id: &T) -> Result<Representation> {
        self.record(id).map(VertexRecord::representation)
    }

    /// The record for `id`.
    pub fn vertex(&self, id: &T) -> Option<&VertexRecord<T>> {
        self.index.lookup(id).and_then(|slot| self.records.get(slot))
    }

    fn record(&self, id: &T) -> Result<&VertexRecord<T>> {
        self.vertex(id).ok_or_else(|| GraphError::unknown(id))
    }

    fn slot_of(&self, id: &T) -> Result<usize> {
        self.index.lookup(id).ok_or_else(|| GraphError::unknown(id))
    }

    /// Adds an isolated vertex.
    ///
    /// # Errors
    /// [`GraphError::UndefinedElement`] for undefined identities and
    /// [`GraphError::DuplicateVertex`] if `id` is already present.
    pub fn insert_vertex(&mut self, id: T) -> Result<()> {
        if !id.is_defined() {
            return Err(GraphError::UndefinedElement);
        }
        if self.index.contains(&id) {
            return Err(GraphError::duplicate(&id));
        }
        self.check_invariants("insert_vertex");
        self.push_vertex(id)?;
        self.check_invariants("insert_vertex");
        Ok(())
    }

    fn push_vertex(&mut self, id: T) -> Result<usize> {
        self.ensure_capacity(self.vertex_count + 1);
        let slot = self.index.insert(id.clone())?;
        tracing::trace!(vertex = ?id, slot, "inserted vertex");
        self.records.push(VertexRecord::new(id));
        self.vertex_count += 1;
        Ok(slot)
    }

    /// Grows the slot capacity to at least `required`, at least doubling it.
    fn ensure_capacity(&mut self, required: usize) {
        if self.capacity >= required {
            return;
        }
        let grown = (self.capacity * 2).max(required);
        self.records
            .reserve_exact(grown.saturating_sub(self.records.len()));
        self.index.reserve(grown.saturating_sub(self.index.len()));
        tracing::debug!(from = self.capacity, to = grown, "grew vertex capacity");
        self.capacity = grown;
    }

    /// Removes `id` and every edge incident to it.
    ///
    /// The vertex in the last slot takes over `id`'s slot.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if `id` is not present.
    pub fn delete_vertex(&mut self, id: &T) -> Result<()> {
        let slot = self.slot_of(id)?;
        self.check_invariants("delete_vertex");

        let neighbors = self.records[slot].adjacency().list();
        for neighbor in &neighbors {
            let other = self.slot_of(neighbor)?;
            // `id` keeps its slot until the index entry is removed below.
            self.unlink(slot, id, other, neighbor)?;
        }

        let removal = self.index.remove(id)?;
        self.records.swap_remove(removal.slot);
        self.vertex_count -= 1;
        tracing::trace!(
            vertex = ?id,
            slot = removal.slot,
            relocated_from = ?removal.relocated_from,
            "deleted vertex"
        );

        self.check_invariants("delete_vertex");
        Ok(())
    }

    /// Adds the undirected edge `src`–`dst`, creating missing endpoints.
    ///
    /// Inserting an existing edge is a no-op.
    ///
    /// # Errors
    /// [`GraphError::UndefinedElement`] if either identity is undefined; nothing is
    /// mutated in that case.
    pub fn insert_edge(&mut self, src: T, dst: T) -> Result<()> {
        if !src.is_defined() || !dst.is_defined() {
            return Err(GraphError::UndefinedElement);
        }
        self.check_invariants("insert_edge");

        let s = match self.index.lookup(&src) {
            Some(slot) => slot,
            None => self.push_vertex(src.clone())?,
        };
        let d = match self.index.lookup(&dst) {
            Some(slot) => slot,
            None => self.push_vertex(dst.clone())?,
        };

        self.records[s].add_neighbor(dst)?;
        self.records[d].add_neighbor(src)?;
        self.promote_if_dense(s);
        if d != s {
            self.promote_if_dense(d);
        }

        self.check_invariants("insert_edge");
        Ok(())
    }

    /// Removes the undirected edge `src`–`dst`.
    ///
    /// Removing an absent edge between existing vertices is a no-op.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if either endpoint is not a vertex; nothing is
    /// mutated in that case.
    pub fn delete_edge(&mut self, src: &T, dst: &T) -> Result<()> {
        let s = self.slot_of(src)?;
        let d = self.slot_of(dst)?;
        self.check_invariants("delete_edge");
        self.unlink(s, src, d, dst)?;
        self.check_invariants("delete_edge");
        Ok(())
    }

    fn unlink(&mut self, s: usize, src: &T, d: usize, dst: &T) -> Result<()> {
        self.records[s].remove_neighbor(dst)?;
        self.records[d].remove_neighbor(src)?;
        self.demote_if_sparse(s);
        if d != s {
            self.demote_if_sparse(d);
        }
        Ok(())
    }

    fn promote_if_dense(&mut self, slot: usize) {
        let record = &mut self.records[slot];
        if record.degree() >= BLOCK_SIZE && record.promote() {
            tracing::debug!(
                vertex = ?record.identity(),
                degree = record.degree(),
                "promoted adjacency set to block layout"
            );
        }
    }

    fn demote_if_sparse(&mut self, slot: usize) {
        let record = &mut self.records[slot];
        if record.degree() < BLOCK_SIZE && record.demote() {
            tracing::debug!(
                vertex = ?record.identity(),
                degree = record.degree(),
                "demoted adjacency set to vector layout"
            );
        }
    }

    /// Returns `true` if `dst` is a neighbor of `src`.
    ///
    /// Only `src`'s adjacency set is consulted; an absent `src` yields `false`.
    pub fn find_edge(&self, src: &T, dst: &T) -> bool {
        self.vertex(src)
            .is_some_and(|record| record.adjacency().contains(dst))
    }

    /// The neighbors of `id`, ascending.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if `id` is not present.
    pub fn neighbors(&self, id: &T) -> Result<Vec<T>> {
        self.record(id).map(|record| record.adjacency().list())
    }

    /// Borrowing iterator over the neighbors of `id`, ascending.
    pub fn neighbor_iter(&self, id: &T) -> Result<NeighborIter<'_, T>> {
        self.record(id).map(|record| record.adjacency().iter())
    }

    /// Calls `visit` once per neighbor of `id`, in ascending order.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if `id` is not present.
    pub fn scan_neighbors<F>(&self, id: &T, mut visit: F) -> Result<()>
    where
        F: FnMut(&T),
    {
        for neighbor in self.neighbor_iter(id)? {
            visit(neighbor);
        }
        Ok(())
    }

    /// The neighbors shared by `a` and `b`, ascending.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if either vertex is not present.
    pub fn intersect_neighbors(&self, a: &T, b: &T) -> Result<Vec<T>> {
        let left = self.record(a)?.adjacency();
        let right = self.record(b)?.adjacency();
        Ok(left.intersect(right))
    }

    /// Summary counters.
    pub fn stats(&self) -> GraphStats {
        let mut degree_sum = 0;
        let mut self_loops = 0;
        let mut large_vertices = 0;
        for record in &self.records {
            degree_sum += record.degree();
            if record.adjacency().contains(record.identity()) {
                self_loops += 1;
            }
            if record.representation() == Representation::Large {
                large_vertices += 1;
            }
        }
        GraphStats {
            vertex_count: self.vertex_count,
            edge_count: (degree_sum + self_loops) / 2,
            self_loops,
            small_vertices: self.records.len() - large_vertices,
            large_vertices,
            capacity: self.capacity,
        }
    }

    /// Runs the well-formedness predicate, reporting the first violation found.
    pub fn is_well_formed(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(violation) => {
                self.reporter.report(&violation);
                false
            }
        }
    }

    #[inline]
    fn check_invariants(&self, operation: &'static str) {
        if !self.config.check_invariants {
            return;
        }
        let well_formed = self.is_well_formed();
        debug_assert!(well_formed, "graph invariant violated in {operation}");
    }

    /// Checks every structural invariant, returning the first violation.
    pub fn validate(&self) -> core::result::Result<(), Violation> {
        let mapped = self.index.len();
        if self.vertex_count != mapped {
            return Err(Violation::VertexCountMismatch {
                vertex_count: self.vertex_count,
                mapped,
            });
        }
        if self.records.len() != self.vertex_count {
            return Err(Violation::RecordCountMismatch {
                vertex_count: self.vertex_count,
                records: self.records.len(),
            });
        }

        for (id, slot) in self.index.forward_entries() {
            if slot >= self.vertex_count {
                return Err(Violation::SlotOutOfBounds {
                    identity: format!("{id:?}"),
                    slot,
                });
            }
            if self.index.inverse_at(slot) != Some(id) {
                return Err(Violation::InverseMismatch { slot });
            }
        }
        for (slot, id) in self.index.iter().enumerate() {
            if self.index.lookup(id) != Some(slot) {
                return Err(Violation::InverseMismatch { slot });
            }
        }

        for (slot, record) in self.records.iter().enumerate() {
            record.check(slot)?;
            match self.index.lookup(record.identity()) {
                None => return Err(Violation::UnregisteredIdentity { slot }),
                Some(registered) if registered != slot => {
                    return Err(Violation::MisplacedRecord { slot, registered })
                }
                Some(_) => {}
            }

            let expected = if record.degree() >= BLOCK_SIZE {
                Representation::Large
            } else {
                Representation::Small
            };
            if record.representation() != expected {
                return Err(Violation::RepresentationMismatch {
                    slot,
                    degree: record.degree(),
                    representation: record.representation(),
                });
            }

            for neighbor in record.adjacency() {
                let Some(other) = self.index.lookup(neighbor) else {
                    return Err(Violation::DanglingNeighbor { slot });
                };
                let mirrored = self
                    .records
                    .get(other)
                    .is_some_and(|r| r.adjacency().contains(record.identity()));
                if !mirrored {
                    return Err(Violation::AsymmetricEdge { slot });
                }
            }
        }
        Ok(())
    }
}

impl<T: VertexId> Extend<(T, T)> for SortledtonGraph<T> {
    /// Inserts every edge; pairs with an undefined endpoint are logged and skipped.
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, edges: I) {
        for (src, dst) in edges {
            if let Err(err) = self.insert_edge(src, dst) {
                tracing::warn!(%err, "skipped edge");
            }
        }
    }
}

impl<T: VertexId> FromIterator<(T, T)> for SortledtonGraph<T> {
    /// Builds a graph with the default configuration.
    ///
    /// Pairs with an undefined endpoint are logged at warn level and skipped, so the
    /// result may hold fewer edges than were supplied. Use
    /// [`SortledtonGraph::insert_edge`] to observe each failure.
    fn from_iter<I: IntoIterator<Item = (T, T)>>(edges: I) -> Self {
        let mut graph = Self::new();
        graph.extend(edges);
        graph
    }
}
