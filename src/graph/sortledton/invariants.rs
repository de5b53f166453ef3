//! Structural invariants of the graph and the sink that observes their violations.
//!
//! A violation means the engine itself is broken; it is never a caller error. The
//! graph hands each one to its [`ViolationReporter`] and, in debug builds, panics
//! right after.

use thiserror::Error;

use crate::graph::neighborhood::Representation;

/// A broken structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// The vertex count differs from the number of mapped identities.
    #[error("vertex count {vertex_count} does not match {mapped} mapped identities")]
    VertexCountMismatch {
        /// Stored vertex count.
        vertex_count: usize,
        /// Entries in the forward map.
        mapped: usize,
    },
    /// The record array length differs from the vertex count.
    #[error("vertex count {vertex_count} does not match {records} stored records")]
    RecordCountMismatch {
        /// Stored vertex count.
        vertex_count: usize,
        /// Length of the record array.
        records: usize,
    },
    /// A forward entry points outside `[0, vertex_count)`.
    #[error("identity {identity} maps to out-of-range slot {slot}")]
    SlotOutOfBounds {
        /// The offending identity, formatted.
        identity: String,
        /// The slot it maps to.
        slot: usize,
    },
    /// The inverse map disagrees with the forward map at `slot`.
    #[error("forward and inverse maps disagree at slot {slot}")]
    InverseMismatch {
        /// The slot whose inverse entry is wrong or missing.
        slot: usize,
    },
    /// A record's identity is not present in the forward map.
    #[error("record at slot {slot} holds an unregistered identity")]
    UnregisteredIdentity {
        /// Slot of the record.
        slot: usize,
    },
    /// A record's identity maps to a different slot.
    #[error("record at slot {slot} is registered at slot {registered}")]
    MisplacedRecord {
        /// Slot of the record.
        slot: usize,
        /// Slot its identity maps to.
        registered: usize,
    },
    /// A record holds an undefined identity.
    #[error("record at slot {slot} holds an undefined identity")]
    UndefinedIdentity {
        /// Slot of the record.
        slot: usize,
    },
    /// A record's cached degree differs from its adjacency size.
    #[error("record at slot {slot} caches degree {cached} but has {actual} neighbors")]
    DegreeMismatch {
        /// Slot of the record.
        slot: usize,
        /// Cached degree.
        cached: usize,
        /// Actual adjacency size.
        actual: usize,
    },
    /// A record's adjacency set is unsorted, has duplicates or malformed blocks.
    #[error("adjacency set of record at slot {slot} is malformed")]
    MalformedNeighborhood {
        /// Slot of the record.
        slot: usize,
    },
    /// A neighbor is not a registered vertex.
    #[error("record at slot {slot} lists a neighbor that is not a vertex")]
    DanglingNeighbor {
        /// Slot of the record.
        slot: usize,
    },
    /// An edge is stored on one endpoint only.
    #[error("record at slot {slot} has an edge that is not mirrored by its neighbor")]
    AsymmetricEdge {
        /// Slot of the record holding the one-sided edge.
        slot: usize,
    },
    /// The adjacency layout does not match the degree threshold.
    #[error("record at slot {slot} has degree {degree} but a {representation} layout")]
    RepresentationMismatch {
        /// Slot of the record.
        slot: usize,
        /// Cached degree.
        degree: usize,
        /// Active layout.
        representation: Representation,
    },
}

/// Receives invariant violations.
///
/// Any `Fn(&Violation) + Send + Sync` closure is a reporter.
pub trait ViolationReporter: Send + Sync {
    /// Called once per detected violation.
    fn report(&self, violation: &Violation);
}

impl<F> ViolationReporter for F
where
    F: Fn(&Violation) + Send + Sync,
{
    fn report(&self, violation: &Violation) {
        self(violation);
    }
}

/// Default reporter: logs each violation at error level through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ViolationReporter for LogReporter {
    fn report(&self, violation: &Violation) {
        tracing::error!(%violation, "graph invariant violated");
    }
}

/// Reporter that drops every violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ViolationReporter for SilentReporter {
    fn report(&self, _violation: &Violation) {}
}
