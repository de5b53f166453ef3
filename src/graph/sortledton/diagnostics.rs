//! Construction paths for deliberately inconsistent graphs.
//!
//! These bypass every check so the well-formedness predicate can be exercised
//! against states the public mutators never produce. Available under `cfg(test)`
//! and the `diagnostics` feature.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::GraphConfig;
use crate::vertex_id::VertexId;

use super::identity_index::IdentityIndex;
use super::invariants::{Violation, ViolationReporter};
use super::vertex_record::VertexRecord;
use super::SortledtonGraph;

impl<T: VertexId> SortledtonGraph<T> {
    /// Assembles a graph from raw state without validating it.
    ///
    /// The inverse map is derived from `forward` ordered by slot. Invariant checking
    /// is disabled on the returned graph.
    pub fn from_raw_parts(
        vertex_count: usize,
        forward: HashMap<T, usize>,
        records: Vec<VertexRecord<T>>,
        reporter: Arc<dyn ViolationReporter>,
    ) -> Self {
        let capacity = records.capacity().max(vertex_count);
        Self {
            vertex_count,
            capacity,
            index: IdentityIndex::from_raw_forward(forward),
            records,
            config: GraphConfig {
                initial_capacity: capacity,
                check_invariants: false,
            },
            reporter,
        }
    }
}

/// Reporter that stores every violation it receives.
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    seen: Arc<Mutex<Vec<Violation>>>,
}

impl CollectingReporter {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Violations received so far, oldest first.
    pub fn violations(&self) -> Vec<Violation> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ViolationReporter for CollectingReporter {
    fn report(&self, violation: &Violation) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(violation.clone());
    }
}
