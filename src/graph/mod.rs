//! Graph storage.
//!
//! - `neighborhood`: the per-vertex adjacency set and its two layouts
//! - `sortledton`: the graph, its identity index and invariant checking

pub mod neighborhood;
pub mod sortledton;

pub use neighborhood::{NeighborIter, Neighborhood, Representation};
pub use sortledton::{
    GraphStats, IdentityIndex, LogReporter, Removal, SilentReporter, SortledtonGraph,
    VertexRecord, Violation, ViolationReporter,
};
