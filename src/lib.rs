//! # `sortledton` - Degree-Adaptive In-Memory Graphs
//!
//! An in-memory undirected graph for dynamic workloads: vertices and edges are
//! inserted and deleted one at a time while neighborhood scans and intersections stay
//! cheap.
//!
//! ## Architecture
//!
//! 1. **Identity index** (`IdentityIndex<T>`):
//!    - Maps arbitrary client identities to dense physical slots and back
//!    - Deleting a vertex moves the last slot into the hole
//!
//! 2. **Adjacency sets** (`Neighborhood<T>`):
//!    - Below [`BLOCK_SIZE`] neighbors: one sorted vector ([`collections::sorted::SortedVecSet`])
//!    - At or above it: an unrolled skip list of bounded sorted blocks
//!      ([`collections::sorted::BlockListSet`])
//!    - The graph switches layouts as degrees cross the threshold
//!
//! 3. **Invariant checking** ([`Violation`], [`ViolationReporter`]):
//!    - A well-formedness predicate covers the index bijection, cached degrees,
//!      sortedness, block bounds and edge symmetry
//!    - Enabled per graph through [`GraphConfig::check_invariants`]
//!
//! ## Performance
//!
//! - `find_edge`: `O(log d)` with `d` the degree of the source vertex
//! - `insert_edge` / `delete_edge`: `O(log d + BLOCK_SIZE)` for high-degree vertices,
//!   `O(d)` below the threshold
//! - `intersect_neighbors`: `O(d_a + d_b)` merge over ascending iterators
//!
//! ## Features
//!
//! - `parallel`: batched read-only queries over `rayon`
//! - `diagnostics`: raw construction of inconsistent graphs for testing predicates
//!
//! ## Example
//!
//! ```rust
//! use sortledton::{GraphConfig, SortledtonGraph};
//!
//! let mut graph = SortledtonGraph::with_config(GraphConfig::default().with_initial_capacity(64));
//! for (a, b) in [(1u64, 2), (2, 3), (3, 1), (3, 4)] {
//!     graph.insert_edge(a, b).unwrap();
//! }
//!
//! assert_eq!(graph.neighbors(&3).unwrap(), vec![1, 2, 4]);
//! assert_eq!(graph.intersect_neighbors(&1, &2).unwrap(), vec![3]);
//!
//! graph.delete_vertex(&3).unwrap();
//! assert!(!graph.find_edge(&1, &3));
//! assert_eq!(graph.stats().edge_count, 1);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;
pub mod config;
pub mod error;
pub mod graph;
pub mod vertex_id;

pub use collections::sorted::BLOCK_SIZE;
pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use graph::{
    GraphStats, LogReporter, Neighborhood, Representation, SilentReporter, SortledtonGraph,
    Violation, ViolationReporter,
};
pub use vertex_id::VertexId;
