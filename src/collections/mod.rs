//! Collections backing the graph's adjacency sets.
//!
//! - `sorted`: sorted, duplicate-free identity sets in vector and block layouts

pub mod sorted;

pub use sorted::{BlockListSet, SortedVecSet};
