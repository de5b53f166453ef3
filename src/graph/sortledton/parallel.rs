//! Batched read-only queries fanned out over rayon.

use rayon::prelude::*;

use crate::error::Result;
use crate::vertex_id::VertexId;

use super::SortledtonGraph;

impl<T> SortledtonGraph<T>
where
    T: VertexId + Send + Sync,
{
    /// Intersects the neighborhoods of every pair, in input order.
    ///
    /// # Errors
    /// The first [`GraphError::UnknownVertex`](crate::GraphError::UnknownVertex)
    /// encountered.
    pub fn intersect_neighbors_batch(&self, pairs: &[(T, T)]) -> Result<Vec<Vec<T>>> {
        pairs
            .par_iter()
            .map(|(a, b)| self.intersect_neighbors(a, b))
            .collect()
    }

    /// Degrees of `ids`, in input order.
    pub fn degrees_batch(&self, ids: &[T]) -> Result<Vec<usize>> {
        ids.par_iter().map(|id| self.degree(id)).collect()
    }
}
