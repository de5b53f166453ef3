//! `BlockListSet` - an unrolled skip list of sorted blocks for high-degree vertices.
//!
//! ## Layout
//!
//! The set is an ordered `Vec` of non-empty sorted blocks, each holding at most `B`
//! elements. Blocks are globally ordered: the last element of block *i* is smaller
//! than the first element of block *i + 1*.
//!
//! ## Complexity
//! - **Lookup**: `O(log blocks + log B)`, a binary search over block bounds followed
//!   by a binary search inside the chosen block.
//! - **Insert/remove**: the element shift is bounded by `B`; a block split or merge
//!   moves at most `B` elements plus one entry of the block index.
//! - **Scan/intersect**: linear, blocks are visited in order and never re-sorted.
//!
//! Overflowing blocks split at `B / 2`. Blocks that shrink below `B / 2` merge with a
//! neighbour when the result fits; otherwise the underflow is tolerated.

use core::cmp::Ordering;
use core::iter::{Flatten, FusedIterator};
use core::slice;

use super::{intersect_sorted, is_strictly_ascending, BLOCK_SIZE};
use crate::error::{GraphError, Result};
use crate::vertex_id::VertexId;

/// A globally sorted list of bounded sorted blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockListSet<T, const B: usize = BLOCK_SIZE> {
    blocks: Vec<Vec<T>>,
    len: usize,
}

/// The high-degree adjacency layout.
pub type LargeSet<T> = BlockListSet<T, BLOCK_SIZE>;

impl<T, const B: usize> BlockListSet<T, B> {
    /// Creates an empty set.
    pub const fn new() -> Self {
        assert!(B >= 2, "BlockListSet block size must be at least 2");
        Self {
            blocks: Vec::new(),
            len: 0,
        }
    }

    /// Maximum number of elements per block.
    #[inline(always)]
    pub const fn block_capacity() -> usize {
        B
    }

    /// Number of elements across all blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of blocks.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// The blocks in order.
    pub fn blocks(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        self.blocks.iter().map(Vec::as_slice)
    }

    /// Iterates over all elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.blocks.iter().flatten(),
            remaining: self.len,
        }
    }

    /// Consumes the set, returning its elements in ascending order.
    pub fn into_vec(self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        for block in self.blocks {
            out.extend(block);
        }
        out
    }
}

impl<T: VertexId, const B: usize> BlockListSet<T, B> {
    /// Builds a set from elements that are already strictly ascending, packing full
    /// blocks.
    pub(crate) fn from_sorted_vec(items: Vec<T>) -> Self {
        debug_assert!(is_strictly_ascending(&items));
        let len = items.len();
        let mut blocks = Vec::with_capacity(len.div_ceil(B));
        let mut items = items.into_iter().peekable();
        while items.peek().is_some() {
            blocks.push(items.by_ref().take(B).collect());
        }
        Self { blocks, len }
    }

    /// Finds the block whose range covers `id`.
    ///
    /// If no block covers it, returns the index at which a block holding `id` would be
    /// inserted, which may be `block_count()`.
    pub fn locate_block(&self, id: &T) -> usize {
        let (mut lo, mut hi) = (0, self.blocks.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let block = &self.blocks[mid];
            // Blocks are never empty.
            let (first, last) = (&block[0], &block[block.len() - 1]);
            if id < first {
                hi = mid;
            } else if id > last {
                lo = mid + 1;
            } else {
                return mid;
            }
        }
        lo
    }

    /// Inserts `id`. Returns `Ok(false)` if it was already present.
    pub fn add(&mut self, id: T) -> Result<bool> {
        if !id.is_defined() {
            return Err(GraphError::UndefinedElement);
        }
        if self.blocks.is_empty() {
            self.blocks.push(vec![id]);
            self.len = 1;
            return Ok(true);
        }

        let idx = self.locate_block(&id).min(self.blocks.len() - 1);
        let block = &mut self.blocks[idx];
        let pos = match block.binary_search(&id) {
            Ok(_) => return Ok(false),
            Err(pos) => pos,
        };
        block.insert(pos, id);
        self.len += 1;

        if block.len() > B {
            let upper = block.split_off(B / 2);
            self.blocks.insert(idx + 1, upper);
        }
        Ok(true)
    }

    /// Removes `id`. Returns `Ok(false)` if it was absent.
    pub fn remove(&mut self, id: &T) -> Result<bool> {
        if !id.is_defined() {
            return Err(GraphError::UndefinedElement);
        }
        let idx = self.locate_block(id);
        let Some(block) = self.blocks.get_mut(idx) else {
            return Ok(false);
        };
        let Ok(pos) = block.binary_search(id) else {
            return Ok(false);
        };
        block.remove(pos);
        self.len -= 1;

        if block.is_empty() {
            self.blocks.remove(idx);
        } else if block.len() < B / 2 && self.blocks.len() > 1 {
            self.try_merge(idx);
        }
        Ok(true)
    }

    /// Merges the undersized block at `idx` into a neighbour, preferring the previous
    /// block. Leaves the block alone if neither neighbour has room.
    fn try_merge(&mut self, idx: usize) -> bool {
        if idx > 0 && self.can_merge(idx - 1, idx) {
            let block = self.blocks.remove(idx);
            self.blocks[idx - 1].extend(block);
            return true;
        }
        if idx + 1 < self.blocks.len() && self.can_merge(idx, idx + 1) {
            let next = self.blocks.remove(idx + 1);
            self.blocks[idx].extend(next);
            return true;
        }
        false
    }

    fn can_merge(&self, left: usize, right: usize) -> bool {
        let (a, b) = (&self.blocks[left], &self.blocks[right]);
        a.len() + b.len() <= B
            && matches!((a.last(), b.first()), (Some(x), Some(y)) if x.cmp(y) == Ordering::Less)
    }

    /// Returns `true` if `id` is present.
    pub fn contains(&self, id: &T) -> bool {
        self.blocks
            .get(self.locate_block(id))
            .is_some_and(|block| block.binary_search(id).is_ok())
    }

    /// Returns all elements in ascending order.
    pub fn list(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        for block in &self.blocks {
            out.extend_from_slice(block);
        }
        out
    }

    /// Returns the elements present in both sets, ascending.
    pub fn intersect<const C: usize>(&self, other: &BlockListSet<T, C>) -> Vec<T> {
        intersect_sorted(self.iter(), other.iter())
    }

    /// Checks the block structure: no empty or oversized blocks, global order, and a
    /// cached length that matches the blocks.
    pub fn is_well_formed(&self) -> bool {
        let counted: usize = self.blocks.iter().map(Vec::len).sum();
        counted == self.len
            && self.blocks.iter().all(|b| !b.is_empty() && b.len() <= B)
            && is_strictly_ascending(self.iter())
    }
}

impl<T, const B: usize> Default for BlockListSet<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ascending iterator over a [`BlockListSet`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: Flatten<slice::Iter<'a, Vec<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T, const B: usize> IntoIterator for &'a BlockListSet<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Tiny = BlockListSet<u32, 4>;

    fn tiny_of(items: impl IntoIterator<Item = u32>) -> Tiny {
        let mut set = Tiny::new();
        for x in items {
            set.add(x).unwrap();
        }
        set
    }

    fn block_lens<const B: usize>(set: &BlockListSet<u32, B>) -> Vec<usize> {
        set.blocks().map(<[u32]>::len).collect()
    }

    #[test]
    fn first_add_creates_single_block() {
        let set = tiny_of([7]);
        assert_eq!(set.block_count(), 1);
        assert_eq!(set.list(), vec![7]);
    }

    #[test]
    fn overflowing_block_splits_at_half() {
        let set = tiny_of([1, 2, 3, 4, 5]);
        assert_eq!(block_lens(&set), vec![2, 3]);
        assert_eq!(set.list(), vec![1, 2, 3, 4, 5]);
        assert!(set.is_well_formed());
    }

    #[test]
    fn locate_block_returns_cover_or_insertion_point() {
        let set = tiny_of([10, 20, 30, 40, 50]);
        // blocks: [10, 20] [30, 40, 50]
        assert_eq!(set.locate_block(&5), 0);
        assert_eq!(set.locate_block(&20), 0);
        assert_eq!(set.locate_block(&25), 1);
        assert_eq!(set.locate_block(&45), 1);
        assert_eq!(set.locate_block(&60), 2);
    }

    #[test]
    fn add_past_the_end_goes_into_last_block() {
        let mut set = tiny_of([10, 20, 30, 40, 50]);
        set.add(60).unwrap();
        assert_eq!(block_lens(&set), vec![2, 4]);
        assert!(set.is_well_formed());
    }

    #[test]
    fn duplicate_add_is_noop() {
        let mut set = tiny_of([1, 2, 3]);
        assert!(!set.add(2).unwrap());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn underflow_merges_with_next_block() {
        let mut set = tiny_of([1, 2, 3, 4, 5]);
        // blocks: [1, 2] [3, 4, 5]
        assert!(set.remove(&1).unwrap());
        assert_eq!(block_lens(&set), vec![4]);
        assert_eq!(set.list(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn emptied_block_is_dropped() {
        let mut set = Tiny::from_sorted_vec((1..=9).collect());
        assert_eq!(block_lens(&set), vec![4, 4, 1]);
        assert!(set.remove(&9).unwrap());
        assert_eq!(block_lens(&set), vec![4, 4]);
        assert!(set.is_well_formed());
    }

    #[test]
    fn underflow_merges_with_previous_block() {
        let mut set = tiny_of(1..=7);
        // 1..=5 -> [1,2] [3,4,5]; 6 -> [1,2] [3,4,5,6]; 7 -> [1,2] [3,4] [5,6,7]
        assert_eq!(block_lens(&set), vec![2, 2, 3]);
        set.remove(&7).unwrap();
        set.remove(&6).unwrap();
        // [5] underflows and merges into [3, 4].
        assert_eq!(block_lens(&set), vec![2, 3]);
        assert_eq!(set.list(), vec![1, 2, 3, 4, 5]);
        assert!(set.is_well_formed());
    }

    #[test]
    fn underflow_without_room_is_tolerated() {
        let mut set = BlockListSet::<u32, 8>::from_sorted_vec((0..24).collect());
        assert_eq!(block_lens(&set), vec![8, 8, 8]);
        for x in 8..13 {
            set.remove(&x).unwrap();
        }
        // Both neighbours are full, so the undersized middle block stays.
        assert_eq!(block_lens(&set), vec![8, 3, 8]);
        assert!(set.is_well_formed());

        for x in 0..5 {
            set.remove(&x).unwrap();
        }
        // [5, 6, 7] has no previous block and merges forward into [13, 14, 15].
        assert_eq!(block_lens(&set), vec![6, 8]);
        assert_eq!(set.list(), (5..8).chain(13..24).collect::<Vec<_>>());
        assert!(set.is_well_formed());
    }

    #[test]
    fn contains_handles_gaps_and_past_the_end() {
        let set = tiny_of([10, 20, 30, 40, 50]);
        assert!(set.contains(&30));
        assert!(!set.contains(&25));
        assert!(!set.contains(&99));
        assert!(!set.contains(&0));
    }

    #[test]
    fn undefined_element_is_rejected() {
        let mut set = BlockListSet::<i64, 4>::new();
        assert!(matches!(set.add(-1), Err(GraphError::UndefinedElement)));
        assert!(matches!(set.remove(&-1), Err(GraphError::UndefinedElement)));
    }

    #[test]
    fn intersect_across_block_sizes() {
        let a = tiny_of((0..40).step_by(2));
        let mut b = BlockListSet::<u32, 16>::new();
        for x in (0..40).step_by(3) {
            b.add(x).unwrap();
        }
        assert_eq!(a.intersect(&b), vec![0, 6, 12, 18, 24, 30, 36]);
    }

    #[test]
    fn bulk_build_packs_full_blocks() {
        let set = Tiny::from_sorted_vec((0..10).collect());
        assert_eq!(block_lens(&set), vec![4, 4, 2]);
        assert_eq!(set.len(), 10);
        assert!(set.is_well_formed());
        assert_eq!(set.into_vec(), (0..10).collect::<Vec<_>>());
    }
}
