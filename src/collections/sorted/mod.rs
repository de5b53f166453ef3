//! Sorted, duplicate-free sets of vertex identities.
//!
//! Two layouts share the same contract:
//! - [`SortedVecSet`]: one contiguous sorted vector, best for low degrees.
//! - [`BlockListSet`]: an unrolled skip list of bounded sorted blocks, which caps the
//!   element shift of a single insertion at the block size.
//!
//! Both expose their contents as ascending iterators, so intersections are a single
//! two-pointer merge regardless of layout.

pub mod large_set;
pub mod small_set;

pub use large_set::{BlockListSet, LargeSet};
pub use small_set::{SmallSet, SortedVecSet};

use core::cmp::Ordering;

/// Maximum number of elements in a single block, and the degree at which a vertex
/// switches between the two layouts.
pub const BLOCK_SIZE: usize = 128;

/// Intersects two ascending, duplicate-free sequences.
///
/// Runs in `O(n + m)`; equal elements are emitted once.
pub fn intersect_sorted<'a, T, A, B>(left: A, right: B) -> Vec<T>
where
    T: Ord + Clone + 'a,
    A: IntoIterator<Item = &'a T>,
    B: IntoIterator<Item = &'a T>,
{
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    let mut out = Vec::new();

    let (mut a, mut b) = (left.next(), right.next());
    while let (Some(x), Some(y)) = (a, b) {
        match x.cmp(y) {
            Ordering::Less => a = left.next(),
            Ordering::Greater => b = right.next(),
            Ordering::Equal => {
                out.push(x.clone());
                a = left.next();
                b = right.next();
            }
        }
    }
    out
}

/// Returns `true` if every element is strictly greater than its predecessor.
pub fn is_strictly_ascending<'a, T, I>(items: I) -> bool
where
    T: Ord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut iter = items.into_iter();
    let Some(mut prev) = iter.next() else {
        return true;
    };
    for next in iter {
        if prev >= next {
            return false;
        }
        prev = next;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_emits_common_elements_in_order() {
        let a = [1, 3, 5, 7, 9];
        let b = [2, 3, 4, 7, 10];
        assert_eq!(intersect_sorted(&a, &b), vec![3, 7]);
    }

    #[test]
    fn intersect_with_empty_side_is_empty() {
        let a: [u32; 0] = [];
        assert!(intersect_sorted(&a, &[1, 2, 3]).is_empty());
        assert!(intersect_sorted(&[1, 2, 3], &a).is_empty());
    }

    #[test]
    fn strictly_ascending_rejects_duplicates() {
        assert!(is_strictly_ascending(&[1, 2, 3]));
        assert!(is_strictly_ascending::<u8, _>(&[]));
        assert!(!is_strictly_ascending(&[1, 2, 2]));
        assert!(!is_strictly_ascending(&[3, 1]));
    }
}
