//! The logical vertex identity contract.
//!
//! Identities are used directly as ordered keys: adjacency sets sort by `Ord`
//! and the identity index hashes them. An identity can be *undefined*, which is
//! how the engine models a missing element. Signed integers are defined only
//! when non-negative.

use core::fmt::Debug;
use core::hash::Hash;
use num_traits::Signed;

/// A client-visible, totally ordered vertex identity.
pub trait VertexId: Clone + Ord + Hash + Debug {
    /// Returns `false` for values that must never be stored as a vertex or neighbor.
    #[inline]
    fn is_defined(&self) -> bool {
        true
    }
}

#[inline]
fn non_negative<S: Signed>(value: &S) -> bool {
    !value.is_negative()
}

macro_rules! impl_unsigned {
    ($($t:ty),* $(,)?) => {
        $(impl VertexId for $t {})*
    };
}

macro_rules! impl_signed {
    ($($t:ty),* $(,)?) => {
        $(
            impl VertexId for $t {
                #[inline]
                fn is_defined(&self) -> bool {
                    non_negative(self)
                }
            }
        )*
    };
}

impl_unsigned!(u8, u16, u32, u64, u128, usize);
impl_signed!(i8, i16, i32, i64, i128, isize);

impl VertexId for char {}
impl VertexId for String {}
impl VertexId for &'static str {}
