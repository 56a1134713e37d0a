//! Numeric element bound shared by every container and kernel.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

use num_traits::Zero;

/// Scalar type storable in a sparse matrix.
///
/// Arithmetic is delegated to the type's own operators; "zero" is the value
/// that sparse results never store. `PartialOrd` lets compression group equal
/// values by sorting. Operations that need an additive inverse ask for `Neg`
/// separately, so unsigned types remain valid elements.
pub trait Element:
    Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Zero
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Send
    + Sync
    + 'static
{
}

impl<T> Element for T where
    T: Copy
        + PartialEq
        + PartialOrd
        + Debug
        + Zero
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Send
        + Sync
        + 'static
{
}
