//! Element-wise sparse arithmetic: sum, difference and scalar product.
//!
//! Binary operations copy the left operand into the target, then fold the
//! right operand in entry by entry against a snapshot of the left operand.
//! Each fold is one atomic [`DokMatrix::update`], so a key whose combined
//! value is zero is removed rather than stored, whatever order the workers
//! reach it in. The target may be one of the operands.

pub mod add;
pub mod multiply;
pub mod subtract;

pub use add::{add_cvs, add_dok};
pub use multiply::{scale_cvs, scale_dok, scale_dok_in_place};
pub use subtract::{sub_cvs, sub_dok};

use crate::convert::compress_accumulator;
use crate::utility::util::try_fan_out;
use dokmat_core::coords;
use dokmat_core::{Cvs, DokMatrix, Element, KeyStrategy, LinearIndexMatrix, Result, SparseError};
use hashbrown::HashMap;
use std::ops::Neg;

type Snapshot<T> = HashMap<(usize, usize), T>;

/// `left + incoming`, where an absent left value reads as zero.
#[inline]
pub(crate) fn sum<T: Element>(left: Option<T>, incoming: T) -> T {
    left.map_or(incoming, |l| l + incoming)
}

/// `left - incoming`; a key only the right operand holds becomes `-incoming`.
#[inline]
pub(crate) fn difference<T: Element + Neg<Output = T>>(left: Option<T>, incoming: T) -> T {
    left.map_or(-incoming, |l| l - incoming)
}

/// Writes `entries` into `target` as-is.
pub(crate) fn seed<T: Element, K: KeyStrategy>(
    target: &DokMatrix<T, K>,
    entries: Vec<((usize, usize), T)>,
) -> Result<()> {
    try_fan_out(entries, |((i, j), v)| target.set_at(i, j, v))
}

/// Writes `op(left, entry)` into `target` for every key of `entries`,
/// deleting keys whose result is zero.
pub(crate) fn fold<T, K, F>(
    target: &DokMatrix<T, K>,
    left: &Snapshot<T>,
    entries: Vec<((usize, usize), T)>,
    op: F,
) -> Result<()>
where
    T: Element,
    K: KeyStrategy,
    F: Fn(Option<T>, T) -> T + Sync + Send,
{
    try_fan_out(entries, |((i, j), v)| {
        coords::check_coordinates(target.shape(), i, j)?;
        let next = op(left.get(&(i, j)).copied(), v);
        target.update(target.key_at(i, j), |_| (!next.is_zero()).then_some(next))?;
        Ok(())
    })
}

/// `target <- a (op) b` over DOK stores of any key strategy.
pub(crate) fn combine_dok<T, KA, KB, KT, F>(
    a: &DokMatrix<T, KA>,
    b: &DokMatrix<T, KB>,
    target: &DokMatrix<T, KT>,
    op: F,
) -> Result<()>
where
    T: Element,
    KA: KeyStrategy,
    KB: KeyStrategy,
    KT: KeyStrategy,
    F: Fn(Option<T>, T) -> T + Sync + Send,
{
    SparseError::check_shape(a.shape(), b.shape())?;
    SparseError::check_shape(a.shape(), target.shape())?;
    // Snapshot both operands first: target may alias either of them.
    let left = a.coordinate_entries();
    let right = b.coordinate_entries();
    let lookup: Snapshot<T> = left.iter().copied().collect();
    seed(target, left)?;
    fold(target, &lookup, right, op)
}

/// `a (op) b` over CVS through a linear-index keyed accumulator in `a`'s order.
pub(crate) fn combine_cvs<T, F>(a: &Cvs<T>, b: &Cvs<T>, op: F) -> Result<Cvs<T>>
where
    T: Element,
    F: Fn(Option<T>, T) -> T + Sync + Send,
{
    SparseError::check_shape(a.shape(), b.shape())?;
    let acc = LinearIndexMatrix::new(a.shape(), a.order());
    let left: Vec<((usize, usize), T)> = a.coordinate_iter().collect();
    let lookup: Snapshot<T> = left.iter().copied().collect();
    seed(&acc, left)?;
    fold(&acc, &lookup, b.coordinate_iter().collect(), op)?;
    compress_accumulator(&acc)
}
