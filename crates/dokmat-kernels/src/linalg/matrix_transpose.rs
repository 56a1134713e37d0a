//! Matrix transpose kernels for DOK, CRS, CCS and CVS.
//!
//! - **DOK**: every entry is rewritten at `(col, row)` in a caller-supplied
//!   target whose shape is already the transposed shape
//! - **CRS / CCS**: counting-sort regroup by the secondary index; the result
//!   keeps its storage orientation
//! - **CVS**: every linear index is re-encoded over the swapped shape in the
//!   same major order and each list re-sorted

use crate::convert::{ccs_to_crs, crs_to_ccs};
use crate::utility::util::try_fan_out;
use dokmat_core::coords;
use dokmat_core::{Ccs, Crs, Cvs, DokMatrix, Element, KeyStrategy, Result, SparseError};
use rayon::prelude::*;

/// `target <- a^T`. `target` must be `(a.ncols, a.nrows)`; for square
/// matrices that is `a.shape()`.
pub fn transpose_dok<T, KA, KT>(a: &DokMatrix<T, KA>, target: &DokMatrix<T, KT>) -> Result<()>
where
    T: Element,
    KA: KeyStrategy,
    KT: KeyStrategy,
{
    let (nrows, ncols) = a.shape();
    SparseError::check_shape((ncols, nrows), target.shape())?;
    let entries = a.coordinate_entries();
    try_fan_out(entries, |((i, j), v)| {
        let (ti, tj) = coords::transpose_coordinates(i, j);
        target.set_at(ti, tj, v)
    })
}

/// CRS (m x n) -> CRS (n x m).
///
/// The column-grouped form of `a` is exactly the row-grouped form of `a^T`.
#[must_use]
pub fn transpose_crs<T: Element>(a: &Crs<T>) -> Crs<T> {
    let (data, indptr, indices, (nrows, ncols)) = crs_to_ccs(a).into_parts();
    Crs::from_parts_unchecked(ncols, nrows, indptr, indices, data)
}

/// CCS (m x n) -> CCS (n x m).
#[must_use]
pub fn transpose_ccs<T: Element>(a: &Ccs<T>) -> Ccs<T> {
    let (data, indptr, indices, (nrows, ncols)) = ccs_to_crs(a).into_parts();
    Ccs::from_parts_unchecked(ncols, nrows, indptr, indices, data)
}

/// Transposed copy of a CVS; `a` is left untouched. See [`Cvs::transpose`]
/// for the in-place variant.
#[must_use]
pub fn transpose_cvs<T: Element>(a: &Cvs<T>) -> Cvs<T> {
    let shape = a.shape();
    let order = a.order();
    let indices: Vec<Vec<usize>> = a
        .indices
        .par_iter()
        .map(|list| {
            let mut out: Vec<usize> = list
                .iter()
                .map(|&li| coords::transpose_linear_index(shape, li, order).1)
                .collect();
            out.sort_unstable();
            out
        })
        .collect();
    Cvs::from_parts_unchecked(shape.1, shape.0, order, a.data.clone(), indices)
}
