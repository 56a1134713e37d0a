//! Sparse x sparse matrix products.
//!
//! Row-by-row (Gustavson) accumulation: `b` is bucketed by row, then every
//! row `i` of `a` gathers `sum_k a[i,k] * b[k,j]` into a worker-local map
//! before the totals are folded into the target. Rows are independent, so
//! large inputs fan out one row per task.
#![allow(
    clippy::many_single_char_names,
    reason = "Math kernels conventionally use i/j/k/v to denote indices and values"
)]

use crate::convert::compress_accumulator;
use crate::utility::util::try_fan_out;
use dokmat_core::{Cvs, DokMatrix, Element, KeyStrategy, LinearIndexMatrix, Result, SparseError};
use hashbrown::HashMap;

/// Buckets `((row, col), value)` triples by row.
fn bucket_rows<T: Copy>(nrows: usize, entries: Vec<((usize, usize), T)>) -> Vec<Vec<(usize, T)>> {
    let mut rows: Vec<Vec<(usize, T)>> = vec![Vec::new(); nrows];
    for ((i, j), v) in entries {
        rows[i].push((j, v));
    }
    rows
}

/// Accumulates `a @ b` into `target`; zero totals are removed.
fn spgemm_into<T: Element, K: KeyStrategy>(
    a_rows: Vec<Vec<(usize, T)>>,
    b_rows: &[Vec<(usize, T)>],
    target: &DokMatrix<T, K>,
) -> Result<()> {
    let work: Vec<(usize, Vec<(usize, T)>)> = a_rows
        .into_iter()
        .enumerate()
        .filter(|(_, row)| !row.is_empty())
        .collect();
    try_fan_out(work, |(i, row)| {
        let mut acc: HashMap<usize, T> = HashMap::new();
        for (k, va) in row {
            for &(j, vb) in &b_rows[k] {
                let slot = acc.entry(j).or_insert_with(T::zero);
                *slot = *slot + va * vb;
            }
        }
        for (j, partial) in acc {
            target.update(target.key_at(i, j), |stored| {
                let total = stored.map_or(partial, |s| s + partial);
                (!total.is_zero()).then_some(total)
            })?;
        }
        Ok(())
    })
}

/// `target <- target + a @ b`. Requires `a.ncols == b.nrows` and
/// `target.shape() == (a.nrows, b.ncols)`; pass an empty target for a plain
/// product.
pub fn matmul_dok<T, KA, KB, KT>(a: &DokMatrix<T, KA>, b: &DokMatrix<T, KB>, target: &DokMatrix<T, KT>) -> Result<()>
where
    T: Element,
    KA: KeyStrategy,
    KB: KeyStrategy,
    KT: KeyStrategy,
{
    let (m, n) = a.shape();
    let (bn, p) = b.shape();
    if n != bn {
        return Err(SparseError::SizeMismatch {
            expected: (n, p),
            actual: (bn, p),
        });
    }
    SparseError::check_shape((m, p), target.shape())?;
    let a_rows = bucket_rows(m, a.coordinate_entries());
    let b_rows = bucket_rows(bn, b.coordinate_entries());
    spgemm_into(a_rows, &b_rows, target)
}

/// `a @ b` as a new CVS in `a`'s major order. Requires `a.ncols == b.nrows`.
pub fn matmul_cvs<T: Element>(a: &Cvs<T>, b: &Cvs<T>) -> Result<Cvs<T>> {
    let (m, n) = a.shape();
    let (bn, p) = b.shape();
    if n != bn {
        return Err(SparseError::SizeMismatch {
            expected: (n, p),
            actual: (bn, p),
        });
    }
    let acc = LinearIndexMatrix::new((m, p), a.order());
    let a_rows = bucket_rows(m, a.coordinate_iter().collect());
    let b_rows = bucket_rows(bn, b.coordinate_iter().collect());
    spgemm_into(a_rows, &b_rows, &acc)?;
    compress_accumulator(&acc)
}
