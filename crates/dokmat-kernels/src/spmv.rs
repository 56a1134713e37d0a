//! Matrix-vector products `y = A @ x` over DOK, CRS, CCS and CVS.
#![allow(
    clippy::many_single_char_names,
    reason = "Math kernels conventionally use i/j/k/p/s/e to denote indices and pointers"
)]
use crate::utility::util::{SMALL_DIM_LIMIT, SMALL_NNZ_LIMIT, STRIPE};
use dokmat_core::{Ccs, Crs, Cvs, DokMatrix, Element, KeyStrategy, Result, SparseError};
use rayon::prelude::*;
use std::cell::RefCell;
use thread_local::ThreadLocal;

#[inline]
fn check_vector<T>(shape: (usize, usize), x: &[T]) -> Result<()> {
    if x.len() == shape.1 {
        Ok(())
    } else {
        Err(SparseError::SizeMismatch {
            expected: (shape.1, 1),
            actual: (x.len(), 1),
        })
    }
}

/// Accumulates `y[i] += v * x[j]` over `((i, j), v)` triples. Large inputs are
/// split into stripes, each thread summing into its own dense accumulator;
/// the per-thread vectors are reduced once all stripes are done.
fn scatter_rows<T: Element>(nrows: usize, x: &[T], triples: &[((usize, usize), T)]) -> Vec<T> {
    if triples.len() <= SMALL_NNZ_LIMIT {
        let mut y = vec![T::zero(); nrows];
        for &((i, j), v) in triples {
            y[i] = y[i] + v * x[j];
        }
        return y;
    }
    let tls: ThreadLocal<RefCell<Vec<T>>> = ThreadLocal::new();
    triples.par_chunks(STRIPE).for_each(|chunk| {
        let mut acc = tls.get_or(|| RefCell::new(vec![T::zero(); nrows])).borrow_mut();
        for &((i, j), v) in chunk {
            acc[i] = acc[i] + v * x[j];
        }
    });
    let mut y = vec![T::zero(); nrows];
    for acc in tls {
        for (yi, part) in y.iter_mut().zip(acc.into_inner()) {
            *yi = *yi + part;
        }
    }
    y
}

/// y = A @ x for a DOK store. Rows without entries stay zero.
pub fn spmv_dok<T: Element, K: KeyStrategy>(a: &DokMatrix<T, K>, x: &[T]) -> Result<Vec<T>> {
    check_vector(a.shape(), x)?;
    let triples = a.coordinate_entries();
    Ok(scatter_rows(a.shape().0, x, &triples))
}

#[inline]
fn spmv_row<T: Element>(a: &Crs<T>, x: &[T], i: usize) -> T {
    let (cols, vals) = a.row(i);
    cols.iter()
        .zip(vals)
        .fold(T::zero(), |acc, (&j, &v)| acc + v * x[j])
}

/// y = A @ x for CRS: rows are independent, so large inputs split by row.
pub fn spmv_crs<T: Element>(a: &Crs<T>, x: &[T]) -> Result<Vec<T>> {
    check_vector(a.shape(), x)?;
    let nrows = a.nrows;
    let mut y = vec![T::zero(); nrows];
    let small = nrows <= SMALL_DIM_LIMIT || a.nnz() <= SMALL_NNZ_LIMIT;
    if small {
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = spmv_row(a, x, i);
        }
    } else {
        y.par_iter_mut()
            .enumerate()
            .for_each(|(i, yi)| *yi = spmv_row(a, x, i));
    }
    Ok(y)
}

/// y = A @ x for CCS: column-outer, scattering into `y[row]`.
pub fn spmv_ccs<T: Element>(a: &Ccs<T>, x: &[T]) -> Result<Vec<T>> {
    check_vector(a.shape(), x)?;
    let nrows = a.nrows;
    let small = a.ncols <= SMALL_DIM_LIMIT || a.nnz() <= SMALL_NNZ_LIMIT;
    if small {
        let mut y = vec![T::zero(); nrows];
        for (j, &xj) in x.iter().enumerate() {
            let (rows, vals) = a.col(j);
            for (&i, &v) in rows.iter().zip(vals) {
                y[i] = y[i] + v * xj;
            }
        }
        return Ok(y);
    }

    let tls: ThreadLocal<RefCell<Vec<T>>> = ThreadLocal::new();
    (0..a.ncols).into_par_iter().for_each(|j| {
        let xj = x[j];
        let (rows, vals) = a.col(j);
        if rows.is_empty() {
            return;
        }
        let mut acc = tls.get_or(|| RefCell::new(vec![T::zero(); nrows])).borrow_mut();
        for (&i, &v) in rows.iter().zip(vals) {
            acc[i] = acc[i] + v * xj;
        }
    });
    let mut y = vec![T::zero(); nrows];
    for acc in tls {
        for (yi, part) in y.iter_mut().zip(acc.into_inner()) {
            *yi = *yi + part;
        }
    }
    Ok(y)
}

/// y = A @ x for CVS, driven by the (value, index list) slots.
pub fn spmv_cvs<T: Element>(a: &Cvs<T>, x: &[T]) -> Result<Vec<T>> {
    check_vector(a.shape(), x)?;
    let triples: Vec<((usize, usize), T)> = a.coordinate_iter().collect();
    Ok(scatter_rows(a.nrows, x, &triples))
}
