//! Compression (DOK -> CRS/CCS/CVS), decompression (-> DOK / dense) and
//! CRS <-> CCS conversion.
#![allow(
    clippy::many_single_char_names,
    reason = "Math kernels conventionally use i/j/k/p for indices"
)]
use std::cmp::Ordering;

use crate::utility::util::{sort_by, sort_by_key, try_fan_out};
use dokmat_core::coords::{self, MajorOrder};
use dokmat_core::{Ccs, Crs, Cvs, Dense, DokMatrix, Element, KeyStrategy, LinearIndexKeys, Result, SparseError};

/// Builds `indptr`/`indices`/`data` from entries sorted by `(line, secondary)`.
///
/// One pointer is emitted for every line up to and including the entry's own
/// line, so leading, interior and trailing empty lines all get fill-in.
fn compress_lines<T: Copy>(
    nlines: usize,
    sorted: &[(usize, usize, T)],
) -> Result<(Vec<usize>, Vec<usize>, Vec<T>)> {
    let mut indptr = Vec::with_capacity(nlines + 1);
    let mut indices = Vec::with_capacity(sorted.len());
    let mut data = Vec::with_capacity(sorted.len());
    let mut next_line = 0usize;
    for &(line, secondary, v) in sorted {
        while next_line <= line {
            indptr.push(data.len());
            next_line += 1;
        }
        indices.push(secondary);
        data.push(v);
    }
    while next_line <= nlines {
        indptr.push(data.len());
        next_line += 1;
    }
    let pointer_total = indptr.last().copied().unwrap_or(0);
    if pointer_total != data.len() || indptr.len() != nlines + 1 {
        return Err(SparseError::CompressionInvariantViolation {
            nnz: data.len(),
            pointer_total,
        });
    }
    Ok((indptr, indices, data))
}

/// DOK -> CRS
pub fn compress_crs<T: Element, K: KeyStrategy>(a: &DokMatrix<T, K>) -> Result<Crs<T>> {
    let (nrows, ncols) = a.shape();
    let mut triples: Vec<(usize, usize, T)> = a
        .coordinate_entries()
        .into_iter()
        .map(|((i, j), v)| (i, j, v))
        .collect();
    sort_by_key(&mut triples, |&(i, j, _)| (i, j));
    let (indptr, indices, data) = compress_lines(nrows, &triples)?;
    Ok(Crs::from_parts_unchecked(nrows, ncols, indptr, indices, data))
}

/// DOK -> CCS
pub fn compress_ccs<T: Element, K: KeyStrategy>(a: &DokMatrix<T, K>) -> Result<Ccs<T>> {
    let (nrows, ncols) = a.shape();
    let mut triples: Vec<(usize, usize, T)> = a
        .coordinate_entries()
        .into_iter()
        .map(|((i, j), v)| (j, i, v))
        .collect();
    sort_by_key(&mut triples, |&(j, i, _)| (j, i));
    let (indptr, indices, data) = compress_lines(ncols, &triples)?;
    Ok(Ccs::from_parts_unchecked(nrows, ncols, indptr, indices, data))
}

/// DOK -> CVS with indices encoded in `order`.
///
/// Distinct values are listed in order of their first occurrence by linear
/// index, so the result does not depend on the store's hash order. Fails with
/// `ShapeOverflow` when the shape has no linear indexing.
pub fn compress_cvs<T: Element, K: KeyStrategy>(a: &DokMatrix<T, K>, order: MajorOrder) -> Result<Cvs<T>> {
    let shape = a.shape();
    coords::linear_len(shape)?;
    let pairs: Vec<(usize, T)> = a
        .coordinate_entries()
        .into_iter()
        .map(|((i, j), v)| (coords::to_linear_index(shape, i, j, order), v))
        .collect();
    let (data, indices) = group_by_value(pairs);
    Ok(Cvs::from_parts_unchecked(shape.0, shape.1, order, data, indices))
}

/// Groups `(linear index, value)` pairs into value slots.
///
/// Pairs are ordered by `(value, index)` so equal values sit next to each
/// other; values that do not compare with themselves (NaN) each get their own
/// slot. Slots are then ordered by their smallest index.
fn group_by_value<T: Element>(pairs: Vec<(usize, T)>) -> (Vec<T>, Vec<Vec<usize>>) {
    let (mut ordered, loose): (Vec<(usize, T)>, Vec<(usize, T)>) =
        pairs.into_iter().partition(|(_, v)| v.partial_cmp(v).is_some());
    sort_by(&mut ordered, |(la, va), (lb, vb)| {
        va.partial_cmp(vb).unwrap_or(Ordering::Equal).then(la.cmp(lb))
    });
    let mut slots: Vec<(T, Vec<usize>)> = Vec::new();
    for (li, v) in ordered {
        match slots.last_mut() {
            Some((d, list)) if *d == v => list.push(li),
            _ => slots.push((v, vec![li])),
        }
    }
    slots.extend(loose.into_iter().map(|(li, v)| (v, vec![li])));
    sort_by_key(&mut slots, |(_, list)| list.first().copied().unwrap_or(usize::MAX));
    slots.into_iter().unzip()
}

/// Linear-index keyed DOK -> CVS in the accumulator's own order.
pub(crate) fn compress_accumulator<T: Element>(acc: &DokMatrix<T, LinearIndexKeys>) -> Result<Cvs<T>> {
    compress_cvs(acc, acc.order())
}

/// CRS -> DOK. `target` must have the same shape; rows are written in parallel.
pub fn decompress_crs<T: Element, K: KeyStrategy>(a: &Crs<T>, target: &DokMatrix<T, K>) -> Result<()> {
    SparseError::check_shape(a.shape(), target.shape())?;
    let rows: Vec<usize> = (0..a.nrows).filter(|&i| a.indptr[i] < a.indptr[i + 1]).collect();
    try_fan_out(rows, |i| {
        let (cols, vals) = a.row(i);
        for (&j, &v) in cols.iter().zip(vals) {
            target.set_at(i, j, v)?;
        }
        Ok(())
    })
}

/// CCS -> DOK. `target` must have the same shape; columns are written in parallel.
pub fn decompress_ccs<T: Element, K: KeyStrategy>(a: &Ccs<T>, target: &DokMatrix<T, K>) -> Result<()> {
    SparseError::check_shape(a.shape(), target.shape())?;
    let cols: Vec<usize> = (0..a.ncols).filter(|&j| a.indptr[j] < a.indptr[j + 1]).collect();
    try_fan_out(cols, |j| {
        let (rows, vals) = a.col(j);
        for (&i, &v) in rows.iter().zip(vals) {
            target.set_at(i, j, v)?;
        }
        Ok(())
    })
}

/// CVS -> DOK. A linear-index keyed target must share the CVS major order.
pub fn decompress_cvs<T: Element, K: KeyStrategy>(a: &Cvs<T>, target: &DokMatrix<T, K>) -> Result<()> {
    SparseError::check_shape(a.shape(), target.shape())?;
    if K::IS_LINEAR && target.order() != a.order() {
        return Err(SparseError::ModeMismatch {
            expected: a.order(),
            actual: target.order(),
        });
    }
    let shape = a.shape();
    let order = a.order();
    let slots: Vec<usize> = (0..a.distinct()).collect();
    try_fan_out(slots, |k| {
        let v = a.data[k];
        for &li in &a.indices[k] {
            let (i, j) = coords::to_coordinates(shape, li, order);
            target.set_at(i, j, v)?;
        }
        Ok(())
    })
}

pub fn crs_to_dense<T: Element>(a: &Crs<T>, default: T, diagonal: T) -> Result<Dense<T>> {
    let mut dense = Dense::new(a.shape(), default, diagonal);
    for i in 0..a.nrows {
        let (cols, vals) = a.row(i);
        for (&j, &v) in cols.iter().zip(vals) {
            dense.set(i, j, v)?;
        }
    }
    Ok(dense)
}

pub fn ccs_to_dense<T: Element>(a: &Ccs<T>, default: T, diagonal: T) -> Result<Dense<T>> {
    let mut dense = Dense::new(a.shape(), default, diagonal);
    for j in 0..a.ncols {
        let (rows, vals) = a.col(j);
        for (&i, &v) in rows.iter().zip(vals) {
            dense.set(i, j, v)?;
        }
    }
    Ok(dense)
}

pub fn cvs_to_dense<T: Element>(a: &Cvs<T>, default: T, diagonal: T) -> Result<Dense<T>> {
    let mut dense = Dense::new(a.shape(), default, diagonal);
    for ((i, j), v) in a.coordinate_iter() {
        dense.set(i, j, v)?;
    }
    Ok(dense)
}

/// Counting-sort regroup of a compressed structure by its secondary index.
/// Secondary indices come out increasing because lines are visited in order.
fn regroup<T: Copy>(
    nlines: usize,
    nsecondary: usize,
    indptr: &[usize],
    indices: &[usize],
    data: &[T],
) -> (Vec<usize>, Vec<usize>, Vec<T>) {
    let mut out_ptr = vec![0usize; nsecondary + 1];
    for &j in indices {
        out_ptr[j + 1] += 1;
    }
    for j in 0..nsecondary {
        out_ptr[j + 1] += out_ptr[j];
    }
    let mut next = out_ptr.clone();
    let mut out_idx = vec![0usize; indices.len()];
    let mut out_data = data.to_vec();
    for i in 0..nlines {
        for p in indptr[i]..indptr[i + 1] {
            let j = indices[p];
            let dst = next[j];
            out_idx[dst] = i;
            out_data[dst] = data[p];
            next[j] += 1;
        }
    }
    (out_ptr, out_idx, out_data)
}

/// Convert CRS -> CCS
#[must_use]
pub fn crs_to_ccs<T: Element>(a: &Crs<T>) -> Ccs<T> {
    let (indptr, indices, data) = regroup(a.nrows, a.ncols, &a.indptr, &a.indices, &a.data);
    Ccs::from_parts_unchecked(a.nrows, a.ncols, indptr, indices, data)
}

/// Convert CCS -> CRS
#[must_use]
pub fn ccs_to_crs<T: Element>(a: &Ccs<T>) -> Crs<T> {
    let (indptr, indices, data) = regroup(a.ncols, a.nrows, &a.indptr, &a.indices, &a.data);
    Crs::from_parts_unchecked(a.nrows, a.ncols, indptr, indices, data)
}
