//! CVS (compressed value storage) format definitions and in-place transforms
//!
//! Each distinct stored value `data[k]` owns a sorted list `indices[k]` of the
//! linear indices (in `order`) where it occurs. The lists are pairwise
//! disjoint; positions absent from every list hold the implicit
//! default/diagonal value.

use rayon::prelude::*;

use crate::coords::{self, MajorOrder};
use crate::element::Element;
use crate::error::{Result, SparseError};

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Cvs<T> {
    pub data: Vec<T>,              // distinct values
    pub indices: Vec<Vec<usize>>,  // sorted linear indices per value
    pub order: MajorOrder,
    pub nrows: usize,
    pub ncols: usize,
}

impl<T> Cvs<T> {
    /// Total number of stored positions.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.indices.iter().map(Vec::len).sum()
    }

    /// Number of value slots.
    #[inline]
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    #[must_use]
    pub const fn order(&self) -> MajorOrder {
        self.order
    }

    #[must_use]
    pub const fn empty(shape: (usize, usize), order: MajorOrder) -> Self {
        Self {
            data: Vec::new(),
            indices: Vec::new(),
            order,
            nrows: shape.0,
            ncols: shape.1,
        }
    }

    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        order: MajorOrder,
        data: Vec<T>,
        indices: Vec<Vec<usize>>,
        check: bool,
    ) -> Result<Self> {
        if data.len() != indices.len() {
            return Err(SparseError::invalid("data and indices must have equal length"));
        }
        if check {
            let len = coords::linear_len((nrows, ncols))?;
            let mut all: Vec<usize> = Vec::with_capacity(indices.iter().map(Vec::len).sum());
            for list in &indices {
                if list.windows(2).any(|w| w[0] >= w[1]) {
                    return Err(SparseError::invalid(
                        "linear indices must be strictly increasing within each value",
                    ));
                }
                if list.last().is_some_and(|&li| li >= len) {
                    return Err(SparseError::invalid("linear index out of bounds"));
                }
                all.extend_from_slice(list);
            }
            all.par_sort_unstable();
            if all.windows(2).any(|w| w[0] == w[1]) {
                return Err(SparseError::invalid("a linear index appears under two values"));
            }
        }
        Ok(Self {
            data,
            indices,
            order,
            nrows,
            ncols,
        })
    }

    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        order: MajorOrder,
        data: Vec<T>,
        indices: Vec<Vec<usize>>,
    ) -> Self {
        Self {
            data,
            indices,
            order,
            nrows,
            ncols,
        }
    }

    /// `(data, indices, order, shape)`
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Vec<Vec<usize>>, MajorOrder, (usize, usize)) {
        (self.data, self.indices, self.order, (self.nrows, self.ncols))
    }
}

impl<T: Element> Cvs<T> {
    /// `(linear index, value)` for every stored position, grouped by value.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.data
            .iter()
            .zip(&self.indices)
            .flat_map(|(&v, list)| list.iter().map(move |&li| (li, v)))
    }

    /// `((row, col), value)` for every stored position.
    pub fn coordinate_iter(&self) -> impl Iterator<Item = ((usize, usize), T)> + '_ {
        let shape = self.shape();
        let order = self.order;
        self.iter()
            .map(move |(li, v)| (coords::to_coordinates(shape, li, order), v))
    }

    /// Re-encodes every index under `order` and re-sorts. No-op when unchanged.
    pub fn set_order(&mut self, order: MajorOrder) {
        if order == self.order {
            return;
        }
        let shape = self.shape();
        let from = self.order;
        self.indices.par_iter_mut().for_each(|list| {
            for li in list.iter_mut() {
                *li = coords::reorder_linear_index(shape, *li, from, order);
            }
            list.sort_unstable();
        });
        self.order = order;
    }

    /// Transposes in place: swaps the shape and recomputes every index.
    pub fn transpose(&mut self) {
        let shape = self.shape();
        let order = self.order;
        self.indices.par_iter_mut().for_each(|list| {
            for li in list.iter_mut() {
                *li = coords::transpose_linear_index(shape, *li, order).1;
            }
            list.sort_unstable();
        });
        self.nrows = shape.1;
        self.ncols = shape.0;
    }

    /// Multiplies every distinct value by `scalar`. A zero scalar empties the
    /// matrix; slots whose product is zero are dropped.
    pub fn scale_in_place(&mut self, scalar: T) {
        if scalar.is_zero() {
            self.data.clear();
            self.indices.clear();
            return;
        }
        let data = std::mem::take(&mut self.data);
        let indices = std::mem::take(&mut self.indices);
        for (v, list) in data.into_iter().zip(indices) {
            let product = v * scalar;
            if !product.is_zero() {
                self.data.push(product);
                self.indices.push(list);
            }
        }
    }
}
