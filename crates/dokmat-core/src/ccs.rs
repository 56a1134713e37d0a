//! CCS (compressed column storage) format definitions and constructors

use crate::crs::validate_compressed;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Ccs<T> {
    pub data: Vec<T>,
    pub indices: Vec<usize>, // row indices per column
    pub indptr: Vec<usize>,  // column pointer, length ncols + 1
    pub nrows: usize,
    pub ncols: usize,
}

impl<T> Ccs<T> {
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[must_use]
    pub fn empty(shape: (usize, usize)) -> Self {
        Self {
            data: Vec::new(),
            indices: Vec::new(),
            indptr: vec![0; shape.1 + 1],
            nrows: shape.0,
            ncols: shape.1,
        }
    }

    /// Column `j`'s `(row, value)` span.
    #[inline]
    #[must_use]
    pub fn col(&self, j: usize) -> (&[usize], &[T]) {
        let (s, e) = (self.indptr[j], self.indptr[j + 1]);
        (&self.indices[s..e], &self.data[s..e])
    }

    #[inline]
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<T>,
        check: bool,
    ) -> Result<Self> {
        validate_compressed(ncols, nrows, &indptr, &indices, data.len(), check, "column", "row")?;
        Ok(Self {
            data,
            indices,
            indptr,
            nrows,
            ncols,
        })
    }

    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<T>,
    ) -> Self {
        Self {
            data,
            indices,
            indptr,
            nrows,
            ncols,
        }
    }

    /// `(data, indptr, indices, shape)`
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Vec<usize>, Vec<usize>, (usize, usize)) {
        (self.data, self.indptr, self.indices, (self.nrows, self.ncols))
    }
}
