//! Dense row-major buffer used as a decompression target.

use crate::coords;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Dense<T> {
    pub nrows: usize,
    pub ncols: usize,
    pub data: Vec<T>, // row-major, length nrows * ncols
}

impl<T: Copy> Dense<T> {
    /// Buffer with `diagonal` on the main diagonal and `default` elsewhere.
    #[must_use]
    pub fn new(shape: (usize, usize), default: T, diagonal: T) -> Self {
        let (nrows, ncols) = shape;
        let mut data = vec![default; nrows * ncols];
        for i in 0..nrows.min(ncols) {
            data[i * ncols + i] = diagonal;
        }
        Self { nrows, ncols, data }
    }

    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if coords::coordinates_in_bounds(self.shape(), row, col) {
            Some(self.data[row * self.ncols + col])
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        coords::check_coordinates(self.shape(), row, col)?;
        self.put(row, col, value);
        Ok(())
    }

    #[inline]
    pub(crate) fn put(&mut self, row: usize, col: usize, value: T) {
        debug_assert!(coords::coordinates_in_bounds(self.shape(), row, col));
        self.data[row * self.ncols + col] = value;
    }

    /// Every cell as `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let ncols = self.ncols;
        self.data
            .iter()
            .enumerate()
            .map(move |(k, &v)| (k / ncols, k % ncols, v))
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.ncols == 0 {
            return vec![Vec::new(); self.nrows];
        }
        self.data.chunks(self.ncols).map(<[T]>::to_vec).collect()
    }
}
