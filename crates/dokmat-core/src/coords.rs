//! Coordinate and linear-index arithmetic.
//!
//! Shapes are `(nrows, ncols)`. A linear index flattens `(row, col)` as
//! - **row-major**: `col + row * ncols`
//! - **column-major**: `row + col * nrows`

use crate::error::{Axis, Result, SparseError};

/// Convention for flattening 2-D coordinates to a single index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MajorOrder {
    #[default]
    RowMajor,
    ColumnMajor,
}

/// Shape of an `order x order` matrix.
#[inline]
#[must_use]
pub const fn square(order: usize) -> (usize, usize) {
    (order, order)
}

/// Number of cells, failing with [`SparseError::ShapeOverflow`] when it does
/// not fit in `usize`. Linear indices are only defined for shapes that pass.
#[inline]
pub const fn linear_len(shape: (usize, usize)) -> Result<usize> {
    match shape.0.checked_mul(shape.1) {
        Some(len) => Ok(len),
        None => Err(SparseError::ShapeOverflow {
            nrows: shape.0,
            ncols: shape.1,
        }),
    }
}

/// Flattens in-bounds coordinates. Exact whenever [`linear_len`] accepts the
/// shape; otherwise the arithmetic wraps instead of panicking, and callers
/// reject the shape before using the result.
#[inline]
#[must_use]
pub const fn to_linear_index(shape: (usize, usize), row: usize, col: usize, order: MajorOrder) -> usize {
    match order {
        MajorOrder::RowMajor => col.wrapping_add(row.wrapping_mul(shape.1)),
        MajorOrder::ColumnMajor => row.wrapping_add(col.wrapping_mul(shape.0)),
    }
}

/// Inverse of [`to_linear_index`].
///
/// A degenerate shape (zero extent on the divisor axis) maps every index to a
/// coordinate that fails [`check_coordinates`].
#[inline]
#[must_use]
pub const fn to_coordinates(shape: (usize, usize), index: usize, order: MajorOrder) -> (usize, usize) {
    match order {
        MajorOrder::RowMajor => {
            if shape.1 == 0 {
                return (index, 0);
            }
            (index / shape.1, index % shape.1)
        }
        MajorOrder::ColumnMajor => {
            if shape.0 == 0 {
                return (0, index);
            }
            (index % shape.0, index / shape.0)
        }
    }
}

#[inline]
#[must_use]
pub const fn transpose_coordinates(row: usize, col: usize) -> (usize, usize) {
    (col, row)
}

/// Transposes a linear index. Returns the swapped shape together with the
/// index of the transposed coordinates, encoded in the same `order` over the
/// swapped shape.
#[inline]
#[must_use]
pub const fn transpose_linear_index(
    shape: (usize, usize),
    index: usize,
    order: MajorOrder,
) -> ((usize, usize), usize) {
    let swapped = (shape.1, shape.0);
    let (row, col) = to_coordinates(shape, index, order);
    let (t_row, t_col) = transpose_coordinates(row, col);
    (swapped, to_linear_index(swapped, t_row, t_col, order))
}

/// Re-encodes `index` from one major order to another over the same shape.
#[inline]
#[must_use]
pub const fn reorder_linear_index(shape: (usize, usize), index: usize, from: MajorOrder, to: MajorOrder) -> usize {
    let (row, col) = to_coordinates(shape, index, from);
    to_linear_index(shape, row, col, to)
}

/// Fails with [`SparseError::CoordinateOutOfBounds`] naming the first
/// offending axis (row is checked before column).
#[inline]
pub const fn check_coordinates(shape: (usize, usize), row: usize, col: usize) -> Result<()> {
    if row >= shape.0 {
        return Err(SparseError::CoordinateOutOfBounds {
            axis: Axis::Row,
            index: row,
            extent: shape.0,
        });
    }
    if col >= shape.1 {
        return Err(SparseError::CoordinateOutOfBounds {
            axis: Axis::Column,
            index: col,
            extent: shape.1,
        });
    }
    Ok(())
}

/// Non-failing variant of [`check_coordinates`].
#[inline]
#[must_use]
pub const fn coordinates_in_bounds(shape: (usize, usize), row: usize, col: usize) -> bool {
    row < shape.0 && col < shape.1
}
