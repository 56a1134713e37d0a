//! Error types for dokmat

use std::fmt;

use thiserror::Error;

use crate::coords::MajorOrder;

/// Matrix axis named by a bounds failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Column => f.write_str("column"),
        }
    }
}

/// Errors raised by sparse matrix construction and kernels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SparseError {
    /// A row or column lies outside `[0, extent)`.
    #[error("{axis} coordinate {index} is out of bounds for extent {extent}")]
    CoordinateOutOfBounds {
        axis: Axis,
        index: usize,
        extent: usize,
    },

    /// Operands or target have incompatible shapes.
    #[error("Size mismatch: expected ({}, {}), got ({}, {})", .expected.0, .expected.1, .actual.0, .actual.1)]
    SizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// `nrows * ncols` does not fit in a linear index.
    #[error("Shape ({nrows}, {ncols}) has more cells than a linear index can address")]
    ShapeOverflow { nrows: usize, ncols: usize },

    /// Major orders of a CVS and its counterpart disagree.
    #[error("Major order mismatch: expected {expected:?}, got {actual:?}")]
    ModeMismatch {
        expected: MajorOrder,
        actual: MajorOrder,
    },

    /// The compression scan produced a pointer total that disagrees with NNZ.
    #[error("Compression invariant violated: pointer total {pointer_total} != nnz {nnz}")]
    CompressionInvariantViolation { nnz: usize, pointer_total: usize },

    /// Raw parts handed to a validated constructor are malformed.
    #[error("Invalid structure: {reason}")]
    InvalidStructure { reason: String },
}

impl SparseError {
    #[inline]
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidStructure {
            reason: reason.into(),
        }
    }

    /// Shape check shared by every binary kernel.
    #[inline]
    pub fn check_shape(expected: (usize, usize), actual: (usize, usize)) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::SizeMismatch { expected, actual })
        }
    }
}

/// Result type for sparse matrix operations
pub type Result<T> = std::result::Result<T, SparseError>;
