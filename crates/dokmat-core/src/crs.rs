//! CRS (compressed row storage) format definitions and constructors

use crate::error::{Result, SparseError};

/// Row-major compressed matrix.
///
/// `indptr[i]..indptr[i + 1]` spans row `i`'s entries in `data`/`indices`,
/// with column indices strictly increasing inside the span. Empty rows are
/// equal adjacent pointers.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Crs<T> {
    pub data: Vec<T>,
    pub indices: Vec<usize>, // column index per entry
    pub indptr: Vec<usize>,  // row pointer, length nrows + 1
    pub nrows: usize,
    pub ncols: usize,
}

impl<T> Crs<T> {
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

    /// All-zero matrix: no entries, `nrows + 1` zero pointers.
    #[must_use]
    pub fn empty(shape: (usize, usize)) -> Self {
        Self {
            data: Vec::new(),
            indices: Vec::new(),
            indptr: vec![0; shape.0 + 1],
            nrows: shape.0,
            ncols: shape.1,
        }
    }

    /// Row `i`'s `(column, value)` span.
    #[inline]
    #[must_use]
    pub fn row(&self, i: usize) -> (&[usize], &[T]) {
        let (s, e) = (self.indptr[i], self.indptr[i + 1]);
        (&self.indices[s..e], &self.data[s..e])
    }

    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<T>,
        check: bool,
    ) -> Result<Self> {
        validate_compressed(nrows, ncols, &indptr, &indices, data.len(), check, "row", "column")?;
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

/// Structural checks shared by CRS and CCS. `nlines` is the pointer-indexed
/// extent, `nsecondary` the extent of the stored indices.
#[allow(clippy::too_many_arguments)]
pub(crate) fn validate_compressed(
    nlines: usize,
    nsecondary: usize,
    indptr: &[usize],
    indices: &[usize],
    nnz: usize,
    check: bool,
    line: &str,
    secondary: &str,
) -> Result<()> {
    let Some(expected_len) = nlines.checked_add(1) else {
        return Err(SparseError::invalid(format!("n{line}s overflow when adding 1")));
    };
    if indptr.len() != expected_len {
        return Err(SparseError::invalid(format!("indptr length must be n{line}s + 1")));
    }
    if indices.len() != nnz {
        return Err(SparseError::invalid("indices and data must have equal length"));
    }
    if indptr.last().copied().unwrap_or(0) != nnz {
        return Err(SparseError::invalid("indptr last element must equal nnz"));
    }
    if indptr.first().copied().unwrap_or(0) != 0 {
        return Err(SparseError::invalid("indptr first element must be 0"));
    }
    if check {
        for (&start, &end) in indptr.iter().zip(indptr.iter().skip(1)) {
            if start > end {
                return Err(SparseError::invalid("indptr must be non-decreasing"));
            }
            let Some(span) = indices.get(start..end) else {
                return Err(SparseError::invalid("indptr elements must be within [0, nnz]"));
            };
            let mut prev: Option<usize> = None;
            for &j in span {
                if j >= nsecondary {
                    return Err(SparseError::invalid(format!("{secondary} index out of bounds")));
                }
                if prev.is_some_and(|p| j <= p) {
                    return Err(SparseError::invalid(format!(
                        "{secondary} indices must be strictly increasing within each {line}"
                    )));
                }
                prev = Some(j);
            }
        }
    }
    Ok(())
}
