//! Compressed sparse column matrices and the CSC <-> SVT converters
//!
//! CSC is the natural 2-D cross-section of an SVT: each column's slice
//! of the row-index and value buffers is exactly one leaf vector, so
//! both converters are single linear passes with no sorting.

use super::cast::coerce_leaf;
use super::{LeafVec, SvtArray, SvtNode, MAX_NZCOUNT};
use crate::dtype::ElemKind;
use crate::error::{Error, Result};
use crate::vector::{CoerceWarnings, DataVec};

/// A 2-D sparse matrix in compressed sparse column form
#[derive(Debug, Clone, PartialEq)]
pub struct CscMatrix {
    shape: [usize; 2],
    col_ptrs: Vec<usize>,
    row_indices: Vec<usize>,
    values: DataVec,
}

impl CscMatrix {
    /// Create a CSC matrix from its three buffers, validating the usual
    /// structural invariants.
    ///
    /// `col_ptrs` must have `ncol + 1` entries starting at 0, ending at
    /// the number of stored entries, and be non-decreasing. Row indices
    /// within each column must be strictly ascending and below `nrow`.
    pub fn new(
        shape: [usize; 2],
        col_ptrs: Vec<usize>,
        row_indices: Vec<usize>,
        values: DataVec,
    ) -> Result<Self> {
        let [nrow, ncol] = shape;
        if col_ptrs.len() != ncol + 1 {
            return Err(Error::ShapeMismatch {
                expected: vec![ncol + 1],
                got: vec![col_ptrs.len()],
            });
        }
        if row_indices.len() != values.len() {
            return Err(Error::ShapeMismatch {
                expected: vec![row_indices.len()],
                got: vec![values.len()],
            });
        }
        if col_ptrs[0] != 0 {
            return Err(Error::InvalidColPtrs { reason: "first column pointer is not 0" });
        }
        if col_ptrs[ncol] != row_indices.len() {
            return Err(Error::InvalidColPtrs {
                reason: "last column pointer differs from the number of stored entries",
            });
        }
        if col_ptrs.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidColPtrs { reason: "column pointers decrease" });
        }
        for j in 0..ncol {
            let rows = &row_indices[col_ptrs[j]..col_ptrs[j + 1]];
            if rows.windows(2).any(|w| w[0] >= w[1]) {
                return Err(Error::InvalidColPtrs {
                    reason: "row indices within a column not strictly ascending",
                });
            }
            if let Some(&last) = rows.last() {
                if last >= nrow {
                    return Err(Error::IndexOutOfBounds { index: last, size: nrow });
                }
            }
        }
        Ok(Self { shape, col_ptrs, row_indices, values })
    }

    /// `[nrow, ncol]`
    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    /// Column pointers, `ncol + 1` entries
    pub fn col_ptrs(&self) -> &[usize] {
        &self.col_ptrs
    }

    /// Row indices of the stored entries, column by column
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    /// Values parallel to [`row_indices`](Self::row_indices)
    pub fn values(&self) -> &DataVec {
        &self.values
    }

    /// Number of stored entries
    pub fn nz_count(&self) -> usize {
        self.row_indices.len()
    }
}

impl SvtArray {
    /// Export a 2-D tree to CSC form.
    ///
    /// Fails with [`Error::NotTwoDimensional`] on other ranks and with
    /// [`Error::CapacityExceeded`] when the nonzero count does not fit
    /// the interchange limit [`MAX_NZCOUNT`].
    pub fn to_csc(&self) -> Result<CscMatrix> {
        if self.ndim() != 2 {
            return Err(Error::NotTwoDimensional { ndim: self.ndim() });
        }
        let nnz = self.nz_count();
        if nnz > MAX_NZCOUNT {
            return Err(Error::CapacityExceeded { nzcount: nnz, max: MAX_NZCOUNT });
        }
        let [nrow, ncol] = [self.shape[0], self.shape[1]];
        let mut col_ptrs = Vec::with_capacity(ncol + 1);
        let mut row_indices = Vec::with_capacity(nnz);
        let mut values = DataVec::with_capacity(self.kind, nnz);
        col_ptrs.push(0);
        let columns: &[SvtNode] = match self.root() {
            SvtNode::Empty => &[],
            SvtNode::Branch(children) => children,
            SvtNode::Leaf(_) => {
                return Err(Error::MalformedTree {
                    reason: "leaf vector at the root of a 2-D tree",
                })
            }
        };
        for j in 0..ncol {
            match columns.get(j) {
                None | Some(SvtNode::Empty) => {}
                Some(SvtNode::Leaf(lv)) => {
                    row_indices.extend_from_slice(lv.offsets());
                    values.extend_from_range(lv.values(), 0, lv.len())?;
                }
                Some(SvtNode::Branch(_)) => {
                    return Err(Error::MalformedTree {
                        reason: "branch node below the column level of a 2-D tree",
                    })
                }
            }
            col_ptrs.push(row_indices.len());
        }
        CscMatrix::new([nrow, ncol], col_ptrs, row_indices, values)
    }

    /// Build a tree of kind `kind` from a CSC matrix.
    ///
    /// Each column slice becomes one leaf vector; entries that become
    /// zero under the coercion are dropped.
    pub fn from_csc(csc: &CscMatrix, kind: ElemKind) -> Result<(SvtArray, CoerceWarnings)> {
        let [nrow, ncol] = csc.shape();
        let shape = vec![nrow, ncol];
        let mut warn = CoerceWarnings::NONE;
        let mut scratch = Vec::new();
        let mut columns = Vec::with_capacity(ncol);
        for j in 0..ncol {
            let (lo, hi) = (csc.col_ptrs[j], csc.col_ptrs[j + 1]);
            if lo == hi {
                columns.push(SvtNode::Empty);
                continue;
            }
            let mut vals = DataVec::with_capacity(csc.values.kind(), hi - lo);
            vals.extend_from_range(&csc.values, lo, hi - lo)?;
            let lv = LeafVec::new(csc.row_indices[lo..hi].to_vec(), vals)?;
            let lv = if kind == csc.values.kind() {
                Some(lv)
            } else {
                coerce_leaf(&lv, kind, &mut scratch, &mut warn)?
            };
            columns.push(lv.map_or(SvtNode::Empty, SvtNode::Leaf));
        }
        let root = if columns.iter().all(SvtNode::is_empty) {
            SvtNode::Empty
        } else {
            SvtNode::Branch(columns)
        };
        Ok((SvtArray::from_parts(shape, kind, root), warn))
    }
}
