//! Dense arrays and the dense <-> SVT converters
//!
//! Dense data is stored column-major: dimension 0 varies fastest, the
//! last dimension slowest. The importer scans each innermost run once,
//! keeping only its nonzero entries; the exporter allocates a zeroed
//! buffer and scatters the tree's values into it.

use super::cast::coerce_leaf;
use super::{checked_len, LeafVec, SvtArray, SvtNode};
use crate::dtype::ElemKind;
use crate::error::{Error, Result};
use crate::vector::{CoerceWarnings, DataVec};

/// Optional name vectors, one slot per dimension
pub type DimNames = Vec<Option<Vec<String>>>;

/// A dense N-dimensional array in column-major layout
#[derive(Debug, Clone, PartialEq)]
pub struct DenseArray {
    shape: Vec<usize>,
    data: DataVec,
    dimnames: Option<DimNames>,
}

impl DenseArray {
    /// Create a dense array, checking that the data length equals the
    /// product of the dimension sizes.
    pub fn new(shape: Vec<usize>, data: DataVec) -> Result<Self> {
        if shape.is_empty() {
            return Err(Error::ShapeMismatch { expected: vec![1], got: shape });
        }
        let len = checked_len(&shape)?;
        if len != data.len() {
            return Err(Error::ShapeMismatch {
                expected: shape,
                got: vec![data.len()],
            });
        }
        Ok(Self { shape, data, dimnames: None })
    }

    /// Attach dimension names; each present vector must match its
    /// dimension's size.
    pub fn with_dimnames(mut self, dimnames: Option<DimNames>) -> Result<Self> {
        if let Some(ref names) = dimnames {
            if names.len() != self.shape.len() {
                return Err(Error::ShapeMismatch {
                    expected: self.shape.clone(),
                    got: vec![names.len()],
                });
            }
            for (d, slot) in names.iter().enumerate() {
                if let Some(v) = slot {
                    if v.len() != self.shape[d] {
                        return Err(Error::ShapeMismatch {
                            expected: self.shape.clone(),
                            got: vec![v.len()],
                        });
                    }
                }
            }
        }
        self.dimnames = dimnames;
        Ok(self)
    }

    /// Dimension sizes, innermost first
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The column-major element buffer
    pub fn data(&self) -> &DataVec {
        &self.data
    }

    /// Dimension names, if any were attached
    pub fn dimnames(&self) -> Option<&DimNames> {
        self.dimnames.as_ref()
    }

    /// The element kind of the buffer
    pub fn kind(&self) -> ElemKind {
        self.data.kind()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when any dimension has size zero
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn build_node(
    data: &DataVec,
    start: usize,
    dim: &[usize],
    ndim: usize,
    target: ElemKind,
    warn: &mut CoerceWarnings,
    scratch: &mut Vec<usize>,
) -> Result<SvtNode> {
    if ndim == 1 {
        let lv = match LeafVec::from_subvector(data, start, dim[0], scratch) {
            Some(lv) => lv,
            None => return Ok(SvtNode::Empty),
        };
        let lv = if target == data.kind() {
            Some(lv)
        } else {
            coerce_leaf(&lv, target, scratch, warn)?
        };
        return Ok(lv.map_or(SvtNode::Empty, SvtNode::Leaf));
    }
    let block_len: usize = dim[..ndim - 1].iter().product();
    let mut children = Vec::with_capacity(dim[ndim - 1]);
    for k in 0..dim[ndim - 1] {
        children.push(build_node(
            data,
            start + k * block_len,
            dim,
            ndim - 1,
            target,
            warn,
            scratch,
        )?);
    }
    if children.iter().all(SvtNode::is_empty) {
        Ok(SvtNode::Empty)
    } else {
        Ok(SvtNode::Branch(children))
    }
}

fn dump_node(node: &SvtNode, out: &mut DataVec, base: usize, dim: &[usize], ndim: usize) -> Result<()> {
    match node {
        SvtNode::Empty => Ok(()),
        SvtNode::Leaf(lv) => {
            for (k, &off) in lv.offsets().iter().enumerate() {
                out.set_from(base + off, lv.values(), k)?;
            }
            Ok(())
        }
        SvtNode::Branch(children) => {
            let block_len: usize = dim[..ndim - 1].iter().product();
            for (k, child) in children.iter().enumerate() {
                dump_node(child, out, base + k * block_len, dim, ndim - 1)?;
            }
            Ok(())
        }
    }
}

impl SvtArray {
    /// Build a sparse tree of kind `kind` from a dense array.
    ///
    /// Entries that are zero in the input, or become zero when coerced to
    /// `kind`, are not stored.
    pub fn from_dense(dense: &DenseArray, kind: ElemKind) -> Result<(SvtArray, CoerceWarnings)> {
        let shape = dense.shape().to_vec();
        if dense.is_empty() {
            return Ok((SvtArray::from_parts(shape, kind, SvtNode::Empty), CoerceWarnings::NONE));
        }
        let mut warn = CoerceWarnings::NONE;
        let mut scratch = Vec::new();
        let root = build_node(
            dense.data(),
            0,
            &shape,
            shape.len(),
            kind,
            &mut warn,
            &mut scratch,
        )?;
        Ok((SvtArray::from_parts(shape, kind, root), warn))
    }

    /// Materialize the tree as a dense array, optionally attaching
    /// dimension names.
    pub fn to_dense(&self, dimnames: Option<DimNames>) -> Result<DenseArray> {
        let len = checked_len(&self.shape)?;
        let mut out = DataVec::zeroed(self.kind, len);
        dump_node(&self.root, &mut out, 0, &self.shape, self.ndim())?;
        DenseArray::new(self.shape.clone(), out)?.with_dimnames(dimnames)
    }
}
