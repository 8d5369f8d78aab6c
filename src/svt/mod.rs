//! The SVT sparse tree and its format conversions
//!
//! An SVT ("sparse vector tree") represents an N-dimensional sparse array
//! as a recursive tree with one level per dimension: depth 1 holds leaf
//! vectors of (offset, value) pairs along the innermost dimension, every
//! other level is a branch with exactly one child per index of its
//! dimension, and `Empty` is the canonical all-zero subtree. A branch
//! whose children are all empty is never materialized; it collapses to
//! `Empty` on the way up.
//!
//! Trees are built once by a converter, consumed read-only by the
//! exporters, and rewritten wholesale by [`cast`](SvtArray::cast) and
//! [`transpose`](SvtArray::transpose). No operation publishes a partially
//! built tree: every entry point returns a fully valid array or an error.

mod cast;
mod coo;
mod csc;
mod dense;
mod leaf;
mod transpose;

pub use coo::CooArray;
pub use csc::CscMatrix;
pub use dense::{DenseArray, DimNames};
pub use leaf::{AppendableLeaf, LeafVec};

use crate::dtype::ElemKind;
use crate::error::{Error, Result};

/// Largest nonzero count the interchange exporters (COO, CSC) will index.
///
/// Consumers of those formats index entries with 32-bit integers.
pub const MAX_NZCOUNT: usize = i32::MAX as usize;

/// One node of an SVT tree
#[derive(Debug, Clone, PartialEq)]
pub enum SvtNode {
    /// All-zero subtree
    Empty,
    /// Innermost level: nonzero entries along dimension 0
    Leaf(LeafVec),
    /// One child per index of this node's dimension
    Branch(Vec<SvtNode>),
}

impl SvtNode {
    /// True for the canonical all-zero subtree
    pub fn is_empty(&self) -> bool {
        matches!(self, SvtNode::Empty)
    }

    fn nz_count(&self) -> usize {
        match self {
            SvtNode::Empty => 0,
            SvtNode::Leaf(lv) => lv.len(),
            SvtNode::Branch(children) => children.iter().map(SvtNode::nz_count).sum(),
        }
    }
}

/// A sparse array: shape, element kind and SVT root
#[derive(Debug, Clone, PartialEq)]
pub struct SvtArray {
    shape: Vec<usize>,
    kind: ElemKind,
    root: SvtNode,
}

impl SvtArray {
    /// Create an array from its parts, validating the tree structure.
    ///
    /// Checks every invariant the converters rely on: branch arity equals
    /// the dimension size, leaves only at depth 1, strictly ascending leaf
    /// offsets within the dimension, value kind equal to `kind`, no zero
    /// values, and no branch with all-empty children.
    pub fn new(shape: Vec<usize>, kind: ElemKind, root: SvtNode) -> Result<Self> {
        if shape.is_empty() {
            return Err(Error::ShapeMismatch { expected: vec![1], got: shape });
        }
        if shape.contains(&0) && !root.is_empty() {
            return Err(Error::MalformedTree {
                reason: "non-empty tree over a zero-length dimension",
            });
        }
        validate_node(&root, &shape, shape.len(), kind)?;
        Ok(Self { shape, kind, root })
    }

    /// The all-zero array of the given shape and kind
    pub fn empty(shape: Vec<usize>, kind: ElemKind) -> Result<Self> {
        Self::new(shape, kind, SvtNode::Empty)
    }

    /// Dimension sizes, innermost first
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// The element kind shared by every value in the tree
    pub fn kind(&self) -> ElemKind {
        self.kind
    }

    /// The root node
    pub fn root(&self) -> &SvtNode {
        &self.root
    }

    /// True when the array holds no nonzero values
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Total number of (offset, value) pairs in the tree
    pub fn nz_count(&self) -> usize {
        self.root.nz_count()
    }

    /// Construct without validation; builders uphold the invariants.
    pub(crate) fn from_parts(shape: Vec<usize>, kind: ElemKind, root: SvtNode) -> Self {
        Self { shape, kind, root }
    }
}

fn validate_node(node: &SvtNode, dim: &[usize], ndim: usize, kind: ElemKind) -> Result<()> {
    match node {
        SvtNode::Empty => Ok(()),
        SvtNode::Leaf(lv) => {
            if ndim != 1 {
                return Err(Error::MalformedTree {
                    reason: "leaf vector above the innermost dimension",
                });
            }
            if lv.kind() != kind {
                return Err(Error::KindMismatch { expected: kind, got: lv.kind() });
            }
            // Offsets are ascending by construction; the last is the largest.
            if let Some(&last) = lv.offsets().last() {
                if last >= dim[0] {
                    return Err(Error::IndexOutOfBounds { index: last, size: dim[0] });
                }
            }
            for k in 0..lv.len() {
                if lv.values().is_zero(k) {
                    return Err(Error::MalformedTree {
                        reason: "zero value stored in a leaf vector",
                    });
                }
            }
            Ok(())
        }
        SvtNode::Branch(children) => {
            if ndim == 1 {
                return Err(Error::MalformedTree {
                    reason: "branch node at the innermost dimension",
                });
            }
            if children.len() != dim[ndim - 1] {
                return Err(Error::MalformedTree {
                    reason: "branch arity differs from its dimension size",
                });
            }
            if children.iter().all(SvtNode::is_empty) {
                return Err(Error::MalformedTree {
                    reason: "branch with all-empty children must collapse to Empty",
                });
            }
            for child in children {
                validate_node(child, dim, ndim - 1, kind)?;
            }
            Ok(())
        }
    }
}

/// Element count of a dense array of this shape
pub(crate) fn checked_len(shape: &[usize]) -> Result<usize> {
    let mut len: usize = 1;
    for &d in shape {
        len = len
            .checked_mul(d)
            .ok_or_else(|| Error::ShapeTooLarge { shape: shape.to_vec() })?;
    }
    Ok(len)
}
