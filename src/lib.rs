//! # svtree
//!
//! **Sparse vector tree (SVT) arrays with runtime element kinds.**
//!
//! svtree stores N-dimensional sparse arrays as a recursive tree with one
//! level per dimension: the innermost level holds leaf vectors of sorted
//! (offset, value) pairs, every all-zero subtree collapses to a single
//! `Empty` node, and the element kind (boolean, integer, double, complex,
//! byte, text, generic) is carried at runtime rather than in the type.
//!
//! ## Features
//!
//! - **Dense conversion**: Column-major dense arrays in and out
//! - **CSC conversion**: Compressed sparse column matrices in and out
//! - **COO conversion**: Coordinate lists in and out, canonical ordering
//! - **Kind coercion**: Whole-tree casts with warning flags and
//!   zero stripping
//! - **Transpose**: Sparse 2-D transpose without densifying
//!
//! ## Quick Start
//!
//! ```rust
//! use svtree::prelude::*;
//!
//! // Column-major 2x2: [[0, 7], [5, 0]]
//! let dense = DenseArray::new(vec![2, 2], DataVec::Int(vec![0, 5, 7, 0]))?;
//! let (arr, _) = SvtArray::from_dense(&dense, ElemKind::Int)?;
//! assert_eq!(arr.nz_count(), 2);
//!
//! let t = arr.transpose()?;
//! assert_eq!(t.to_csc()?.col_ptrs(), &[0, 1, 2]);
//! # Ok::<(), svtree::error::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod svt;
pub mod vector;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{Complex128, ElemKind, Scalar};
    pub use crate::error::{Error, Result};
    pub use crate::svt::{CooArray, CscMatrix, DenseArray, DimNames, LeafVec, SvtArray, SvtNode};
    pub use crate::vector::{CoerceWarnings, DataVec};
}
