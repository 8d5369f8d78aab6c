//! Error types for svtree

use crate::dtype::ElemKind;
use thiserror::Error;

/// Result type alias using svtree's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in svtree operations
#[derive(Error, Debug)]
pub enum Error {
    /// Element-kind name not among the supported kinds
    #[error("Unknown element kind '{name}'")]
    InvalidKind {
        /// The rejected kind name
        name: String,
    },

    /// Element kind mismatch between two value vectors
    #[error("Element kind mismatch: expected {expected}, got {got}")]
    KindMismatch {
        /// Expected element kind
        expected: ElemKind,
        /// Actual element kind
        got: ElemKind,
    },

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Shape whose element count overflows the address space
    #[error("Shape {shape:?} is too large to linearize")]
    ShapeTooLarge {
        /// The offending shape
        shape: Vec<usize>,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Internal-invariant violation in an SVT tree; indicates a construction
    /// bug, never well-formed input
    #[error("Malformed SVT tree: {reason}")]
    MalformedTree {
        /// What was violated
        reason: &'static str,
    },

    /// Invalid column pointer array in a CSC triple
    #[error("Invalid CSC column pointers: {reason}")]
    InvalidColPtrs {
        /// What was violated
        reason: &'static str,
    },

    /// COO coordinate outside the `[1, dim]` range of its axis
    #[error("Coordinate {coord} of entry {entry} is outside [1, {size}] on axis {axis}")]
    InvalidCoordinates {
        /// 0-based index of the offending COO entry
        entry: usize,
        /// 0-based axis of the offending coordinate
        axis: usize,
        /// The 1-based coordinate value
        coord: usize,
        /// Size of the axis
        size: usize,
    },

    /// COO entries not strictly ascending on the first axis within their
    /// outer-coordinate group
    #[error(
        "Entry {entry}: first-axis coordinates must be strictly ascending \
         within each group of entries sharing the same outer coordinates"
    )]
    UnsortedCoordinates {
        /// 0-based index of the offending COO entry
        entry: usize,
    },

    /// Nonzero count too large for the requested output encoding
    #[error("{nzcount} nonzero values exceed the supported maximum of {max}")]
    CapacityExceeded {
        /// The actual nonzero count
        nzcount: usize,
        /// The maximum the output encoding can index
        max: usize,
    },

    /// Operation restricted to matrices applied to another dimensionality
    #[error("Expected a 2-dimensional array, got {ndim} dimension(s)")]
    NotTwoDimensional {
        /// Number of dimensions of the input
        ndim: usize,
    },
}
