//! Dynamically typed atomic scalar, the element of `Cell` vectors

use super::{Complex128, ElemKind};

/// One value of any atomic element kind.
///
/// A generic (`Cell`) vector stores `Option<Scalar>` per position; `None`
/// is the absent marker, which is also the kind's zero value. A present
/// scalar is never itself "absent", so a cell holding `Scalar::Int(0)` is
/// nonzero.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i32),
    /// Double value
    Double(f64),
    /// Complex value
    Complex(Complex128),
    /// Byte value
    Byte(u8),
    /// Text value
    Text(String),
}

impl Scalar {
    /// The element kind of this scalar
    pub const fn kind(&self) -> ElemKind {
        match self {
            Self::Bool(_) => ElemKind::Bool,
            Self::Int(_) => ElemKind::Int,
            Self::Double(_) => ElemKind::Double,
            Self::Complex(_) => ElemKind::Complex,
            Self::Byte(_) => ElemKind::Byte,
            Self::Text(_) => ElemKind::Text,
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<Complex128> for Scalar {
    fn from(v: Complex128) -> Self {
        Self::Complex(v)
    }
}

impl From<u8> for Scalar {
    fn from(v: u8) -> Self {
        Self::Byte(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}
