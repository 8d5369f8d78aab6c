//! Element kind system for svtree arrays
//!
//! This module provides the `ElemKind` enum representing all supported
//! element kinds, the complex value type, and the dynamically typed
//! `Scalar` used by `Cell` vectors.

pub mod complex;
mod scalar;

pub use complex::Complex128;
pub use scalar::Scalar;

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Element kinds supported by SVT arrays
///
/// One tag applies to a whole tree; every leaf vector's values share it.
/// Using a closed enum (rather than generics) keeps the kind a runtime
/// property of the array while letting the compiler enforce that every
/// operation handles every kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElemKind {
    /// Boolean; zero value is `false`
    Bool,
    /// 32-bit signed integer
    Int,
    /// 64-bit floating point
    Double,
    /// 128-bit complex (two f64: re, im); zero when both parts are zero
    Complex,
    /// Raw byte
    Byte,
    /// Text with an NA sentinel; zero is the non-NA empty string
    Text,
    /// Generic cell holding any atomic scalar; zero is the absent cell
    Cell,
}

impl ElemKind {
    /// All supported kinds, in declaration order
    pub const ALL: [ElemKind; 7] = [
        Self::Bool,
        Self::Int,
        Self::Double,
        Self::Complex,
        Self::Byte,
        Self::Text,
        Self::Cell,
    ];

    /// Kind name as used at the string boundary (e.g. "integer", "generic")
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Double => "double",
            Self::Complex => "complex",
            Self::Byte => "byte",
            Self::Text => "text",
            Self::Cell => "generic",
        }
    }

    /// Returns true if this is a numeric kind (bool counts as 0/1)
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Double | Self::Complex | Self::Byte)
    }

    /// Whether coercing values of kind `self` to kind `to` can turn a
    /// nonzero value into an exact zero.
    ///
    /// Leaf vectors coerced along one of these pairs must be re-scanned and
    /// stripped of zero entries. The set is a fixed table, not derived from
    /// kind properties: byte as a target truncates, double→int and
    /// complex→{int, double} narrow, and text/generic sources can parse or
    /// unwrap to anything including zero.
    pub const fn coercion_can_introduce_zeros(self, to: ElemKind) -> bool {
        matches!(
            (self, to),
            (_, Self::Byte)
                | (Self::Double, Self::Int)
                | (Self::Complex, Self::Int)
                | (Self::Complex, Self::Double)
                | (Self::Text, _)
                | (Self::Cell, _)
        )
    }
}

impl fmt::Display for ElemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ElemKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        for kind in Self::ALL {
            if kind.name() == s {
                return Ok(kind);
            }
        }
        Err(Error::InvalidKind { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ElemKind::ALL {
            assert_eq!(kind.name().parse::<ElemKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_name() {
        let err = "float".parse::<ElemKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidKind { name } if name == "float"));
    }

    #[test]
    fn test_zero_introduction_table() {
        use ElemKind::*;
        // Any kind narrowing to byte can produce zeros.
        for kind in ElemKind::ALL {
            assert!(kind.coercion_can_introduce_zeros(Byte));
        }
        assert!(Double.coercion_can_introduce_zeros(Int));
        assert!(Complex.coercion_can_introduce_zeros(Int));
        assert!(Complex.coercion_can_introduce_zeros(Double));
        assert!(Text.coercion_can_introduce_zeros(Double));
        assert!(Cell.coercion_can_introduce_zeros(Bool));
        // Widening numeric conversions never introduce zeros.
        assert!(!Int.coercion_can_introduce_zeros(Double));
        assert!(!Double.coercion_can_introduce_zeros(Complex));
        assert!(!Double.coercion_can_introduce_zeros(Bool));
        assert!(!Int.coercion_can_introduce_zeros(Text));
    }
}
