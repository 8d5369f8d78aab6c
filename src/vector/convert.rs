//! Element-wise kind conversion
//!
//! `DataVec::convert` implements the full kind-to-kind conversion matrix
//! together with the warning flags accumulated across a whole-tree
//! coercion. Numeric narrowing truncates toward zero; anything the target
//! kind cannot represent becomes the target's zero with a warning flag,
//! and the zero-strip pass on coerced leaves removes such entries for the
//! kind pairs that allow it.

use crate::dtype::{Complex128, ElemKind, Scalar};

use super::DataVec;

/// Warning flags accumulated while converting values between kinds
///
/// A small bit-set merged leaf by leaf and reported once per top-level
/// operation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CoerceWarnings {
    bits: u8,
}

impl CoerceWarnings {
    /// No warnings
    pub const NONE: Self = Self { bits: 0 };
    /// A fractional part was truncated
    pub const IMPRECISE: Self = Self { bits: 1 };
    /// A value unrepresentable in the target kind became the target's zero
    pub const OUT_OF_RANGE: Self = Self { bits: 1 << 1 };
    /// A nonzero imaginary part was discarded
    pub const IMAGINARY_DROPPED: Self = Self { bits: 1 << 2 };

    /// True when no flag is set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// True when every flag of `other` is set in `self`
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Fold the flags of `other` into `self`
    #[inline]
    pub fn merge(&mut self, other: Self) {
        self.bits |= other.bits;
    }

    #[inline]
    fn set(&mut self, flag: Self) {
        self.bits |= flag.bits;
    }
}

fn double_to_int(v: f64, warn: &mut CoerceWarnings) -> i32 {
    if !v.is_finite() || v <= i32::MIN as f64 - 1.0 || v >= i32::MAX as f64 + 1.0 {
        warn.set(CoerceWarnings::OUT_OF_RANGE);
        return 0;
    }
    let t = v.trunc();
    if t != v {
        warn.set(CoerceWarnings::IMPRECISE);
    }
    t as i32
}

fn double_to_byte(v: f64, warn: &mut CoerceWarnings) -> u8 {
    if !v.is_finite() || v < 0.0 || v >= 256.0 {
        warn.set(CoerceWarnings::OUT_OF_RANGE);
        return 0;
    }
    let t = v.trunc();
    if t != v {
        warn.set(CoerceWarnings::IMPRECISE);
    }
    t as u8
}

fn int_to_byte(v: i32, warn: &mut CoerceWarnings) -> u8 {
    if !(0..=255).contains(&v) {
        warn.set(CoerceWarnings::OUT_OF_RANGE);
        return 0;
    }
    v as u8
}

fn complex_to_double(z: Complex128, warn: &mut CoerceWarnings) -> f64 {
    if z.im != 0.0 {
        warn.set(CoerceWarnings::IMAGINARY_DROPPED);
    }
    z.re
}

/// Parse a text element as a double; a parse failure is zero with
/// `OUT_OF_RANGE`. A `None` (NA) element is handled by the callers and is
/// zero without warning.
fn parse_double(s: &str, warn: &mut CoerceWarnings) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            warn.set(CoerceWarnings::OUT_OF_RANGE);
            0.0
        }
    }
}

fn parse_bool(s: &str, warn: &mut CoerceWarnings) -> bool {
    match s.trim() {
        "TRUE" | "true" | "True" | "T" => true,
        "FALSE" | "false" | "False" | "F" => false,
        _ => {
            warn.set(CoerceWarnings::OUT_OF_RANGE);
            false
        }
    }
}

fn bool_to_text(v: bool) -> String {
    if v {
        "TRUE".to_string()
    } else {
        "FALSE".to_string()
    }
}

fn scalar_to_double(s: &Scalar, warn: &mut CoerceWarnings) -> f64 {
    match s {
        Scalar::Bool(v) => *v as i32 as f64,
        Scalar::Int(v) => *v as f64,
        Scalar::Double(v) => *v,
        Scalar::Complex(z) => complex_to_double(*z, warn),
        Scalar::Byte(v) => *v as f64,
        Scalar::Text(t) => parse_double(t, warn),
    }
}

fn scalar_to_bool(s: &Scalar, warn: &mut CoerceWarnings) -> bool {
    match s {
        Scalar::Bool(v) => *v,
        Scalar::Int(v) => *v != 0,
        Scalar::Double(v) => *v != 0.0,
        Scalar::Complex(z) => !z.is_zero(),
        Scalar::Byte(v) => *v != 0,
        Scalar::Text(t) => parse_bool(t, warn),
    }
}

fn scalar_to_complex(s: &Scalar, warn: &mut CoerceWarnings) -> Complex128 {
    match s {
        Scalar::Complex(z) => *z,
        other => Complex128::from(scalar_to_double(other, warn)),
    }
}

fn scalar_to_text(s: &Scalar) -> String {
    match s {
        Scalar::Bool(v) => bool_to_text(*v),
        Scalar::Int(v) => v.to_string(),
        Scalar::Double(v) => v.to_string(),
        Scalar::Complex(z) => z.to_string(),
        Scalar::Byte(v) => v.to_string(),
        Scalar::Text(t) => t.clone(),
    }
}

impl DataVec {
    /// Convert every element to `target`, returning the converted vector
    /// and the accumulated warning flags.
    ///
    /// Converting to the current kind is a plain clone with no warnings.
    pub fn convert(&self, target: ElemKind) -> (DataVec, CoerceWarnings) {
        let mut warn = CoerceWarnings::NONE;
        if self.kind() == target {
            return (self.clone(), warn);
        }
        let n = self.len();
        let out = match target {
            ElemKind::Bool => {
                DataVec::Bool((0..n).map(|i| self.elem_to_bool(i, &mut warn)).collect())
            }
            ElemKind::Int => {
                DataVec::Int((0..n).map(|i| self.elem_to_int(i, &mut warn)).collect())
            }
            ElemKind::Double => {
                DataVec::Double((0..n).map(|i| self.elem_to_double(i, &mut warn)).collect())
            }
            ElemKind::Complex => {
                DataVec::Complex((0..n).map(|i| self.elem_to_complex(i, &mut warn)).collect())
            }
            ElemKind::Byte => {
                DataVec::Byte((0..n).map(|i| self.elem_to_byte(i, &mut warn)).collect())
            }
            ElemKind::Text => {
                DataVec::Text((0..n).map(|i| self.elem_to_text(i)).collect())
            }
            ElemKind::Cell => {
                DataVec::Cell((0..n).map(|i| self.elem_to_cell(i)).collect())
            }
        };
        (out, warn)
    }

    fn elem_to_double(&self, i: usize, warn: &mut CoerceWarnings) -> f64 {
        match self {
            Self::Bool(v) => v[i] as i32 as f64,
            Self::Int(v) => v[i] as f64,
            Self::Double(v) => v[i],
            Self::Complex(v) => complex_to_double(v[i], warn),
            Self::Byte(v) => v[i] as f64,
            Self::Text(v) => match &v[i] {
                None => 0.0,
                Some(s) => parse_double(s, warn),
            },
            Self::Cell(v) => match &v[i] {
                None => 0.0,
                Some(s) => scalar_to_double(s, warn),
            },
        }
    }

    fn elem_to_int(&self, i: usize, warn: &mut CoerceWarnings) -> i32 {
        match self {
            Self::Bool(v) => v[i] as i32,
            Self::Int(v) => v[i],
            Self::Byte(v) => v[i] as i32,
            _ => double_to_int(self.elem_to_double(i, warn), warn),
        }
    }

    fn elem_to_byte(&self, i: usize, warn: &mut CoerceWarnings) -> u8 {
        match self {
            Self::Bool(v) => v[i] as u8,
            Self::Int(v) => int_to_byte(v[i], warn),
            Self::Byte(v) => v[i],
            _ => double_to_byte(self.elem_to_double(i, warn), warn),
        }
    }

    fn elem_to_bool(&self, i: usize, warn: &mut CoerceWarnings) -> bool {
        match self {
            Self::Bool(v) => v[i],
            Self::Int(v) => v[i] != 0,
            Self::Double(v) => v[i] != 0.0,
            Self::Complex(v) => !v[i].is_zero(),
            Self::Byte(v) => v[i] != 0,
            Self::Text(v) => match &v[i] {
                None => false,
                Some(s) => parse_bool(s, warn),
            },
            Self::Cell(v) => match &v[i] {
                None => false,
                Some(s) => scalar_to_bool(s, warn),
            },
        }
    }

    fn elem_to_complex(&self, i: usize, warn: &mut CoerceWarnings) -> Complex128 {
        match self {
            Self::Complex(v) => v[i],
            Self::Cell(v) => match &v[i] {
                None => Complex128::ZERO,
                Some(s) => scalar_to_complex(s, warn),
            },
            _ => Complex128::from(self.elem_to_double(i, warn)),
        }
    }

    fn elem_to_text(&self, i: usize) -> Option<String> {
        match self {
            Self::Bool(v) => Some(bool_to_text(v[i])),
            Self::Int(v) => Some(v[i].to_string()),
            Self::Double(v) => Some(v[i].to_string()),
            Self::Complex(v) => Some(v[i].to_string()),
            Self::Byte(v) => Some(v[i].to_string()),
            Self::Text(v) => v[i].clone(),
            Self::Cell(v) => v[i].as_ref().map(scalar_to_text),
        }
    }

    fn elem_to_cell(&self, i: usize) -> Option<Scalar> {
        match self {
            Self::Bool(v) => Some(Scalar::Bool(v[i])),
            Self::Int(v) => Some(Scalar::Int(v[i])),
            Self::Double(v) => Some(Scalar::Double(v[i])),
            Self::Complex(v) => Some(Scalar::Complex(v[i])),
            Self::Byte(v) => Some(Scalar::Byte(v[i])),
            // Text NA has no cell representation and narrows to the absent cell.
            Self::Text(v) => v[i].clone().map(Scalar::Text),
            Self::Cell(v) => v[i].clone(),
        }
    }
}
