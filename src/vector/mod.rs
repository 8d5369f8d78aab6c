//! Runtime-typed value vectors
//!
//! `DataVec` is the storage unit shared by leaf vectors, dense buffers and
//! the sparse interchange formats: one tagged union over the seven element
//! kinds, with the per-kind zero predicate, element and bulk copies, and
//! nonzero scans implemented as exhaustive matches. The element-wise kind
//! conversion lives in [`convert`].

mod convert;

pub use convert::CoerceWarnings;

use crate::dtype::{Complex128, ElemKind, Scalar};
use crate::error::{Error, Result};

/// A vector of values of one runtime-selected element kind
#[derive(Debug, Clone, PartialEq)]
pub enum DataVec {
    /// Boolean values
    Bool(Vec<bool>),
    /// Integer values
    Int(Vec<i32>),
    /// Double values
    Double(Vec<f64>),
    /// Complex values
    Complex(Vec<Complex128>),
    /// Byte values
    Byte(Vec<u8>),
    /// Text values; `None` is NA (which is not zero)
    Text(Vec<Option<String>>),
    /// Generic cells; `None` is the absent (zero) cell
    Cell(Vec<Option<Scalar>>),
}

impl DataVec {
    /// The element kind of this vector
    pub const fn kind(&self) -> ElemKind {
        match self {
            Self::Bool(_) => ElemKind::Bool,
            Self::Int(_) => ElemKind::Int,
            Self::Double(_) => ElemKind::Double,
            Self::Complex(_) => ElemKind::Complex,
            Self::Byte(_) => ElemKind::Byte,
            Self::Text(_) => ElemKind::Text,
            Self::Cell(_) => ElemKind::Cell,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Complex(v) => v.len(),
            Self::Byte(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::Cell(v) => v.len(),
        }
    }

    /// True when the vector has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An empty vector of the given kind with reserved capacity
    pub fn with_capacity(kind: ElemKind, capacity: usize) -> Self {
        match kind {
            ElemKind::Bool => Self::Bool(Vec::with_capacity(capacity)),
            ElemKind::Int => Self::Int(Vec::with_capacity(capacity)),
            ElemKind::Double => Self::Double(Vec::with_capacity(capacity)),
            ElemKind::Complex => Self::Complex(Vec::with_capacity(capacity)),
            ElemKind::Byte => Self::Byte(Vec::with_capacity(capacity)),
            ElemKind::Text => Self::Text(Vec::with_capacity(capacity)),
            ElemKind::Cell => Self::Cell(Vec::with_capacity(capacity)),
        }
    }

    /// A vector of `len` zero values of the given kind.
    ///
    /// Numeric kinds zero-fill; text fills with the non-NA empty string and
    /// generic with the absent cell, each kind's own zero value, so a
    /// buffer scattered into by an exporter starts out all-zero.
    pub fn zeroed(kind: ElemKind, len: usize) -> Self {
        match kind {
            ElemKind::Bool => Self::Bool(vec![false; len]),
            ElemKind::Int => Self::Int(vec![0; len]),
            ElemKind::Double => Self::Double(vec![0.0; len]),
            ElemKind::Complex => Self::Complex(vec![Complex128::ZERO; len]),
            ElemKind::Byte => Self::Byte(vec![0; len]),
            ElemKind::Text => Self::Text(vec![Some(String::new()); len]),
            ElemKind::Cell => Self::Cell(vec![None; len]),
        }
    }

    /// The kind's zero predicate applied to element `i`.
    ///
    /// Text NA is not zero; a zero-length non-NA string is.
    pub fn is_zero(&self, i: usize) -> bool {
        match self {
            Self::Bool(v) => !v[i],
            Self::Int(v) => v[i] == 0,
            Self::Double(v) => v[i] == 0.0,
            Self::Complex(v) => v[i].is_zero(),
            Self::Byte(v) => v[i] == 0,
            Self::Text(v) => matches!(&v[i], Some(s) if s.is_empty()),
            Self::Cell(v) => v[i].is_none(),
        }
    }

    /// Append element `i` of `src` to this vector
    pub fn push_from(&mut self, src: &DataVec, i: usize) -> Result<()> {
        if i >= src.len() {
            return Err(Error::IndexOutOfBounds { index: i, size: src.len() });
        }
        match (self, src) {
            (Self::Bool(d), Self::Bool(s)) => d.push(s[i]),
            (Self::Int(d), Self::Int(s)) => d.push(s[i]),
            (Self::Double(d), Self::Double(s)) => d.push(s[i]),
            (Self::Complex(d), Self::Complex(s)) => d.push(s[i]),
            (Self::Byte(d), Self::Byte(s)) => d.push(s[i]),
            (Self::Text(d), Self::Text(s)) => d.push(s[i].clone()),
            (Self::Cell(d), Self::Cell(s)) => d.push(s[i].clone()),
            (d, s) => {
                return Err(Error::KindMismatch { expected: d.kind(), got: s.kind() });
            }
        }
        Ok(())
    }

    /// Overwrite element `at` with element `i` of `src`
    pub fn set_from(&mut self, at: usize, src: &DataVec, i: usize) -> Result<()> {
        if at >= self.len() {
            return Err(Error::IndexOutOfBounds { index: at, size: self.len() });
        }
        if i >= src.len() {
            return Err(Error::IndexOutOfBounds { index: i, size: src.len() });
        }
        match (self, src) {
            (Self::Bool(d), Self::Bool(s)) => d[at] = s[i],
            (Self::Int(d), Self::Int(s)) => d[at] = s[i],
            (Self::Double(d), Self::Double(s)) => d[at] = s[i],
            (Self::Complex(d), Self::Complex(s)) => d[at] = s[i],
            (Self::Byte(d), Self::Byte(s)) => d[at] = s[i],
            (Self::Text(d), Self::Text(s)) => d[at] = s[i].clone(),
            (Self::Cell(d), Self::Cell(s)) => d[at] = s[i].clone(),
            (d, s) => {
                return Err(Error::KindMismatch { expected: d.kind(), got: s.kind() });
            }
        }
        Ok(())
    }

    /// Append the `len` elements of `src` starting at `start`
    pub fn extend_from_range(&mut self, src: &DataVec, start: usize, len: usize) -> Result<()> {
        if start + len > src.len() {
            return Err(Error::IndexOutOfBounds { index: start + len, size: src.len() });
        }
        match (self, src) {
            (Self::Bool(d), Self::Bool(s)) => d.extend_from_slice(&s[start..start + len]),
            (Self::Int(d), Self::Int(s)) => d.extend_from_slice(&s[start..start + len]),
            (Self::Double(d), Self::Double(s)) => d.extend_from_slice(&s[start..start + len]),
            (Self::Complex(d), Self::Complex(s)) => d.extend_from_slice(&s[start..start + len]),
            (Self::Byte(d), Self::Byte(s)) => d.extend_from_slice(&s[start..start + len]),
            (Self::Text(d), Self::Text(s)) => d.extend_from_slice(&s[start..start + len]),
            (Self::Cell(d), Self::Cell(s)) => d.extend_from_slice(&s[start..start + len]),
            (d, s) => {
                return Err(Error::KindMismatch { expected: d.kind(), got: s.kind() });
            }
        }
        Ok(())
    }

    /// Scan the `len`-element run starting at `start` and collect the
    /// 0-based positions (relative to `start`) of its nonzero elements
    /// into `out`, preserving order. `out` is cleared first.
    pub fn collect_nonzero_offsets(&self, start: usize, len: usize, out: &mut Vec<usize>) {
        out.clear();
        for k in 0..len {
            if !self.is_zero(start + k) {
                out.push(k);
            }
        }
    }

    /// Copy the elements at `start + offsets[..]` into a new vector of the
    /// same kind, in offset order
    pub fn take_selected(&self, start: usize, offsets: &[usize]) -> Self {
        match self {
            Self::Bool(v) => Self::Bool(offsets.iter().map(|&o| v[start + o]).collect()),
            Self::Int(v) => Self::Int(offsets.iter().map(|&o| v[start + o]).collect()),
            Self::Double(v) => Self::Double(offsets.iter().map(|&o| v[start + o]).collect()),
            Self::Complex(v) => Self::Complex(offsets.iter().map(|&o| v[start + o]).collect()),
            Self::Byte(v) => Self::Byte(offsets.iter().map(|&o| v[start + o]).collect()),
            Self::Text(v) => Self::Text(offsets.iter().map(|&o| v[start + o].clone()).collect()),
            Self::Cell(v) => Self::Cell(offsets.iter().map(|&o| v[start + o].clone()).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_predicate_per_kind() {
        assert!(DataVec::Bool(vec![false, true]).is_zero(0));
        assert!(!DataVec::Bool(vec![false, true]).is_zero(1));
        assert!(DataVec::Int(vec![0, 3]).is_zero(0));
        assert!(DataVec::Double(vec![0.0, 0.5]).is_zero(0));
        assert!(!DataVec::Double(vec![0.0, 0.5]).is_zero(1));
        assert!(DataVec::Complex(vec![Complex128::ZERO]).is_zero(0));
        assert!(!DataVec::Complex(vec![Complex128::new(0.0, 2.0)]).is_zero(0));
        assert!(DataVec::Byte(vec![0u8]).is_zero(0));

        // Empty string is zero, NA is not.
        let text = DataVec::Text(vec![Some(String::new()), None, Some("x".into())]);
        assert!(text.is_zero(0));
        assert!(!text.is_zero(1));
        assert!(!text.is_zero(2));

        let cell = DataVec::Cell(vec![None, Some(Scalar::Int(0))]);
        assert!(cell.is_zero(0));
        assert!(!cell.is_zero(1));
    }

    #[test]
    fn test_zeroed_is_all_zero() {
        for kind in ElemKind::ALL {
            let v = DataVec::zeroed(kind, 4);
            assert_eq!(v.len(), 4);
            for i in 0..4 {
                assert!(v.is_zero(i), "kind {kind}");
            }
        }
    }

    #[test]
    fn test_collect_nonzero_offsets() {
        let v = DataVec::Int(vec![0, 2, 0, 0, 3, 5]);
        let mut out = Vec::new();
        v.collect_nonzero_offsets(0, 6, &mut out);
        assert_eq!(out, vec![1, 4, 5]);
        v.collect_nonzero_offsets(3, 3, &mut out);
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn test_take_selected() {
        let v = DataVec::Double(vec![1.0, 0.0, 3.0, 4.0]);
        assert_eq!(v.take_selected(0, &[0, 2, 3]), DataVec::Double(vec![1.0, 3.0, 4.0]));
    }

    #[test]
    fn test_copy_kind_mismatch() {
        let mut d = DataVec::Int(vec![]);
        let s = DataVec::Double(vec![1.0]);
        let err = d.push_from(&s, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::KindMismatch { expected: ElemKind::Int, got: ElemKind::Double }
        ));
    }

    #[test]
    fn test_set_and_extend() {
        let mut d = DataVec::zeroed(ElemKind::Int, 3);
        let s = DataVec::Int(vec![7, 8, 9]);
        d.set_from(1, &s, 2).unwrap();
        assert_eq!(d, DataVec::Int(vec![0, 9, 0]));

        let mut e = DataVec::with_capacity(ElemKind::Int, 2);
        e.extend_from_range(&s, 1, 2).unwrap();
        assert_eq!(e, DataVec::Int(vec![8, 9]));
        assert!(e.extend_from_range(&s, 2, 2).is_err());
    }
}
