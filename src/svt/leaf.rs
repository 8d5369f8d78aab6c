//! Leaf vectors: the atomic sparse unit
//!
//! A leaf vector is a list of (offset, value) pairs sorted by strictly
//! ascending 0-based offset, representing the nonzero entries along the
//! innermost dimension for one fixed combination of outer indices. Its
//! length is always at least 1; the all-zero case is represented by the
//! `Empty` tree node, never by a zero-length leaf.

use crate::dtype::ElemKind;
use crate::error::{Error, Result};
use crate::vector::DataVec;

/// A sorted (offset, value) pair list
#[derive(Debug, Clone, PartialEq)]
pub struct LeafVec {
    offs: Vec<usize>,
    vals: DataVec,
}

impl LeafVec {
    /// Create a leaf vector from parallel offset and value vectors.
    ///
    /// Offsets must be strictly ascending and the two vectors must have the
    /// same nonzero length. Values are not screened for zeros here; that
    /// invariant is enforced at the observable boundaries (tree validation
    /// and the zero-strip pass after coercion).
    pub fn new(offs: Vec<usize>, vals: DataVec) -> Result<Self> {
        if offs.is_empty() {
            return Err(Error::MalformedTree { reason: "zero-length leaf vector" });
        }
        if offs.len() != vals.len() {
            return Err(Error::MalformedTree {
                reason: "leaf offsets and values have different lengths",
            });
        }
        if offs.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::MalformedTree {
                reason: "leaf offsets not strictly ascending",
            });
        }
        Ok(Self { offs, vals })
    }

    /// Scan the `len`-element run of `src` starting at `start` and build a
    /// leaf vector of its nonzero entries, or `None` if the run is all
    /// zero. `scratch` is the caller-provided nonzero-offset buffer.
    pub fn from_subvector(
        src: &DataVec,
        start: usize,
        len: usize,
        scratch: &mut Vec<usize>,
    ) -> Option<Self> {
        src.collect_nonzero_offsets(start, len, scratch);
        if scratch.is_empty() {
            return None;
        }
        let vals = src.take_selected(start, scratch);
        Some(Self { offs: scratch.clone(), vals })
    }

    /// Rebuild this leaf without its zero-valued entries, or `None` if
    /// nothing remains. Surviving entries keep their original offsets.
    pub fn drop_zeros(&self, scratch: &mut Vec<usize>) -> Option<Self> {
        let kept = Self::from_subvector(&self.vals, 0, self.len(), scratch)?;
        // `kept.offs` indexes into this leaf; map back to array offsets.
        let offs = kept.offs.iter().map(|&k| self.offs[k]).collect();
        Some(Self { offs, vals: kept.vals })
    }

    /// Number of (offset, value) pairs
    pub fn len(&self) -> usize {
        self.offs.len()
    }

    /// Leaf vectors are never empty; present for API completeness
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The 0-based offsets, strictly ascending
    pub fn offsets(&self) -> &[usize] {
        &self.offs
    }

    /// The values parallel to [`offsets`](Self::offsets)
    pub fn values(&self) -> &DataVec {
        &self.vals
    }

    /// The element kind of the values
    pub fn kind(&self) -> ElemKind {
        self.vals.kind()
    }
}

/// A leaf vector under construction: fixed capacity, append-only
///
/// Used only by the COO importer. Appends must come in strictly ascending
/// offset order; once full the vector is frozen into a [`LeafVec`] and
/// never touched again.
#[derive(Debug)]
pub struct AppendableLeaf {
    offs: Vec<usize>,
    vals: DataVec,
    capacity: usize,
}

impl AppendableLeaf {
    /// An empty appendable leaf that will hold exactly `capacity` pairs
    pub fn with_capacity(kind: ElemKind, capacity: usize) -> Self {
        Self {
            offs: Vec::with_capacity(capacity),
            vals: DataVec::with_capacity(kind, capacity),
            capacity,
        }
    }

    /// Append the pair `(off, src[at])`; returns true when the leaf just
    /// reached capacity.
    ///
    /// `entry` is the 0-based input row this pair came from, used for
    /// error reporting only.
    pub fn append(&mut self, entry: usize, off: usize, src: &DataVec, at: usize) -> Result<bool> {
        if self.offs.len() >= self.capacity {
            return Err(Error::MalformedTree {
                reason: "append past appendable leaf capacity",
            });
        }
        if let Some(&last) = self.offs.last() {
            if off <= last {
                return Err(Error::UnsortedCoordinates { entry });
            }
        }
        self.offs.push(off);
        self.vals.push_from(src, at)?;
        Ok(self.offs.len() == self.capacity)
    }

    /// True once the leaf holds `capacity` pairs
    pub fn is_full(&self) -> bool {
        self.offs.len() == self.capacity
    }

    /// Freeze into a plain leaf vector; only valid when full
    pub fn freeze(self) -> Result<LeafVec> {
        if !self.is_full() {
            return Err(Error::MalformedTree {
                reason: "appendable leaf frozen before reaching capacity",
            });
        }
        LeafVec::new(self.offs, self.vals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_unsorted_offsets() {
        let err = LeafVec::new(vec![2, 1], DataVec::Int(vec![5, 6])).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { .. }));
        let err = LeafVec::new(vec![1, 1], DataVec::Int(vec![5, 6])).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { .. }));
    }

    #[test]
    fn test_new_rejects_empty_and_ragged() {
        assert!(LeafVec::new(vec![], DataVec::Int(vec![])).is_err());
        assert!(LeafVec::new(vec![0], DataVec::Int(vec![1, 2])).is_err());
    }

    #[test]
    fn test_from_subvector() {
        let data = DataVec::Int(vec![0, 2, 0, 0, 3, 5]);
        let mut scratch = Vec::new();
        let lv = LeafVec::from_subvector(&data, 0, 6, &mut scratch).unwrap();
        assert_eq!(lv.offsets(), &[1, 4, 5]);
        assert_eq!(lv.values(), &DataVec::Int(vec![2, 3, 5]));

        let zeros = DataVec::Int(vec![0, 0]);
        assert!(LeafVec::from_subvector(&zeros, 0, 2, &mut scratch).is_none());
    }

    #[test]
    fn test_drop_zeros_remaps_offsets() {
        let lv = LeafVec::new(vec![1, 4, 7], DataVec::Int(vec![2, 0, 9])).unwrap();
        let mut scratch = Vec::new();
        let kept = lv.drop_zeros(&mut scratch).unwrap();
        assert_eq!(kept.offsets(), &[1, 7]);
        assert_eq!(kept.values(), &DataVec::Int(vec![2, 9]));

        let all_zero = LeafVec::new(vec![0], DataVec::Int(vec![0])).unwrap();
        assert!(all_zero.drop_zeros(&mut scratch).is_none());
    }

    #[test]
    fn test_append_ascending_and_freeze() {
        let src = DataVec::Int(vec![10, 20, 30]);
        let mut alv = AppendableLeaf::with_capacity(ElemKind::Int, 2);
        assert!(!alv.append(0, 1, &src, 0).unwrap());
        assert!(alv.append(1, 5, &src, 1).unwrap());
        assert!(alv.is_full());
        let lv = alv.freeze().unwrap();
        assert_eq!(lv.offsets(), &[1, 5]);
        assert_eq!(lv.values(), &DataVec::Int(vec![10, 20]));
    }

    #[test]
    fn test_append_rejects_non_ascending() {
        let src = DataVec::Int(vec![10, 20]);
        let mut alv = AppendableLeaf::with_capacity(ElemKind::Int, 2);
        alv.append(0, 3, &src, 0).unwrap();
        let err = alv.append(1, 3, &src, 1).unwrap_err();
        assert!(matches!(err, Error::UnsortedCoordinates { entry: 1 }));
    }

    #[test]
    fn test_freeze_requires_full() {
        let alv = AppendableLeaf::with_capacity(ElemKind::Int, 2);
        assert!(alv.freeze().is_err());
    }
}
