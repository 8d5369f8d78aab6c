//! Coordinate-list arrays and the COO <-> SVT converters
//!
//! COO entries carry 1-based coordinates, one row of `ndim` coordinates
//! per stored value, laid out entry-major. The importer requires the
//! entries in the tree's canonical order (axis 0 varies fastest within
//! each group of identical outer coordinates) and builds the tree in two
//! passes: a counting pass that grows the branch skeleton and tallies
//! leaf lengths, then a fill pass that appends into exactly-sized leaf
//! vectors and freezes each one the moment it fills.

use std::mem;

use super::{AppendableLeaf, LeafVec, SvtArray, SvtNode, MAX_NZCOUNT};
use crate::error::{Error, Result};
use crate::vector::DataVec;

/// A sparse array as a flat list of (coordinates, value) entries
#[derive(Debug, Clone, PartialEq)]
pub struct CooArray {
    shape: Vec<usize>,
    coords: Vec<usize>,
    values: DataVec,
}

impl CooArray {
    /// Create a coordinate list, checking that the coordinate buffer
    /// holds exactly `ndim` coordinates per value.
    ///
    /// Coordinate ranges and ordering are checked by
    /// [`SvtArray::from_coo`], which can name the offending entry.
    pub fn new(shape: Vec<usize>, coords: Vec<usize>, values: DataVec) -> Result<Self> {
        if shape.is_empty() {
            return Err(Error::ShapeMismatch { expected: vec![1], got: shape });
        }
        if coords.len() != values.len() * shape.len() {
            return Err(Error::ShapeMismatch {
                expected: vec![values.len() * shape.len()],
                got: vec![coords.len()],
            });
        }
        Ok(Self { shape, coords, values })
    }

    /// Dimension sizes, innermost first
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The flat entry-major coordinate buffer
    pub fn coords(&self) -> &[usize] {
        &self.coords
    }

    /// Values parallel to the coordinate rows
    pub fn values(&self) -> &DataVec {
        &self.values
    }

    /// Number of stored entries
    pub fn nz_count(&self) -> usize {
        self.values.len()
    }

    /// The 1-based coordinates of entry `i`
    pub fn coord(&self, i: usize) -> &[usize] {
        let ndim = self.shape.len();
        &self.coords[i * ndim..(i + 1) * ndim]
    }
}

fn coord_index(entry: usize, axis: usize, coord: usize, size: usize) -> Result<usize> {
    if coord < 1 || coord > size {
        return Err(Error::InvalidCoordinates { entry, axis, coord, size });
    }
    Ok(coord - 1)
}

/// Counting-pass skeleton: branch layout plus per-leaf entry tallies
enum CountNode {
    Empty,
    Branch(Vec<CountNode>),
    Counts(Vec<usize>),
}

fn grow(node: &mut CountNode, dim: &[usize], c: &[usize], j: usize, entry: usize) -> Result<()> {
    let k = coord_index(entry, j, c[j], dim[j])?;
    if j == 1 {
        if matches!(node, CountNode::Empty) {
            *node = CountNode::Counts(vec![0; dim[1]]);
        }
        match node {
            CountNode::Counts(counts) => {
                counts[k] += 1;
                Ok(())
            }
            _ => Err(Error::MalformedTree { reason: "count skeleton level mismatch" }),
        }
    } else {
        if matches!(node, CountNode::Empty) {
            *node = CountNode::Branch((0..dim[j]).map(|_| CountNode::Empty).collect());
        }
        match node {
            CountNode::Branch(children) => grow(&mut children[k], dim, c, j - 1, entry),
            _ => Err(Error::MalformedTree { reason: "count skeleton level mismatch" }),
        }
    }
}

/// Fill-pass state for one leaf position
enum LeafSlot {
    Vacant,
    Building(AppendableLeaf),
    Done(LeafVec),
}

enum BuildNode {
    Empty,
    Branch(Vec<BuildNode>),
    Row(Vec<LeafSlot>),
}

fn place(
    count: &CountNode,
    node: &mut BuildNode,
    dim: &[usize],
    c: &[usize],
    values: &DataVec,
    entry: usize,
    j: usize,
) -> Result<()> {
    // Ranges were validated by the counting pass.
    let k = c[j] - 1;
    if j == 1 {
        if matches!(node, BuildNode::Empty) {
            let counts = match count {
                CountNode::Counts(v) => v,
                _ => return Err(Error::MalformedTree { reason: "count skeleton level mismatch" }),
            };
            let slots = counts
                .iter()
                .map(|&n| {
                    if n == 0 {
                        LeafSlot::Vacant
                    } else {
                        LeafSlot::Building(AppendableLeaf::with_capacity(values.kind(), n))
                    }
                })
                .collect();
            *node = BuildNode::Row(slots);
        }
        let slots = match node {
            BuildNode::Row(slots) => slots,
            _ => return Err(Error::MalformedTree { reason: "fill skeleton level mismatch" }),
        };
        let slot = &mut slots[k];
        let off = c[0] - 1;
        let full = match slot {
            LeafSlot::Building(al) => al.append(entry, off, values, entry)?,
            _ => {
                return Err(Error::MalformedTree {
                    reason: "entry routed to a vacant or finished leaf",
                })
            }
        };
        if full {
            if let LeafSlot::Building(al) = mem::replace(slot, LeafSlot::Vacant) {
                *slot = LeafSlot::Done(al.freeze()?);
            }
        }
        Ok(())
    } else {
        if matches!(node, BuildNode::Empty) {
            *node = BuildNode::Branch((0..dim[j]).map(|_| BuildNode::Empty).collect());
        }
        match (node, count) {
            (BuildNode::Branch(children), CountNode::Branch(kids)) => {
                place(&kids[k], &mut children[k], dim, c, values, entry, j - 1)
            }
            _ => Err(Error::MalformedTree { reason: "fill skeleton level mismatch" }),
        }
    }
}

fn finish(node: BuildNode) -> Result<SvtNode> {
    match node {
        BuildNode::Empty => Ok(SvtNode::Empty),
        BuildNode::Branch(children) => {
            let children = children.into_iter().map(finish).collect::<Result<Vec<_>>>()?;
            Ok(SvtNode::Branch(children))
        }
        BuildNode::Row(slots) => {
            let mut children = Vec::with_capacity(slots.len());
            for slot in slots {
                children.push(match slot {
                    LeafSlot::Vacant => SvtNode::Empty,
                    LeafSlot::Done(lv) => SvtNode::Leaf(lv),
                    LeafSlot::Building(_) => {
                        return Err(Error::MalformedTree {
                            reason: "leaf vector left underfilled after the fill pass",
                        })
                    }
                });
            }
            Ok(SvtNode::Branch(children))
        }
    }
}

impl SvtArray {
    /// Export the tree's entries in canonical order as a coordinate list.
    ///
    /// Fails with [`Error::CapacityExceeded`] when the nonzero count does
    /// not fit the interchange limit [`MAX_NZCOUNT`].
    pub fn to_coo(&self) -> Result<CooArray> {
        let nnz = self.nz_count();
        if nnz > MAX_NZCOUNT {
            return Err(Error::CapacityExceeded { nzcount: nnz, max: MAX_NZCOUNT });
        }
        let ndim = self.ndim();
        let mut coords = Vec::with_capacity(nnz * ndim);
        let mut values = DataVec::with_capacity(self.kind, nnz);
        let mut outer = vec![0usize; ndim];
        dump_entries(&self.root, ndim, &mut outer, &mut coords, &mut values)?;
        CooArray::new(self.shape.clone(), coords, values)
    }

    /// Build a tree from a coordinate list.
    ///
    /// The entries must be listed in the tree's canonical order; an
    /// out-of-order entry fails with [`Error::UnsortedCoordinates`]. The
    /// tree takes the kind of the input values.
    pub fn from_coo(coo: &CooArray) -> Result<SvtArray> {
        let dim = coo.shape();
        let kind = coo.values().kind();
        let ndim = dim.len();
        let nnz = coo.nz_count();
        if nnz == 0 {
            return SvtArray::empty(dim.to_vec(), kind);
        }
        if ndim == 1 {
            let mut offs = Vec::with_capacity(nnz);
            for entry in 0..nnz {
                let off = coord_index(entry, 0, coo.coord(entry)[0], dim[0])?;
                if let Some(&last) = offs.last() {
                    if off <= last {
                        return Err(Error::UnsortedCoordinates { entry });
                    }
                }
                offs.push(off);
            }
            let lv = LeafVec::new(offs, coo.values().clone())?;
            return Ok(SvtArray::from_parts(dim.to_vec(), kind, SvtNode::Leaf(lv)));
        }

        let mut counts = CountNode::Empty;
        for entry in 0..nnz {
            let c = coo.coord(entry);
            coord_index(entry, 0, c[0], dim[0])?;
            grow(&mut counts, dim, c, ndim - 1, entry)?;
        }
        let mut root = BuildNode::Empty;
        for entry in 0..nnz {
            place(&counts, &mut root, dim, coo.coord(entry), coo.values(), entry, ndim - 1)?;
        }
        Ok(SvtArray::from_parts(dim.to_vec(), kind, finish(root)?))
    }
}

fn dump_entries(
    node: &SvtNode,
    ndim_cur: usize,
    outer: &mut Vec<usize>,
    coords: &mut Vec<usize>,
    values: &mut DataVec,
) -> Result<()> {
    match node {
        SvtNode::Empty => Ok(()),
        SvtNode::Leaf(lv) => {
            let ndim = outer.len();
            for (k, &off) in lv.offsets().iter().enumerate() {
                coords.push(off + 1);
                coords.extend_from_slice(&outer[1..ndim]);
                values.push_from(lv.values(), k)?;
            }
            Ok(())
        }
        SvtNode::Branch(children) => {
            for (k, child) in children.iter().enumerate() {
                outer[ndim_cur - 1] = k + 1;
                dump_entries(child, ndim_cur - 1, outer, coords, values)?;
            }
            Ok(())
        }
    }
}
