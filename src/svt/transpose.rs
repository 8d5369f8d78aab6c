//! 2-D transpose
//!
//! Works directly on the sparse tree: a counting pass sizes one output
//! leaf per input row, then a single scan over the columns in ascending
//! order distributes every entry. Because columns are visited in order,
//! each output leaf's offsets come out ascending for free.

use super::{LeafVec, SvtArray, SvtNode};
use crate::error::{Error, Result};
use crate::vector::DataVec;

impl SvtArray {
    /// Transpose a 2-D array, swapping rows and columns.
    pub fn transpose(&self) -> Result<SvtArray> {
        if self.ndim() != 2 {
            return Err(Error::NotTwoDimensional { ndim: self.ndim() });
        }
        let [nrow, ncol] = [self.shape[0], self.shape[1]];
        let out_shape = vec![ncol, nrow];
        let columns: &[SvtNode] = match self.root() {
            SvtNode::Empty => {
                return Ok(SvtArray::from_parts(out_shape, self.kind, SvtNode::Empty))
            }
            SvtNode::Branch(children) => children,
            SvtNode::Leaf(_) => {
                return Err(Error::MalformedTree {
                    reason: "leaf vector at the root of a 2-D tree",
                })
            }
        };

        let mut counts = vec![0usize; nrow];
        for col in columns {
            match col {
                SvtNode::Empty => {}
                SvtNode::Leaf(lv) => {
                    for &row in lv.offsets() {
                        counts[row] += 1;
                    }
                }
                SvtNode::Branch(_) => {
                    return Err(Error::MalformedTree {
                        reason: "branch node below the column level of a 2-D tree",
                    })
                }
            }
        }

        let mut rows: Vec<Option<(Vec<usize>, DataVec)>> = (0..nrow).map(|_| None).collect();
        for (j, col) in columns.iter().enumerate() {
            if let SvtNode::Leaf(lv) = col {
                for (k, &row) in lv.offsets().iter().enumerate() {
                    let (offs, vals) = rows[row].get_or_insert_with(|| {
                        (
                            Vec::with_capacity(counts[row]),
                            DataVec::with_capacity(self.kind, counts[row]),
                        )
                    });
                    offs.push(j);
                    vals.push_from(lv.values(), k)?;
                }
            }
        }

        let mut children = Vec::with_capacity(nrow);
        for slot in rows {
            children.push(match slot {
                None => SvtNode::Empty,
                Some((offs, vals)) => SvtNode::Leaf(LeafVec::new(offs, vals)?),
            });
        }
        // The input had at least one entry, so some output row is non-empty.
        Ok(SvtArray::from_parts(out_shape, self.kind, SvtNode::Branch(children)))
    }
}
