//! Whole-tree element-kind coercion

use super::{LeafVec, SvtArray, SvtNode};
use crate::dtype::ElemKind;
use crate::error::Result;
use crate::vector::CoerceWarnings;

/// Coerce one leaf's values to `target`, stripping any entries the
/// conversion turned into zeros. Returns `None` when nothing survives.
///
/// The zero strip only runs for kind pairs that can actually produce
/// zeros from nonzero inputs; for every other pair the offsets carry
/// over untouched.
pub(crate) fn coerce_leaf(
    lv: &LeafVec,
    target: ElemKind,
    scratch: &mut Vec<usize>,
    warn: &mut CoerceWarnings,
) -> Result<Option<LeafVec>> {
    let src_kind = lv.kind();
    if src_kind == target {
        return Ok(Some(lv.clone()));
    }
    let (vals, w) = lv.values().convert(target);
    warn.merge(w);
    let coerced = LeafVec::new(lv.offsets().to_vec(), vals)?;
    if src_kind.coercion_can_introduce_zeros(target) {
        Ok(coerced.drop_zeros(scratch))
    } else {
        Ok(Some(coerced))
    }
}

fn cast_node(
    node: &SvtNode,
    target: ElemKind,
    warn: &mut CoerceWarnings,
    scratch: &mut Vec<usize>,
) -> Result<SvtNode> {
    match node {
        SvtNode::Empty => Ok(SvtNode::Empty),
        SvtNode::Leaf(lv) => Ok(match coerce_leaf(lv, target, scratch, warn)? {
            Some(lv) => SvtNode::Leaf(lv),
            None => SvtNode::Empty,
        }),
        SvtNode::Branch(children) => {
            let mut out = Vec::with_capacity(children.len());
            for child in children {
                out.push(cast_node(child, target, warn, scratch)?);
            }
            if out.iter().all(SvtNode::is_empty) {
                Ok(SvtNode::Empty)
            } else {
                Ok(SvtNode::Branch(out))
            }
        }
    }
}

impl SvtArray {
    /// Rebuild the whole tree with every value coerced to `target`.
    ///
    /// Entries whose value becomes zero under the coercion are dropped,
    /// and branches left with no nonzero descendants collapse to `Empty`.
    /// The returned warnings are the union over all converted leaves;
    /// casting to the array's own kind is a cheap clone with no warnings.
    pub fn cast(&self, target: ElemKind) -> Result<(SvtArray, CoerceWarnings)> {
        if target == self.kind {
            return Ok((self.clone(), CoerceWarnings::NONE));
        }
        let mut warn = CoerceWarnings::NONE;
        let mut scratch = Vec::new();
        let root = cast_node(&self.root, target, &mut warn, &mut scratch)?;
        Ok((SvtArray::from_parts(self.shape.clone(), target, root), warn))
    }
}
