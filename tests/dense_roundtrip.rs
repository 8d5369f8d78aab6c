//! Integration tests for dense <-> SVT conversion
//!
//! Tests verify:
//! - Round-trip identity for every element kind
//! - Column-major layout of the dense buffers
//! - Zero entries never stored, all-zero inputs collapse to Empty
//! - Coercion during import drops entries that become zero
//! - Dimension names survive export
//! - Randomized round trips on larger shapes

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use svtree::dtype::{Complex128, ElemKind, Scalar};
use svtree::svt::{DenseArray, SvtArray, SvtNode};
use svtree::vector::{CoerceWarnings, DataVec};

fn round_trip(shape: Vec<usize>, data: DataVec) {
    let kind = data.kind();
    let dense = DenseArray::new(shape, data).unwrap();
    let (arr, warn) = SvtArray::from_dense(&dense, kind).unwrap();
    assert!(warn.is_empty());
    assert_eq!(arr.to_dense(None).unwrap(), dense);
}

// ============================================================================
// Round trips per element kind
// ============================================================================

#[test]
fn test_round_trip_bool() {
    round_trip(vec![2, 3], DataVec::Bool(vec![true, false, false, true, true, false]));
}

#[test]
fn test_round_trip_int() {
    round_trip(vec![3, 3], DataVec::Int(vec![0, 0, 3, 2, 0, 0, 0, 0, 5]));
}

#[test]
fn test_round_trip_double() {
    round_trip(vec![2, 2], DataVec::Double(vec![0.0, -1.5, 2.25, 0.0]));
}

#[test]
fn test_round_trip_complex() {
    round_trip(
        vec![2, 2],
        DataVec::Complex(vec![
            Complex128::ZERO,
            Complex128::new(1.0, -1.0),
            Complex128::new(0.0, 2.0),
            Complex128::ZERO,
        ]),
    );
}

#[test]
fn test_round_trip_byte() {
    round_trip(vec![4], DataVec::Byte(vec![0, 255, 0, 7]));
}

#[test]
fn test_round_trip_text() {
    round_trip(
        vec![2, 2],
        DataVec::Text(vec![
            Some(String::new()),
            Some("ab".to_string()),
            None,
            Some("c".to_string()),
        ]),
    );
}

#[test]
fn test_round_trip_cell() {
    round_trip(
        vec![3],
        DataVec::Cell(vec![None, Some(Scalar::Int(4)), Some(Scalar::Text("x".into()))]),
    );
}

// ============================================================================
// Layout and structure
// ============================================================================

#[test]
fn test_column_major_layout() {
    // Columns [3, 0, 5], [0, 0, 0], [2, 0, 0] stored column by column
    let dense =
        DenseArray::new(vec![3, 3], DataVec::Int(vec![3, 0, 5, 0, 0, 0, 2, 0, 0])).unwrap();
    let (arr, _) = SvtArray::from_dense(&dense, ElemKind::Int).unwrap();
    assert_eq!(arr.nz_count(), 3);
    let cols = match arr.root() {
        SvtNode::Branch(cols) => cols,
        other => panic!("unexpected root: {other:?}"),
    };
    let leaf = |n: &SvtNode| match n {
        SvtNode::Leaf(lv) => (lv.offsets().to_vec(), lv.values().clone()),
        other => panic!("expected a leaf, got {other:?}"),
    };
    assert_eq!(leaf(&cols[0]), (vec![0, 2], DataVec::Int(vec![3, 5])));
    assert!(matches!(cols[1], SvtNode::Empty));
    assert_eq!(leaf(&cols[2]), (vec![0], DataVec::Int(vec![2])));
}

#[test]
fn test_all_zero_column_is_empty_node() {
    let dense = DenseArray::new(vec![2, 2], DataVec::Int(vec![1, 0, 0, 0])).unwrap();
    let (arr, _) = SvtArray::from_dense(&dense, ElemKind::Int).unwrap();
    match arr.root() {
        SvtNode::Branch(cols) => assert!(matches!(cols[1], SvtNode::Empty)),
        other => panic!("unexpected root: {other:?}"),
    }
}

#[test]
fn test_three_dimensional_round_trip() {
    let mut data = vec![0.0; 24];
    data[0] = 1.0;
    data[7] = -2.0;
    data[23] = 3.5;
    round_trip(vec![2, 3, 4], DataVec::Double(data));
}

#[test]
fn test_import_with_coercion_drops_truncated_entries() {
    let dense =
        DenseArray::new(vec![2, 2], DataVec::Double(vec![0.4, 2.0, 0.0, 3.5])).unwrap();
    let (arr, warn) = SvtArray::from_dense(&dense, ElemKind::Int).unwrap();
    assert_eq!(arr.kind(), ElemKind::Int);
    assert_eq!(arr.nz_count(), 2);
    assert!(warn.contains(CoerceWarnings::IMPRECISE));
    assert_eq!(
        arr.to_dense(None).unwrap().data(),
        &DataVec::Int(vec![0, 2, 0, 3])
    );
}

#[test]
fn test_dimnames_attach_on_export() {
    let dense = DenseArray::new(vec![2, 2], DataVec::Int(vec![1, 0, 0, 2])).unwrap();
    let (arr, _) = SvtArray::from_dense(&dense, ElemKind::Int).unwrap();
    let names = vec![Some(vec!["r1".to_string(), "r2".to_string()]), None];
    let out = arr.to_dense(Some(names.clone())).unwrap();
    assert_eq!(out.dimnames(), Some(&names));
}

// ============================================================================
// Randomized round trips
// ============================================================================

#[test]
fn test_random_sparse_double_matrices() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let nrow = rng.gen_range(1..8);
        let ncol = rng.gen_range(1..8);
        let data: Vec<f64> = (0..nrow * ncol)
            .map(|_| {
                if rng.gen_bool(0.7) {
                    0.0
                } else {
                    rng.gen_range(-10.0..10.0)
                }
            })
            .collect();
        round_trip(vec![nrow, ncol], DataVec::Double(data));
    }
}

#[test]
fn test_random_int_cube() {
    let mut rng = StdRng::seed_from_u64(7);
    let data: Vec<i32> = (0..3 * 4 * 5)
        .map(|_| if rng.gen_bool(0.8) { 0 } else { rng.gen_range(-99..100) })
        .collect();
    round_trip(vec![3, 4, 5], DataVec::Int(data));
}
