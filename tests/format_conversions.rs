//! Integration tests for the COO and CSC interchange formats
//!
//! Tests verify:
//! - COO import/export round trips, including the canonical entry order
//! - Rejection of out-of-order and out-of-range coordinates
//! - CSC structural invariants on export (pointer monotonicity, nnz)
//! - CSC import with and without kind coercion
//! - Agreement between the three formats on the same matrix

use svtree::dtype::ElemKind;
use svtree::error::Error;
use svtree::svt::{CooArray, CscMatrix, DenseArray, SvtArray};
use svtree::vector::{CoerceWarnings, DataVec};

// ============================================================================
// COO
// ============================================================================

#[test]
fn test_coo_import_builds_expected_dense() {
    // (1,1)=5, (2,1)=7, (1,2)=9 -> [[5, 9], [7, 0]]
    let coo = CooArray::new(
        vec![2, 2],
        vec![1, 1, 2, 1, 1, 2],
        DataVec::Int(vec![5, 7, 9]),
    )
    .unwrap();
    let arr = SvtArray::from_coo(&coo).unwrap();
    assert_eq!(arr.kind(), ElemKind::Int);
    assert_eq!(
        arr.to_dense(None).unwrap().data(),
        &DataVec::Int(vec![5, 7, 9, 0])
    );
}

#[test]
fn test_coo_import_rejects_unsorted_rows_within_a_column() {
    // (2,1) then (1,1): same column, descending row
    let coo = CooArray::new(vec![2, 2], vec![2, 1, 1, 1], DataVec::Int(vec![7, 5])).unwrap();
    assert!(matches!(
        SvtArray::from_coo(&coo).unwrap_err(),
        Error::UnsortedCoordinates { entry: 1 }
    ));
}

#[test]
fn test_coo_import_rejects_duplicate_coordinates() {
    let coo = CooArray::new(vec![3, 1], vec![2, 1, 2, 1], DataVec::Int(vec![1, 2])).unwrap();
    assert!(matches!(
        SvtArray::from_coo(&coo).unwrap_err(),
        Error::UnsortedCoordinates { entry: 1 }
    ));
}

#[test]
fn test_coo_import_reports_offending_axis() {
    let coo = CooArray::new(
        vec![2, 3, 2],
        vec![1, 4, 1],
        DataVec::Double(vec![1.0]),
    )
    .unwrap();
    assert!(matches!(
        SvtArray::from_coo(&coo).unwrap_err(),
        Error::InvalidCoordinates { entry: 0, axis: 1, coord: 4, size: 3 }
    ));
}

#[test]
fn test_coo_export_lists_entries_in_canonical_order() {
    let dense =
        DenseArray::new(vec![2, 3], DataVec::Int(vec![0, 4, 1, 0, 0, 2])).unwrap();
    let (arr, _) = SvtArray::from_dense(&dense, ElemKind::Int).unwrap();
    let coo = arr.to_coo().unwrap();
    // Sorted with the row axis fastest, the column axis slowest
    assert_eq!(coo.coords(), &[2, 1, 1, 2, 2, 3]);
    assert_eq!(coo.values(), &DataVec::Int(vec![4, 1, 2]));
    assert_eq!(SvtArray::from_coo(&coo).unwrap(), arr);
}

#[test]
fn test_coo_round_trip_text_kind() {
    let coo = CooArray::new(
        vec![2, 2],
        vec![1, 2, 2, 2],
        DataVec::Text(vec![Some("hi".into()), None]),
    )
    .unwrap();
    let arr = SvtArray::from_coo(&coo).unwrap();
    assert_eq!(arr.kind(), ElemKind::Text);
    assert_eq!(arr.to_coo().unwrap(), coo);
}

// ============================================================================
// CSC
// ============================================================================

#[test]
fn test_csc_export_invariants() {
    let dense = DenseArray::new(
        vec![3, 4],
        DataVec::Double(vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 3.0, 0.0, 4.0, 0.0]),
    )
    .unwrap();
    let (arr, _) = SvtArray::from_dense(&dense, ElemKind::Double).unwrap();
    let csc = arr.to_csc().unwrap();

    let ptrs = csc.col_ptrs();
    assert_eq!(ptrs.len(), 5);
    assert_eq!(ptrs[0], 0);
    assert_eq!(ptrs[4], csc.nz_count());
    assert!(ptrs.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(csc.col_ptrs(), &[0, 1, 1, 3, 4]);
    assert_eq!(csc.row_indices(), &[1, 0, 2, 1]);
    assert_eq!(csc.values(), &DataVec::Double(vec![1.0, 2.0, 3.0, 4.0]));
}

#[test]
fn test_csc_round_trip() {
    let csc = CscMatrix::new(
        [3, 3],
        vec![0, 1, 2, 3],
        vec![2, 0, 2],
        DataVec::Int(vec![3, 2, 5]),
    )
    .unwrap();
    let (arr, warn) = SvtArray::from_csc(&csc, ElemKind::Int).unwrap();
    assert!(warn.is_empty());
    assert_eq!(arr.to_csc().unwrap(), csc);
}

#[test]
fn test_csc_import_with_widening_cast() {
    let csc = CscMatrix::new([2, 1], vec![0, 2], vec![0, 1], DataVec::Int(vec![1, -2])).unwrap();
    let (arr, warn) = SvtArray::from_csc(&csc, ElemKind::Double).unwrap();
    assert!(warn.is_empty());
    assert_eq!(arr.kind(), ElemKind::Double);
    assert_eq!(
        arr.to_dense(None).unwrap().data(),
        &DataVec::Double(vec![1.0, -2.0])
    );
}

#[test]
fn test_csc_import_narrowing_flags_and_drops() {
    let csc = CscMatrix::new(
        [2, 1],
        vec![0, 2],
        vec![0, 1],
        DataVec::Double(vec![200.5, 300.0]),
    )
    .unwrap();
    // 200.5 truncates to 200 and stays; 300.0 is out of byte range,
    // becomes zero and is dropped.
    let (arr, warn) = SvtArray::from_csc(&csc, ElemKind::Byte).unwrap();
    assert_eq!(arr.nz_count(), 1);
    assert!(warn.contains(CoerceWarnings::IMPRECISE));
    assert!(warn.contains(CoerceWarnings::OUT_OF_RANGE));
}

// ============================================================================
// Cross-format agreement
// ============================================================================

#[test]
fn test_formats_agree_on_the_same_matrix() {
    let dense = DenseArray::new(
        vec![4, 3],
        DataVec::Int(vec![0, 6, 0, 0, 1, 0, 0, 8, 0, 0, 2, 0]),
    )
    .unwrap();
    let (from_dense, _) = SvtArray::from_dense(&dense, ElemKind::Int).unwrap();
    let from_coo = SvtArray::from_coo(&from_dense.to_coo().unwrap()).unwrap();
    let (from_csc, _) =
        SvtArray::from_csc(&from_dense.to_csc().unwrap(), ElemKind::Int).unwrap();
    assert_eq!(from_coo, from_dense);
    assert_eq!(from_csc, from_dense);
    assert_eq!(from_dense.to_dense(None).unwrap(), dense);
}
