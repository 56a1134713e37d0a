use dokmat_core::{
    Axis, CoordinateMatrix, Dense, LinearIndexMatrix, MajorOrder, SparseError,
};
use rayon::prelude::*;

#[test]
fn absent_keys_read_as_default_or_diagonal() {
    let m: CoordinateMatrix<i64> = CoordinateMatrix::with_defaults((3, 3), MajorOrder::RowMajor, 7, 1);
    assert_eq!(m.get_at(0, 1).unwrap(), 7);
    assert_eq!(m.get_at(2, 2).unwrap(), 1);
    assert_eq!(m.get((1, 0)).unwrap(), 7);
    assert!(m.is_empty());
    assert_eq!(m.default_value(), 7);
    assert_eq!(m.diagonal_value(), 1);
}

#[test]
fn set_and_get_coordinate_keys() {
    let m: CoordinateMatrix<f64> = CoordinateMatrix::new((2, 3), MajorOrder::RowMajor);
    m.set_at(0, 2, 5.0).unwrap();
    m.set((1, 1), 2.5).unwrap();
    assert_eq!(m.nnz(), 2);
    assert_eq!(m.get_at(0, 2).unwrap(), 5.0);
    assert_eq!(m.get((1, 1)).unwrap(), 2.5);
    assert_eq!(m.get((1, 0)).unwrap(), 0.0);
    assert!(!m.is_linear_indexed());
    assert_eq!(m.upsert((0, 2), 6.0).unwrap(), Some(5.0));
}

#[test]
fn linear_keys_follow_store_order() {
    let m: LinearIndexMatrix<i32> = LinearIndexMatrix::new((2, 3), MajorOrder::RowMajor);
    m.set(5, 9).unwrap();
    assert!(m.is_linear_indexed());
    assert_eq!(m.get_at(1, 2).unwrap(), 9);
    assert_eq!(m.key_at(1, 2), 5);
    assert_eq!(m.key_to_coordinates(1).unwrap(), (0, 1));
    assert_eq!(m.key_to_linear_index(1, MajorOrder::ColumnMajor).unwrap(), 2);

    let cm: LinearIndexMatrix<i32> = LinearIndexMatrix::new((2, 3), MajorOrder::ColumnMajor);
    cm.set_at(0, 1, 4).unwrap();
    assert_eq!(cm.entries(), vec![(2, 4)]);
    assert_eq!(cm.coordinate_entries(), vec![((0, 1), 4)]);
}

#[test]
fn out_of_bounds_keys_are_rejected() {
    let lin: LinearIndexMatrix<i32> = LinearIndexMatrix::new((2, 3), MajorOrder::RowMajor);
    let err = lin.set(6, 1).unwrap_err();
    assert_eq!(
        err,
        SparseError::CoordinateOutOfBounds {
            axis: Axis::Row,
            index: 2,
            extent: 2
        }
    );
    assert!(lin.get(6).is_err());
    assert!(lin.is_empty());

    let m: CoordinateMatrix<i32> = CoordinateMatrix::new((2, 3), MajorOrder::RowMajor);
    let err = m.set((0, 3), 1).unwrap_err();
    assert!(matches!(
        err,
        SparseError::CoordinateOutOfBounds {
            axis: Axis::Column,
            ..
        }
    ));
    assert!(m.try_insert((5, 0), 1).is_err());
    assert!(m.update((2, 0), |_| Some(1)).is_err());
    assert!(m.is_empty());
}

#[test]
fn try_insert_only_when_absent() {
    let m: CoordinateMatrix<i32> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    assert!(m.try_insert((0, 1), 3).unwrap());
    assert!(!m.try_insert((0, 1), 8).unwrap());
    assert_eq!(m.get_at(0, 1).unwrap(), 3);
}

#[test]
fn remove_absent_is_not_an_error() {
    let m: CoordinateMatrix<i32> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    assert_eq!(m.remove((1, 1)), None);
    m.set_at(1, 1, 4).unwrap();
    assert!(m.contains_key((1, 1)));
    assert_eq!(m.remove((1, 1)), Some(4));
    assert!(!m.contains_key((1, 1)));
}

#[test]
fn update_deletes_on_none() {
    let m: CoordinateMatrix<i32> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    assert_eq!(m.update((0, 0), |v| Some(v.unwrap_or(0) + 2)).unwrap(), Some(2));
    assert_eq!(m.update((0, 0), |v| v.map(|x| x * 5)).unwrap(), Some(10));
    assert_eq!(m.update((0, 0), |_| None).unwrap(), None);
    assert!(m.is_empty());
}

#[test]
fn concurrent_updates_are_atomic() {
    let m: CoordinateMatrix<i64> = CoordinateMatrix::new((4, 4), MajorOrder::RowMajor);
    (0..10_000usize).into_par_iter().for_each(|k| {
        m.update((k % 4, 0), |v| Some(v.unwrap_or(0) + 1)).unwrap();
    });
    for row in 0..4 {
        assert_eq!(m.get_at(row, 0).unwrap(), 2500);
    }
}

#[test]
fn retain_map_rewrites_and_drops() {
    let m: CoordinateMatrix<i32> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    m.set_at(0, 0, 1).unwrap();
    m.set_at(0, 1, 2).unwrap();
    m.set_at(1, 0, 3).unwrap();
    m.retain_map(|v| (v != 2).then_some(v * 10));
    assert_eq!(m.nnz(), 2);
    assert_eq!(m.get_at(0, 0).unwrap(), 10);
    assert_eq!(m.get_at(1, 0).unwrap(), 30);
    assert!(!m.contains_key((0, 1)));
}

#[test]
fn clear_and_clone_are_independent() {
    let m: CoordinateMatrix<i32> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    m.set_at(1, 0, 3).unwrap();
    let copy = m.clone();
    m.clear();
    assert!(m.is_empty());
    assert_eq!(copy.get_at(1, 0).unwrap(), 3);
}

#[test]
fn dense_round_trip_skips_fallback_cells() {
    let mut dense = Dense::new((2, 2), 0, 1);
    dense.set(0, 1, 4).unwrap();
    let m: CoordinateMatrix<i32> = CoordinateMatrix::from_dense(&dense, MajorOrder::RowMajor, 0, 1);
    assert_eq!(m.nnz(), 1);
    assert_eq!(m.get_at(0, 1).unwrap(), 4);
    assert_eq!(m.get_at(1, 1).unwrap(), 1);
    assert_eq!(m.to_dense().to_rows(), vec![vec![1, 4], vec![0, 1]]);
}

#[test]
fn dense_buffer_basics() {
    let mut dense = Dense::new((2, 3), 0.0f64, 1.0);
    assert_eq!(dense.shape(), (2, 3));
    assert_eq!(dense.get(1, 1), Some(1.0));
    assert_eq!(dense.get(1, 2), Some(0.0));
    assert_eq!(dense.get(2, 0), None);
    assert!(dense.set(0, 3, 1.0).is_err());
    dense.set(1, 2, 9.0).unwrap();
    let cells: Vec<(usize, usize, f64)> = dense.iter().collect();
    assert_eq!(cells.len(), 6);
    assert_eq!(cells[5], (1, 2, 9.0));
    assert_eq!(cells[0], (0, 0, 1.0));
}

#[test]
fn linear_keys_need_an_addressable_shape() {
    let shape = (usize::MAX, 2);
    let linear: LinearIndexMatrix<i32> = LinearIndexMatrix::new(shape, MajorOrder::RowMajor);
    let err = linear.set_at(0, 1, 5).unwrap_err();
    assert!(matches!(err, SparseError::ShapeOverflow { .. }));
    assert!(linear.is_empty());

    let coord: CoordinateMatrix<i32> = CoordinateMatrix::new(shape, MajorOrder::RowMajor);
    coord.set_at(usize::MAX - 1, 1, 5).unwrap();
    assert_eq!(coord.get_at(usize::MAX - 1, 1).unwrap(), 5);
    let err = coord.key_to_linear_index((usize::MAX - 1, 1), MajorOrder::ColumnMajor).unwrap_err();
    assert!(matches!(err, SparseError::ShapeOverflow { .. }));
}
