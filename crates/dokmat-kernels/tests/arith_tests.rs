use approx::assert_relative_eq;
use dokmat_core::{CoordinateMatrix, Cvs, DokMatrix, KeyStrategy, LinearIndexMatrix, MajorOrder, SparseError};
use dokmat_kernels::*;

fn from_rows<K: KeyStrategy>(rows: &[&[i64]], order: MajorOrder) -> DokMatrix<i64, K> {
    let m = DokMatrix::new((rows.len(), rows[0].len()), order);
    for (i, row) in rows.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            if v != 0 {
                m.set_at(i, j, v).unwrap();
            }
        }
    }
    m
}

fn sorted<K: KeyStrategy>(m: &DokMatrix<i64, K>) -> Vec<((usize, usize), i64)> {
    let mut entries = m.coordinate_entries();
    entries.sort_by_key(|&(ij, _)| ij);
    entries
}

// a = [[1,2],[0,3]], b = [[-1,0],[4,0]]
fn operands() -> (CoordinateMatrix<i64>, CoordinateMatrix<i64>) {
    (
        from_rows(&[&[1, 2], &[0, 3]], MajorOrder::RowMajor),
        from_rows(&[&[-1, 0], &[4, 0]], MajorOrder::RowMajor),
    )
}

#[test]
fn add_removes_cancelled_entries() {
    let (a, b) = operands();
    let c: CoordinateMatrix<i64> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    add_dok(&a, &b, &c).unwrap();
    assert_eq!(sorted(&c), vec![((0, 1), 2), ((1, 0), 4), ((1, 1), 3)]);
    assert!(!c.contains_key((0, 0)));
}

#[test]
fn subtract_negates_entries_only_in_b() {
    let (a, b) = operands();
    let c: CoordinateMatrix<i64> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    sub_dok(&a, &b, &c).unwrap();
    assert_eq!(sorted(&c), vec![((0, 0), 2), ((0, 1), 2), ((1, 0), -4), ((1, 1), 3)]);
}

#[test]
fn additive_inverse() {
    let (a, b) = operands();
    let sum: CoordinateMatrix<i64> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    add_dok(&a, &b, &sum).unwrap();
    let back: CoordinateMatrix<i64> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    sub_dok(&sum, &b, &back).unwrap();
    assert_eq!(sorted(&back), sorted(&a));
}

#[test]
fn mixed_key_strategies() {
    let a: CoordinateMatrix<i64> = from_rows(&[&[1, 2], &[0, 3]], MajorOrder::RowMajor);
    let b: LinearIndexMatrix<i64> = from_rows(&[&[-1, 0], &[4, 0]], MajorOrder::ColumnMajor);
    let c: LinearIndexMatrix<i64> = LinearIndexMatrix::new((2, 2), MajorOrder::RowMajor);
    add_dok(&a, &b, &c).unwrap();
    let mut keys: Vec<usize> = c.entries().into_iter().map(|(k, _)| k).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![1, 2, 3]);
    assert_eq!(c.get(2).unwrap(), 4);
}

#[test]
fn target_may_alias_an_operand() {
    let (a, b) = operands();
    add_dok(&a, &b, &a).unwrap();
    assert_eq!(sorted(&a), vec![((0, 1), 2), ((1, 0), 4), ((1, 1), 3)]);

    let (a, b) = operands();
    sub_dok(&a, &b, &b).unwrap();
    assert_eq!(sorted(&b), vec![((0, 0), 2), ((0, 1), 2), ((1, 0), -4), ((1, 1), 3)]);
}

#[test]
fn shape_mismatch_leaves_target_untouched() {
    let (a, _) = operands();
    let b: CoordinateMatrix<i64> = from_rows(&[&[1, 2, 3]], MajorOrder::RowMajor);
    let c: CoordinateMatrix<i64> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    let err = add_dok(&a, &b, &c).unwrap_err();
    assert_eq!(
        err,
        SparseError::SizeMismatch {
            expected: (2, 2),
            actual: (1, 3)
        }
    );
    assert!(sub_dok(&a, &b, &c).is_err());
    let wrong: CoordinateMatrix<i64> = CoordinateMatrix::new((3, 2), MajorOrder::RowMajor);
    assert!(add_dok(&a, &a, &wrong).is_err());
    assert!(c.is_empty() && wrong.is_empty());
}

#[test]
fn unsigned_elements_add() {
    let a: CoordinateMatrix<u32> = CoordinateMatrix::new((1, 2), MajorOrder::RowMajor);
    a.set_at(0, 0, 3).unwrap();
    let b: CoordinateMatrix<u32> = CoordinateMatrix::new((1, 2), MajorOrder::RowMajor);
    b.set_at(0, 1, 4).unwrap();
    let c: CoordinateMatrix<u32> = CoordinateMatrix::new((1, 2), MajorOrder::RowMajor);
    add_dok(&a, &b, &c).unwrap();
    assert_eq!(c.get_at(0, 0).unwrap(), 3);
    assert_eq!(c.get_at(0, 1).unwrap(), 4);

    let sum = add_cvs(
        &compress_cvs(&a, MajorOrder::RowMajor).unwrap(),
        &compress_cvs(&b, MajorOrder::RowMajor).unwrap(),
    )
    .unwrap();
    assert_eq!(sum.data, vec![3u32, 4]);
    assert_eq!(sum.indices, vec![vec![0], vec![1]]);
}

#[test]
fn subtract_key_only_in_b_is_negative_b() {
    // a = [[3, 0]], b = [[0, 4]]: a - b = [[3, -4]]
    let a: CoordinateMatrix<i32> = CoordinateMatrix::new((1, 2), MajorOrder::RowMajor);
    a.set_at(0, 0, 3).unwrap();
    let b: CoordinateMatrix<i32> = CoordinateMatrix::new((1, 2), MajorOrder::RowMajor);
    b.set_at(0, 1, 4).unwrap();
    let c: CoordinateMatrix<i32> = CoordinateMatrix::new((1, 2), MajorOrder::RowMajor);
    sub_dok(&a, &b, &c).unwrap();
    assert_eq!(c.get_at(0, 0).unwrap(), 3);
    assert_eq!(c.get_at(0, 1).unwrap(), -4);

    let diff = sub_cvs(
        &compress_cvs(&a, MajorOrder::RowMajor).unwrap(),
        &compress_cvs(&b, MajorOrder::ColumnMajor).unwrap(),
    )
    .unwrap();
    assert_eq!(diff.data, vec![3, -4]);
    assert_eq!(diff.indices, vec![vec![0], vec![1]]);

    let f: CoordinateMatrix<f64> = CoordinateMatrix::new((1, 2), MajorOrder::RowMajor);
    f.set_at(0, 1, 2.5).unwrap();
    let out: CoordinateMatrix<f64> = CoordinateMatrix::new((1, 2), MajorOrder::RowMajor);
    sub_dok(&CoordinateMatrix::new((1, 2), MajorOrder::RowMajor), &f, &out).unwrap();
    assert_relative_eq!(out.get_at(0, 1).unwrap(), -2.5);
}

#[test]
fn scalar_product() {
    let (a, _) = operands();
    let c: CoordinateMatrix<i64> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    scale_dok(&a, 3, &c).unwrap();
    assert_eq!(sorted(&c), vec![((0, 0), 3), ((0, 1), 6), ((1, 1), 9)]);

    // zero scalar collapses the target, including stale entries
    c.set_at(1, 0, 8).unwrap();
    scale_dok(&a, 0, &c).unwrap();
    assert!(c.is_empty());

    let wrong: CoordinateMatrix<i64> = CoordinateMatrix::new((1, 1), MajorOrder::RowMajor);
    assert!(scale_dok(&a, 2, &wrong).is_err());
}

#[test]
fn scalar_product_in_place() {
    let m: CoordinateMatrix<f64> = CoordinateMatrix::new((2, 2), MajorOrder::RowMajor);
    m.set_at(0, 0, 1.5).unwrap();
    m.set_at(1, 0, 1e-200).unwrap();
    scale_dok_in_place(&m, 1e-200);
    assert_eq!(m.nnz(), 1);
    assert_relative_eq!(m.get_at(0, 0).unwrap(), 1.5e-200);
    scale_dok_in_place(&m, 0.0);
    assert!(m.is_empty());
}

#[test]
fn transpose_rectangular() {
    let a: CoordinateMatrix<i64> = from_rows(&[&[1, 0, 2], &[0, 3, 0]], MajorOrder::RowMajor);
    let t: LinearIndexMatrix<i64> = LinearIndexMatrix::new((3, 2), MajorOrder::ColumnMajor);
    transpose_dok(&a, &t).unwrap();
    assert_eq!(sorted(&t), vec![((0, 0), 1), ((1, 1), 3), ((2, 0), 2)]);

    let same: CoordinateMatrix<i64> = CoordinateMatrix::new((2, 3), MajorOrder::RowMajor);
    let err = transpose_dok(&a, &same).unwrap_err();
    assert_eq!(
        err,
        SparseError::SizeMismatch {
            expected: (3, 2),
            actual: (2, 3)
        }
    );

    let back: CoordinateMatrix<i64> = CoordinateMatrix::new((2, 3), MajorOrder::RowMajor);
    transpose_dok(&t, &back).unwrap();
    assert_eq!(sorted(&back), sorted(&a));
}

#[test]
fn transpose_compressed() {
    // A = [[1,0,2],[0,3,0]]
    let a: CoordinateMatrix<i64> = from_rows(&[&[1, 0, 2], &[0, 3, 0]], MajorOrder::RowMajor);

    let t = transpose_crs(&compress_crs(&a).unwrap());
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.indptr, vec![0, 1, 2, 3]);
    assert_eq!(t.indices, vec![0, 1, 0]);
    assert_eq!(t.data, vec![1, 3, 2]);

    let t = transpose_ccs(&compress_ccs(&a).unwrap());
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.indptr, vec![0, 2, 3]);
    assert_eq!(t.indices, vec![0, 2, 1]);
    assert_eq!(t.data, vec![1, 2, 3]);

    let cvs = compress_cvs(&a, MajorOrder::RowMajor).unwrap();
    let t = transpose_cvs(&cvs);
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(cvs.shape(), (2, 3));
    assert_eq!(transpose_cvs(&t), cvs);
}

#[test]
fn cvs_sum_and_difference_across_orders() {
    let (a, b) = operands();
    let a = compress_cvs(&a, MajorOrder::RowMajor).unwrap();
    let b = compress_cvs(&b, MajorOrder::ColumnMajor).unwrap();

    let sum = add_cvs(&a, &b).unwrap();
    assert_eq!(sum.order(), MajorOrder::RowMajor);
    assert_eq!(sum.data, vec![2, 4, 3]);
    assert_eq!(sum.indices, vec![vec![1], vec![2], vec![3]]);

    let diff = sub_cvs(&a, &b).unwrap();
    assert_eq!(diff.data, vec![2, -4, 3]);
    assert_eq!(diff.indices, vec![vec![0, 1], vec![2], vec![3]]);

    let back = sub_cvs(&sum, &b).unwrap();
    assert_eq!(back, a);

    let other: Cvs<i64> = Cvs::empty((3, 2), MajorOrder::RowMajor);
    assert!(add_cvs(&a, &other).is_err());
    assert!(sub_cvs(&a, &other).is_err());
}

#[test]
fn cvs_scalar_product() {
    let a: CoordinateMatrix<i64> = from_rows(&[&[1, 2], &[2, 0]], MajorOrder::RowMajor);
    let a = compress_cvs(&a, MajorOrder::RowMajor).unwrap();
    let tripled = scale_cvs(&a, 3);
    assert_eq!(tripled.data, vec![3, 6]);
    assert_eq!(tripled.indices, a.indices);
    assert_eq!(a.data, vec![1, 2]);

    let zero = scale_cvs(&a, 0);
    assert_eq!(zero.nnz(), 0);
    assert_eq!(zero.shape(), (2, 2));
}
