#![allow(non_snake_case)]
use crate::algebra::*;

// A = [ D  S ]    keys: rows ("r1", "r2"), cols ("x", "y")
//     [ 0  2I]
fn test_block_matrix() -> BlockMatrix<f64> {
    let mut A = BlockMatrix::new();
    A.insert("r1", "x", LinearMap::Dense(Matrix::from(&[[1., 2.], [3., 4.]])))
        .unwrap();
    A.insert(
        "r1",
        "y",
        LinearMap::Sparse(CscMatrix::from(&Matrix::from(&[[0., 1.], [5., 0.]]))),
    )
    .unwrap();
    A.insert("r2", "y", LinearMap::Scalar { n: 2, alpha: 2. })
        .unwrap();
    A
}

fn xvec() -> BlockVector<f64> {
    [
        ("x".to_string(), vec![1., -1.]),
        ("y".to_string(), vec![2., 3.]),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_block_apply() {
    let A = test_block_matrix();
    let y = A.apply(&xvec()).unwrap();

    // r1 = [1 2; 3 4][1; -1] + [0 1; 5 0][2; 3] = [-1; -1] + [3; 10]
    assert_eq!(y.get("r1").unwrap(), &[2., 9.]);
    assert_eq!(y.get("r2").unwrap(), &[4., 6.]);

    // absent input keys contribute nothing, but every row is present
    let mut x = BlockVector::new();
    x.insert("x", vec![1., 0.]);
    let y = A.apply(&x).unwrap();
    assert_eq!(y.get("r1").unwrap(), &[1., 3.]);
    assert_eq!(y.get("r2").unwrap(), &[0., 0.]);

    // wrong input length
    let mut x = BlockVector::new();
    x.insert("y", vec![1.]);
    assert!(matches!(
        A.apply(&x),
        Err(BlockError::DimensionMismatch { expected: 2, actual: 1, .. })
    ));
}

#[test]
fn test_block_add() {
    let A = test_block_matrix();
    let mut B = BlockMatrix::new();
    B.insert("r1", "x", LinearMap::identity(2)).unwrap();
    B.insert("r2", "x", LinearMap::Diagonal(vec![1., 2.])).unwrap();

    let C = A.add(&B).unwrap();
    assert_eq!(C.num_blocks(), 4);
    assert_eq!(
        C.get("r1", "x").unwrap().as_dense(),
        Matrix::from(&[[2., 2.], [3., 5.]])
    );
    assert_eq!(C.get("r2", "x"), Some(&LinearMap::Diagonal(vec![1., 2.])));
    assert_eq!(C.get("r2", "y"), A.get("r2", "y"));

    // a block of the wrong shape for an existing key
    let mut B = BlockMatrix::new();
    B.insert("r1", "x", LinearMap::identity(3)).unwrap();
    assert!(A.add(&B).is_err());
}

#[test]
fn test_block_mul_matches_apply() {
    let A = test_block_matrix();
    let At = A.transpose();

    // (A' A) x == A' (A x)
    let AtA = At.mul(&A).unwrap();
    let lhs = AtA.apply(&xvec()).unwrap();
    let rhs = At.apply(&A.apply(&xvec()).unwrap()).unwrap();
    assert!(lhs.norm_inf_diff(&rhs).unwrap() < 1e-14);

    // A' A couples x and y through r1 only
    assert_eq!(AtA.num_blocks(), 4);
    assert_eq!(AtA.row_keys().collect::<Vec<_>>(), vec!["x", "y"]);

    // A A' has a single r2 x r2 block from the scalar
    let AAt = A.mul(&At).unwrap();
    assert_eq!(
        AAt.get("r2", "r2"),
        Some(&LinearMap::Scalar { n: 2, alpha: 4. })
    );
}

#[test]
fn test_block_mul_mismatched_inner_dims() {
    let mut A = BlockMatrix::<f64>::new();
    A.insert("r", "x", LinearMap::Dense(Matrix::zeros((1, 2))))
        .unwrap();
    let mut B = BlockMatrix::<f64>::new();
    B.insert("x", "c", LinearMap::Dense(Matrix::zeros((3, 1))))
        .unwrap();

    assert!(matches!(
        A.mul(&B),
        Err(BlockError::LinearMap { row, col, .. }) if row == "r" && col == "c"
    ));
}

#[test]
fn test_block_identity_inverse() {
    let I = BlockMatrix::<f64>::identity([("x", 2), ("y", 2)]);
    assert_eq!(I.inverse().unwrap(), I);
    assert_eq!(I.apply(&xvec()).unwrap().get("x").unwrap(), &[1., -1.]);
}
