//! Integration test: tiled and naive kernels agree with each other and
//! with the f64 reference on random inputs.

use edgecortex_kernels::{gemm_naive, gemm_tiled, GemmKernel, MatMul, MatrixMut, MatrixRef};
use edgecortex_test_utils::{
    assert_allclose, check_allclose, random_matrix, random_square, reference_matmul,
    GEMM_TOLERANCE,
};
use proptest::prelude::*;

#[test]
fn n256_block32_matches_naive_and_reference() {
    let n = 256;
    let a = random_square(n, 0xA);
    let b = random_square(n, 0xB);
    let av = MatrixRef::square(&a, n).unwrap();
    let bv = MatrixRef::square(&b, n).unwrap();

    let mut naive = vec![0.0f32; n * n];
    let mut tiled = vec![0.0f32; n * n];
    gemm_naive(av, bv, &mut MatrixMut::square(&mut naive, n).unwrap()).unwrap();
    gemm_tiled(av, bv, &mut MatrixMut::square(&mut tiled, n).unwrap(), 32).unwrap();

    let reference = reference_matmul(av, bv);
    assert_allclose(&tiled, &naive, n, GEMM_TOLERANCE);
    assert_allclose(&naive, &reference, n, GEMM_TOLERANCE);
    assert_allclose(&tiled, &reference, n, GEMM_TOLERANCE);
}

#[test]
fn repeated_calls_are_idempotent() {
    let n = 48;
    let a = random_square(n, 1);
    let b = random_square(n, 2);
    let av = MatrixRef::square(&a, n).unwrap();
    let bv = MatrixRef::square(&b, n).unwrap();
    let mut c = vec![0.0f32; n * n];
    let mut cv = MatrixMut::square(&mut c, n).unwrap();

    gemm_tiled(av, bv, &mut cv, 16).unwrap();
    let first = cv.as_slice().to_vec();
    gemm_tiled(av, bv, &mut cv, 16).unwrap();
    assert_eq!(cv.as_slice(), first.as_slice());
}

#[test]
fn kernel_selector_respects_contract() {
    let n = 70;
    let a = random_square(n, 3);
    let b = random_square(n, 4);
    let av = MatrixRef::square(&a, n).unwrap();
    let bv = MatrixRef::square(&b, n).unwrap();
    let reference = reference_matmul(av, bv);

    for bs in [None, Some(1), Some(7), Some(32), Some(70), Some(1000)] {
        let kernel = GemmKernel::for_block_size(bs, n).unwrap();
        let mut c = vec![f32::NAN; n * n];
        kernel
            .multiply(av, bv, &mut MatrixMut::square(&mut c, n).unwrap())
            .unwrap();
        if let Err(e) = check_allclose(&c, &reference, n, GEMM_TOLERANCE) {
            panic!("block size {bs:?} ({}): {e}", kernel.name());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn tiled_equals_naive_for_any_shape_and_block(
        m in 0usize..40,
        k in 0usize..40,
        n in 0usize..40,
        block_size in 1usize..48,
        seed in any::<u64>(),
    ) {
        let a = random_matrix(m, k, seed);
        let b = random_matrix(k, n, seed.wrapping_add(1));
        let av = MatrixRef::new(&a, m, k).unwrap();
        let bv = MatrixRef::new(&b, k, n).unwrap();

        // Guard elements after the destination catch out-of-bounds writes.
        let mut naive = vec![0.0f32; m * n];
        let mut tiled = vec![f32::NAN; m * n + 8];
        gemm_naive(av, bv, &mut MatrixMut::new(&mut naive, m, n).unwrap()).unwrap();
        gemm_tiled(av, bv, &mut MatrixMut::new(&mut tiled, m, n).unwrap(), block_size).unwrap();

        prop_assert!(check_allclose(&tiled[..m * n], &naive, n.max(1), GEMM_TOLERANCE).is_ok());
        prop_assert!(tiled[m * n..].iter().all(|v| v.is_nan()));
        let reference = reference_matmul(av, bv);
        prop_assert!(check_allclose(&tiled[..m * n], &reference, n.max(1), GEMM_TOLERANCE).is_ok());
    }

    #[test]
    fn mismatched_inner_dimension_is_rejected(
        m in 1usize..8,
        k in 1usize..8,
        k2 in 1usize..8,
        n in 1usize..8,
        block_size in 1usize..8,
    ) {
        prop_assume!(k != k2);
        let a = vec![1.0f32; m * k];
        let b = vec![1.0f32; k2 * n];
        let mut c = vec![5.0f32; m * n];
        let av = MatrixRef::new(&a, m, k).unwrap();
        let bv = MatrixRef::new(&b, k2, n).unwrap();
        let mut cv = MatrixMut::new(&mut c, m, n).unwrap();
        prop_assert!(gemm_naive(av, bv, &mut cv).is_err());
        prop_assert!(gemm_tiled(av, bv, &mut cv, block_size).is_err());
        prop_assert!(c.iter().all(|&v| v == 5.0));
    }
}
