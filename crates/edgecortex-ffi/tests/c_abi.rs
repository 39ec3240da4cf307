//! Integration test: drive the C ABI the way a foreign caller would,
//! staging matrices inside an arena obtained through `ec_arena_data`.

use edgecortex_ffi::{
    ec_arena_allocate_aligned, ec_arena_create, ec_arena_data, ec_arena_destroy, ec_gemm_naive,
    ec_gemm_tiled, EcStatus,
};
use edgecortex_test_utils::{check_allclose, random_matrix, GEMM_TOLERANCE};
use proptest::prelude::*;

const OK: i32 = EcStatus::Ok as i32;

/// Allocate room for `len` f32s in the arena and copy `src` in.
#[allow(unsafe_code)]
fn stage(handle: u64, base: *mut u8, src: &[f32]) -> *mut f32 {
    let mut offset = 0usize;
    let status = ec_arena_allocate_aligned(handle, std::mem::size_of_val(src), 64, &mut offset);
    assert_eq!(status, OK);
    // SAFETY: offset..offset+bytes lies inside the arena buffer, which
    // outlives this test, and nothing else writes to that range.
    unsafe {
        let dst = base.add(offset).cast::<f32>();
        std::ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len());
        dst
    }
}

#[test]
#[allow(unsafe_code)]
fn gemm_over_arena_memory() {
    let (m, k, n) = (24, 17, 9);
    let a = random_matrix(m, k, 1);
    let b = random_matrix(k, n, 2);

    let mut handle = 0u64;
    assert_eq!(ec_arena_create(64 * 1024, &mut handle), OK);
    let mut base: *mut u8 = std::ptr::null_mut();
    let mut len = 0usize;
    assert_eq!(ec_arena_data(handle, &mut base, &mut len), OK);

    let pa = stage(handle, base, &a);
    let pb = stage(handle, base, &b);
    let pn = stage(handle, base, &vec![0.0; m * n]);
    let pt = stage(handle, base, &vec![f32::NAN; m * n]);

    assert_eq!(ec_gemm_naive(pa, m, k, pb, k, n, pn, m, n), OK);
    assert_eq!(ec_gemm_tiled(pa, m, k, pb, k, n, pt, m, n, 5), OK);

    // SAFETY: both ranges were staged above and the arena is still alive.
    let (naive, tiled) = unsafe {
        (
            std::slice::from_raw_parts(pn, m * n),
            std::slice::from_raw_parts(pt, m * n),
        )
    };
    assert!(check_allclose(tiled, naive, n, GEMM_TOLERANCE).is_ok());
    assert_eq!(ec_arena_destroy(handle), OK);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn tiled_matches_naive_through_abi(
        m in 1usize..24,
        k in 1usize..24,
        n in 1usize..24,
        block_size in 1usize..30,
        seed in any::<u64>(),
    ) {
        let a = random_matrix(m, k, seed);
        let b = random_matrix(k, n, seed ^ 0x5555);
        let mut naive = vec![0.0f32; m * n];
        let mut tiled = vec![0.0f32; m * n];
        prop_assert_eq!(
            ec_gemm_naive(a.as_ptr(), m, k, b.as_ptr(), k, n, naive.as_mut_ptr(), m, n),
            OK
        );
        prop_assert_eq!(
            ec_gemm_tiled(a.as_ptr(), m, k, b.as_ptr(), k, n, tiled.as_mut_ptr(), m, n, block_size),
            OK
        );
        prop_assert!(check_allclose(&tiled, &naive, n, GEMM_TOLERANCE).is_ok());
    }
}
