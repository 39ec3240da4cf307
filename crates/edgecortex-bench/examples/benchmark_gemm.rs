//! Naive vs tiled GEMM timing harness.
//!
//! Times both kernels at N=256 and N=512, prints the speedup, and checks
//! the tiled result against an f64 reference. Set `RUST_LOG=debug` to see
//! kernel dispatch events.

use std::process::ExitCode;

use edgecortex_bench::compare_default;
use edgecortex_test_utils::GEMM_TOLERANCE;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== EdgeCortex GEMM Benchmark ===\n");

    let mut all_passed = true;
    for n in [256, 512] {
        let cmp = match compare_default(n, 42, 3) {
            Ok(cmp) => cmp,
            Err(e) => {
                tracing::error!(n, error = %e, "benchmark failed");
                return ExitCode::FAILURE;
            }
        };
        println!("N = {n} (block size {})", cmp.block_size);
        println!("  naive: {:>10.3} ms", cmp.naive.as_secs_f64() * 1e3);
        println!("  tiled: {:>10.3} ms", cmp.tiled.as_secs_f64() * 1e3);
        println!("  speedup: {:.2}x", cmp.speedup());
        let verdict = if cmp.passed() { "PASS" } else { "FAIL" };
        println!(
            "  verify: {verdict} (max diff {:.3e}, tolerance {GEMM_TOLERANCE:.0e})\n",
            cmp.max_abs_diff
        );
        all_passed &= cmp.passed();
    }

    if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
