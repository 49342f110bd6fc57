//! AVX2 + FMA entry point for the 8×4 tile kernel.
//!
//! Each output column's 8 rows fit one 256-bit register, so the accumulator is
//! four `F32x8` values and each reduction step issues four `vfmadd` on a single
//! A load.

use crate::{gather::Gather, kernel::kernel_8x4, simd::avx2::f32x8::F32x8};

/// AVX2 microkernel for an 8×4 tile with indirect B addressing.
///
/// # Safety
///
/// - CPU supports AVX2 and FMA
/// - `a` points to `8 * k` readable f32 values (packed depth-major A)
/// - `gather` yields valid addresses for every column and step in `0..k`
/// - `c.offset(row * rsc + col * csc)` is writable for `row < 8`, `col < 4`
#[target_feature(enable = "avx2,fma")]
pub(crate) unsafe fn kernel_8x4_avx2<G: Gather + ?Sized>(
    k: usize,
    a: *const f32,
    gather: &G,
    c: *mut f32,
    rsc: isize,
    csc: isize,
) {
    kernel_8x4::<F32x8, G>(k, a, gather, c, rsc, csc)
}
