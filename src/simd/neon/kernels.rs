//! NEON entry point for the 8×4 tile kernel.
//!
//! A 128-bit register holds 4 rows, so each column is split into two row-halves
//! and the accumulator is eight `F32x4` values.

use crate::{
    gather::Gather,
    kernel::{kernel_8x4, RowHalves},
    simd::neon::f32x4::F32x4,
};

/// NEON microkernel for an 8×4 tile with indirect B addressing.
///
/// # Safety
///
/// - `a` points to `8 * k` readable f32 values (packed depth-major A)
/// - `gather` yields valid addresses for every column and step in `0..k`
/// - `c.offset(row * rsc + col * csc)` is writable for `row < 8`, `col < 4`
#[target_feature(enable = "neon")]
pub(crate) unsafe fn kernel_8x4_neon<G: Gather + ?Sized>(
    k: usize,
    a: *const f32,
    gather: &G,
    c: *mut f32,
    rsc: isize,
    csc: isize,
) {
    kernel_8x4::<RowHalves<F32x4>, G>(k, a, gather, c, rsc, csc)
}
