//! The 8×4 tile kernel body, written once over a column abstraction.
//!
//! A call runs three phases:
//!
//! 1. **Init**: the accumulator tile is set to exact zero, also when `k == 0`.
//! 2. **Reduce**: for each of the `k` steps, one packed 8-value A slice is loaded
//!    and the gather yields one B value per column. Each column accumulator
//!    receives `A[step][0..8] * broadcast(b[column])`.
//! 3. **Store**: the 32 values overwrite the destination at
//!    `c + row * rsc + column * csc` (element strides).
//!
//! The accumulator is an explicit `[C; NR]` array. How a column's 8 rows are held
//! depends on the vector width: one [`F32x8`](crate::simd::avx2::f32x8::F32x8) on
//! AVX2, or a [`RowHalves`] pair of 4-lane vectors (rows 0–3 and 4–7) elsewhere.

use crate::{
    gather::Gather,
    simd::{SimdFma, SimdLoad, SimdStore},
    MR, NR,
};

/// Eight f32 rows of one output column.
pub(crate) trait TileColumn: Copy {
    unsafe fn zeros() -> Self;

    /// Loads the 8 values of one packed A depth-slice.
    unsafe fn load_rows(ptr: *const f32) -> Self;

    unsafe fn splat(value: f32) -> Self;

    /// Returns `self + a * b`.
    unsafe fn fma(self, a: Self, b: Self) -> Self;

    /// Writes row `r` to `ptr.offset(r * rsc)`.
    unsafe fn store_rows(&self, ptr: *mut f32, rsc: isize);
}

/// A column split across two 4-lane vectors: rows 0–3 in `lo`, rows 4–7 in `hi`.
#[derive(Copy, Clone, Debug)]
pub(crate) struct RowHalves<V> {
    lo: V,
    hi: V,
}

impl<V> TileColumn for RowHalves<V>
where
    V: SimdLoad<f32, Output = V> + SimdStore<f32> + SimdFma<Output = V> + Copy,
{
    #[inline(always)]
    unsafe fn zeros() -> Self {
        Self {
            lo: V::zeros(),
            hi: V::zeros(),
        }
    }

    #[inline(always)]
    unsafe fn load_rows(ptr: *const f32) -> Self {
        Self {
            lo: V::load_unaligned(ptr),
            hi: V::load_unaligned(ptr.add(V::LANES)),
        }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        let v = V::splat(value);
        Self { lo: v, hi: v }
    }

    #[inline(always)]
    unsafe fn fma(self, a: Self, b: Self) -> Self {
        Self {
            lo: self.lo.fma(a.lo, b.lo),
            hi: self.hi.fma(a.hi, b.hi),
        }
    }

    #[inline(always)]
    unsafe fn store_rows(&self, ptr: *mut f32, rsc: isize) {
        let hi_ptr = ptr.offset(V::LANES as isize * rsc);
        if rsc == 1 {
            self.lo.store_unaligned_at(ptr);
            self.hi.store_unaligned_at(hi_ptr);
        } else {
            self.lo.store_strided_at(ptr, rsc);
            self.hi.store_strided_at(hi_ptr, rsc);
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl TileColumn for crate::simd::avx2::f32x8::F32x8 {
    #[inline(always)]
    unsafe fn zeros() -> Self {
        <Self as SimdLoad<f32>>::zeros()
    }

    #[inline(always)]
    unsafe fn load_rows(ptr: *const f32) -> Self {
        <Self as SimdLoad<f32>>::load_unaligned(ptr)
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        <Self as SimdLoad<f32>>::splat(value)
    }

    #[inline(always)]
    unsafe fn fma(self, a: Self, b: Self) -> Self {
        SimdFma::fma(&self, a, b)
    }

    #[inline(always)]
    unsafe fn store_rows(&self, ptr: *mut f32, rsc: isize) {
        if rsc == 1 {
            self.store_unaligned_at(ptr);
        } else {
            self.store_strided_at(ptr, rsc);
        }
    }
}

/// Computes one 8×4 tile and overwrites it into `c`.
///
/// Instantiated by each backend inside a function compiled for its instruction
/// set; everything here is `#[inline(always)]` so the loop is generated with
/// those features.
///
/// # Safety
///
/// - `a` points to at least `MR * k` readable f32 values
/// - `gather` yields valid addresses for every column and every step in `0..k`
/// - `c.offset(r * rsc + col * csc)` is writable for `r < MR`, `col < NR`
/// - the backend's instruction set is available on the running CPU
#[inline(always)]
pub(crate) unsafe fn kernel_8x4<C, G>(
    k: usize,
    a: *const f32,
    gather: &G,
    c: *mut f32,
    rsc: isize,
    csc: isize,
) where
    C: TileColumn,
    G: Gather + ?Sized,
{
    let mut tile = [C::zeros(); NR];

    for step in 0..k {
        let a_rows = C::load_rows(a.add(step * MR));
        let b = gather.gather_step(step);

        tile[0] = tile[0].fma(a_rows, C::splat(b[0]));
        tile[1] = tile[1].fma(a_rows, C::splat(b[1]));
        tile[2] = tile[2].fma(a_rows, C::splat(b[2]));
        tile[3] = tile[3].fma(a_rows, C::splat(b[3]));
    }

    for (column, acc) in tile.iter().enumerate() {
        acc.store_rows(c.offset(column as isize * csc), rsc);
    }
}
