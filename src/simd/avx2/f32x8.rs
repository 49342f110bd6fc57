//! AVX2 8-lane f32 vector.
//!
//! `F32x8` wraps a 256-bit `__m256` register. In the tile kernel one `F32x8`
//! holds all 8 rows of a single output column, so the 8×4 accumulator is four
//! registers.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: AVX2 and FMA (Intel Haswell / AMD Excavator and later)
//! - **Target Architecture**: x86 or x86_64
//! - **Compilation**: methods are `#[inline(always)]` and are meant to be inlined
//!   into a caller compiled with `#[target_feature(enable = "avx2,fma")]`

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::{SimdFma, SimdLoad, SimdStore};

/// Number of f32 elements that fit in an AVX2 256-bit vector.
pub(crate) const LANE_COUNT: usize = 8;

/// AVX2 SIMD vector containing 8 packed f32 values.
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    /// AVX2 256-bit vector register containing 8 packed f32 values
    pub elements: __m256,
}

impl SimdLoad<f32> for F32x8 {
    type Output = Self;

    #[inline(always)]
    unsafe fn zeros() -> Self::Output {
        Self {
            elements: _mm256_setzero_ps(),
        }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self::Output {
        Self {
            elements: _mm256_set1_ps(value),
        }
    }

    /// Loads 8 elements from unaligned memory with `_mm256_loadu_ps`.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 valid f32 values.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }
}

impl SimdStore<f32> for F32x8 {
    const LANES: usize = LANE_COUNT;

    /// Stores 8 elements to unaligned memory with `_mm256_storeu_ps`.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 valid f32 memory locations.
    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm256_storeu_ps(ptr, self.elements)
    }

    /// Scatters the 8 lanes with single-element stores.
    ///
    /// The register is spilled once and each lane is written individually,
    /// since AVX2 has no scatter instruction.
    #[inline(always)]
    unsafe fn store_strided_at(&self, ptr: *mut f32, stride: isize) {
        let mut lanes = [0.0f32; LANE_COUNT];
        _mm256_storeu_ps(lanes.as_mut_ptr(), self.elements);

        for (i, value) in lanes.iter().enumerate() {
            ptr.offset(i as isize * stride).write(*value);
        }
    }
}

impl SimdFma for F32x8 {
    type Output = Self;

    /// `self + a * b` via `_mm256_fmadd_ps`.
    #[inline(always)]
    unsafe fn fma(&self, a: Self, b: Self) -> Self::Output {
        Self {
            elements: _mm256_fmadd_ps(a.elements, b.elements, self.elements),
        }
    }
}
