//! NEON 4-lane f32 vector.
//!
//! `F32x4` wraps a 128-bit `float32x4_t`. The tile kernel keeps each output
//! column as two of these, one per row-half.

use std::arch::aarch64::*;

use crate::simd::{SimdFma, SimdLoad, SimdStore};

pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 32-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub elements: float32x4_t,
}

impl SimdLoad<f32> for F32x4 {
    type Output = Self;

    #[inline(always)]
    unsafe fn zeros() -> Self::Output {
        Self {
            elements: vdupq_n_f32(0.0),
        }
    }

    /// Creates a new vector with all elements set to the same value.
    #[inline(always)]
    unsafe fn splat(value: f32) -> Self::Output {
        Self {
            elements: vdupq_n_f32(value),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: vld1q_f32(ptr),
        }
    }
}

impl SimdStore<f32> for F32x4 {
    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        vst1q_f32(ptr, self.elements);
    }

    #[inline(always)]
    unsafe fn store_strided_at(&self, ptr: *mut f32, stride: isize) {
        ptr.write(vgetq_lane_f32(self.elements, 0));
        ptr.offset(stride).write(vgetq_lane_f32(self.elements, 1));
        ptr.offset(2 * stride).write(vgetq_lane_f32(self.elements, 2));
        ptr.offset(3 * stride).write(vgetq_lane_f32(self.elements, 3));
    }
}

impl SimdFma for F32x4 {
    type Output = Self;

    /// `self + a * b` via `vfmaq_f32`.
    #[inline(always)]
    unsafe fn fma(&self, a: Self, b: Self) -> Self::Output {
        Self {
            elements: vfmaq_f32(self.elements, a.elements, b.elements),
        }
    }
}
