//! Portable fallback vector.
//!
//! Used on targets without a dedicated backend. Lanes are plain `f32`s and the
//! multiply-add goes through [`f32::mul_add`], so results are bit-identical to
//! the hardware FMA backends.

use crate::simd::{SimdFma, SimdLoad, SimdStore};

pub const LANE_COUNT: usize = 4;

/// Four f32 lanes held in an array.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct F32x4 {
    pub elements: [f32; LANE_COUNT],
}

impl SimdLoad<f32> for F32x4 {
    type Output = Self;

    #[inline(always)]
    unsafe fn zeros() -> Self::Output {
        Self {
            elements: [0.0; LANE_COUNT],
        }
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self::Output {
        Self {
            elements: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        Self {
            elements: ptr.cast::<[f32; LANE_COUNT]>().read_unaligned(),
        }
    }
}

impl SimdStore<f32> for F32x4 {
    const LANES: usize = LANE_COUNT;

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        ptr.cast::<[f32; LANE_COUNT]>().write_unaligned(self.elements);
    }

    #[inline(always)]
    unsafe fn store_strided_at(&self, ptr: *mut f32, stride: isize) {
        for (i, value) in self.elements.iter().enumerate() {
            ptr.offset(i as isize * stride).write(*value);
        }
    }
}

impl SimdFma for F32x4 {
    type Output = Self;

    #[inline(always)]
    unsafe fn fma(&self, a: Self, b: Self) -> Self::Output {
        let mut elements = self.elements;
        for (lane, acc) in elements.iter_mut().enumerate() {
            *acc = a.elements[lane].mul_add(b.elements[lane], *acc);
        }
        Self { elements }
    }
}
