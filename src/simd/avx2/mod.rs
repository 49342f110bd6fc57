//! AVX2 SIMD implementation of the tile kernel.
//!
//! Compiled on every x86/x86_64 target. Whether it may run is decided at runtime
//! by [`Backend::detect`](crate::Backend::detect), which requires both the
//! `avx2` and `fma` CPU features.
//!
//! # Available Types
//!
//! - [`f32x8::F32x8`]: 256-bit vector containing 8 packed single-precision values

pub mod f32x8;

pub(crate) mod kernels;
