//! ARM NEON implementation of the tile kernel.
//!
//! NEON is part of the AArch64 baseline, so this backend is always available on
//! `aarch64` targets.
//!
//! # Available Types
//!
//! - [`f32x4::F32x4`]: 128-bit vector containing 4 packed single-precision values

pub mod f32x4;

pub(crate) mod kernels;
