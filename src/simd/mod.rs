//! Instruction-set specific vectors and kernel entry points.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx2;

#[cfg(target_arch = "aarch64")]
pub mod neon;

pub mod scalar;

pub mod traits;

pub use traits::{SimdFma, SimdLoad, SimdStore};
