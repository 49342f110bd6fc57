//! Runtime selection of the tile kernel implementation.
//!
//! CPU features are probed once with the `std::arch` detection macros and the
//! result is cached for the life of the process.

use std::{fmt, sync::OnceLock};

use crate::{
    gather::Gather,
    kernel::{kernel_8x4, RowHalves},
    simd::scalar::F32x4,
};

/// Instruction set used to run the tile kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// 256-bit AVX2 with fused multiply-add (x86/x86_64).
    Avx2Fma,
    /// 128-bit Advanced SIMD (aarch64).
    Neon,
    /// Portable code, bit-identical to the SIMD backends.
    Scalar,
}

static CURRENT: OnceLock<Backend> = OnceLock::new();

impl Backend {
    /// Every backend, fastest first.
    pub const ALL: [Backend; 3] = [Backend::Avx2Fma, Backend::Neon, Backend::Scalar];

    /// Probes the running CPU and returns the fastest usable backend.
    pub fn detect() -> Backend {
        Backend::ALL
            .into_iter()
            .find(|backend| backend.is_available())
            .unwrap_or(Backend::Scalar)
    }

    /// The backend used by [`compute_tile_8x4`](crate::compute_tile_8x4), detected on first use.
    pub fn current() -> Backend {
        *CURRENT.get_or_init(|| {
            let backend = Backend::detect();
            log::debug!("igemm: using {backend} tile kernel");
            backend
        })
    }

    /// Whether this backend can run on the current CPU.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Avx2Fma => avx2_fma_detected(),
            Backend::Neon => cfg!(target_arch = "aarch64"),
            Backend::Scalar => true,
        }
    }

    /// Short lowercase name, as used in log lines and benchmark ids.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Avx2Fma => "avx2+fma",
            Backend::Neon => "neon",
            Backend::Scalar => "scalar",
        }
    }

    /// Returns `self` if it can run here, otherwise [`Backend::Scalar`].
    pub(crate) fn resolve(self) -> Backend {
        if self.is_available() {
            self
        } else {
            log::warn!("igemm: {self} tile kernel unavailable on this CPU, using scalar");
            Backend::Scalar
        }
    }

    /// Runs the tile kernel on this backend.
    ///
    /// # Safety
    ///
    /// The backend must be available (see [`Backend::resolve`]) and the kernel
    /// preconditions documented on [`crate::compute_tile_8x4_with`] must hold.
    #[inline]
    pub(crate) unsafe fn run<G: Gather + ?Sized>(
        self,
        k: usize,
        a: *const f32,
        gather: &G,
        c: *mut f32,
        rsc: isize,
        csc: isize,
    ) {
        match self {
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Avx2Fma => {
                crate::simd::avx2::kernels::kernel_8x4_avx2(k, a, gather, c, rsc, csc)
            }
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => crate::simd::neon::kernels::kernel_8x4_neon(k, a, gather, c, rsc, csc),
            _ => kernel_8x4::<RowHalves<F32x4>, G>(k, a, gather, c, rsc, csc),
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn avx2_fma_detected() -> bool {
    is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn avx2_fma_detected() -> bool {
    false
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
