//! Vector traits shared by every backend.
//!
//! Each backend wraps its native register type (`__m256`, `float32x4_t`, or a
//! plain array) and implements these traits, so the tile kernel can be written
//! once and instantiated per instruction set.

/// Creating and loading vectors.
pub trait SimdLoad<T> {
    type Output;

    /// Returns a vector with every lane set to exact zero.
    ///
    /// # Safety
    ///
    /// The backend's instruction set must be available on the running CPU.
    unsafe fn zeros() -> Self::Output;

    /// Broadcasts `value` into every lane.
    ///
    /// # Safety
    ///
    /// The backend's instruction set must be available on the running CPU.
    unsafe fn splat(value: T) -> Self::Output;

    /// Loads a full vector from memory with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `LANES` readable values.
    unsafe fn load_unaligned(ptr: *const T) -> Self::Output;
}

/// Writing vectors back to memory.
pub trait SimdStore<T> {
    /// Number of lanes in the vector.
    const LANES: usize;

    /// Stores every lane contiguously with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `LANES` writable values.
    unsafe fn store_unaligned_at(&self, ptr: *mut T);

    /// Stores lane `i` at `ptr.offset(i * stride)`, one element at a time.
    ///
    /// # Safety
    ///
    /// Every computed address must be valid for a write of one `T`.
    unsafe fn store_strided_at(&self, ptr: *mut T, stride: isize);
}

/// Fused multiply-add.
pub trait SimdFma {
    type Output;

    /// Returns `self + a * b` rounded once per lane.
    ///
    /// # Safety
    ///
    /// The backend's instruction set must be available on the running CPU.
    unsafe fn fma(&self, a: Self, b: Self) -> Self::Output;
}
