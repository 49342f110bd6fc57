//! Indirect 8×4 f32 FMA micro-kernel.
//!
//! `igemm` computes one 8-row × 4-column f32 output tile as
//!
//! ```text
//! tile[r][c] = Σ_{i<k} A[i][r] * *(B_top[c] + offsets[i])
//! ```
//!
//! where `A` is a packed depth-major panel (8 values per step) and B values are
//! gathered through four per-column base pointers and one shared table of byte
//! offsets. The indirection lets the same kernel serve a plain blocked matmul
//! (offsets in arithmetic progression) and an implicit-GEMM convolution (offsets
//! describing a receptive field, no im2col buffer). The tile always *overwrites*
//! its destination.
//!
//! Packing A, building offset tables, blocking and threading are the caller's
//! job. This crate is only the leaf primitive such a driver calls repeatedly.
//!
//! # Entry points
//!
//! - [`compute_tile_8x4`]: raw, unchecked, table-driven. The hot path.
//! - [`compute_tile_8x4_with`]: raw, generic over any [`Gather`].
//! - [`compute_tile_8x4_checked`] / [`compute_tile_into`]: validate slices (or an
//!   `ndarray` view) and return [`TileError`] instead of invoking undefined behavior.
//!
//! # Example
//!
//! ```rust
//! use igemm::{compute_tile_8x4_checked, TileSources, MR, NR};
//!
//! // two depth steps: all-ones then all-twos
//! let a = [[1.0f32; MR], [2.0f32; MR]].concat();
//! let (b0, b1, b2, b3) = ([10.0f32], [20.0f32], [30.0f32], [40.0f32]);
//! let sources = TileSources::new([&b0, &b1, &b2, &b3]);
//! let mut c = [0.0f32; MR * NR];
//!
//! compute_tile_8x4_checked(2, &a, &sources, &[0, 0], &mut c, NR as isize, 1).unwrap();
//! assert_eq!(&c[..NR], &[30.0, 60.0, 90.0, 120.0]);
//! ```

pub mod backend;
pub mod checked;
pub mod error;
pub mod gather;
pub(crate) mod kernel;
pub mod simd;

pub use backend::Backend;
pub use checked::{compute_tile_8x4_checked, compute_tile_into, TileSources};
pub use error::{Result, TileError};
pub use gather::{DenseStrided, Gather, OffsetTable};

/// Rows of the output tile.
pub const MR: usize = 8;
/// Columns of the output tile.
pub const NR: usize = 4;

/// Computes an 8×4 tile with table-driven B addressing and overwrites it into `c`.
///
/// Step `i` reads column `col`'s B value from `b_tops[col]` displaced by
/// `*b_offsets.add(i)` **bytes**. Cell (`row`, `col`) is written to
/// `c.offset(row * rsc + col * csc)`; strides are in elements and may be zero or
/// negative. With `k == 0` all 32 cells receive `0.0`.
///
/// # Safety
///
/// Nothing is checked; violating any of these is undefined behavior:
/// - `a` points to at least `8 * k` readable f32 values
/// - `b_offsets` points to at least `k` readable offsets
/// - every `b_tops[col] + b_offsets[i]` (bytes) is readable as an f32, for `i < k`
/// - the 32 destination addresses are valid f32 writes and do not overlap the inputs
pub unsafe fn compute_tile_8x4(
    k: usize,
    a: *const f32,
    b_tops: &[*const f32; NR],
    b_offsets: *const isize,
    c: *mut f32,
    rsc: isize,
    csc: isize,
) {
    let gather = OffsetTable::from_raw(*b_tops, b_offsets);
    compute_tile_8x4_with(k, a, &gather, c, rsc, csc)
}

/// Computes an 8×4 tile using any [`Gather`] for B and overwrites it into `c`.
///
/// # Safety
///
/// - `a` points to at least `8 * k` readable f32 values
/// - `gather` computes readable addresses for every column and every step `< k`
/// - `c.offset(row * rsc + col * csc)` is a valid f32 write for `row < 8`, `col < 4`
pub unsafe fn compute_tile_8x4_with<G: Gather + ?Sized>(
    k: usize,
    a: *const f32,
    gather: &G,
    c: *mut f32,
    rsc: isize,
    csc: isize,
) {
    Backend::current().run(k, a, gather, c, rsc, csc)
}

/// Like [`compute_tile_8x4_with`] but on a caller-chosen backend.
///
/// A backend the CPU cannot run is replaced by [`Backend::Scalar`]. All backends
/// produce bit-identical tiles.
///
/// # Safety
///
/// Same as [`compute_tile_8x4_with`].
pub unsafe fn compute_tile_8x4_on<G: Gather + ?Sized>(
    backend: Backend,
    k: usize,
    a: *const f32,
    gather: &G,
    c: *mut f32,
    rsc: isize,
    csc: isize,
) {
    backend.resolve().run(k, a, gather, c, rsc, csc)
}
