//! Indirect B-operand addressing.
//!
//! The kernel never reads B as a packed panel. At every reduction step it asks a
//! [`Gather`] for one value per output column, and the gather decides where that
//! value lives. Two geometries are provided:
//!
//! - [`OffsetTable`]: one caller-supplied byte offset per step, shared by the four
//!   column base pointers. This is what an implicit-GEMM convolution uses: the
//!   table encodes the receptive field (kernel window, stride, dilation) once.
//! - [`DenseStrided`]: offset = `step * stride_bytes`, the plain matmul case.
//!
//! Offsets are raw byte displacements and are applied without scaling. Reads are
//! unaligned-safe.

use std::marker::PhantomData;

use crate::NR;

/// Source of B values for the tile reduction.
pub trait Gather {
    /// Reads the B value for output `column` at reduction `step`.
    ///
    /// # Safety
    ///
    /// The address this gather computes for (`column`, `step`) must be valid
    /// for a 4-byte read.
    unsafe fn gather(&self, column: usize, step: usize) -> f32;

    /// Reads the B values of all columns at `step`.
    ///
    /// # Safety
    ///
    /// Same as [`Gather::gather`] for every column.
    #[inline(always)]
    unsafe fn gather_step(&self, step: usize) -> [f32; NR] {
        [
            self.gather(0, step),
            self.gather(1, step),
            self.gather(2, step),
            self.gather(3, step),
        ]
    }
}

/// Table-driven gather: `B_top[c] + offsets[step]` bytes.
#[derive(Clone, Copy, Debug)]
pub struct OffsetTable<'a> {
    b_tops: [*const f32; NR],
    offsets: *const isize,
    _offsets: PhantomData<&'a [isize]>,
}

impl<'a> OffsetTable<'a> {
    /// Builds a gather over `offsets`; the table length bounds the usable depth.
    pub fn new(b_tops: [*const f32; NR], offsets: &'a [isize]) -> Self {
        Self {
            b_tops,
            offsets: offsets.as_ptr(),
            _offsets: PhantomData,
        }
    }

    /// Builds a gather from a raw offset table.
    ///
    /// # Safety
    ///
    /// `offsets` must be valid for reads of as many entries as the depth the
    /// gather is later used with, for the whole lifetime `'a`.
    pub unsafe fn from_raw(b_tops: [*const f32; NR], offsets: *const isize) -> Self {
        Self {
            b_tops,
            offsets,
            _offsets: PhantomData,
        }
    }
}

impl Gather for OffsetTable<'_> {
    #[inline(always)]
    unsafe fn gather(&self, column: usize, step: usize) -> f32 {
        let offset = *self.offsets.add(step);
        self.b_tops[column].byte_offset(offset).read_unaligned()
    }

    #[inline(always)]
    unsafe fn gather_step(&self, step: usize) -> [f32; NR] {
        // One table lookup serves all four columns.
        let offset = *self.offsets.add(step);
        [
            self.b_tops[0].byte_offset(offset).read_unaligned(),
            self.b_tops[1].byte_offset(offset).read_unaligned(),
            self.b_tops[2].byte_offset(offset).read_unaligned(),
            self.b_tops[3].byte_offset(offset).read_unaligned(),
        ]
    }
}

/// Arithmetic-progression gather: `B_top[c] + step * stride_bytes` bytes.
#[derive(Clone, Copy, Debug)]
pub struct DenseStrided {
    b_tops: [*const f32; NR],
    stride_bytes: isize,
}

impl DenseStrided {
    /// Gather whose steps are `stride_bytes` apart in every column.
    pub fn new(b_tops: [*const f32; NR], stride_bytes: isize) -> Self {
        Self {
            b_tops,
            stride_bytes,
        }
    }

    /// Gather over row-major B where each column starts at `b_tops[c]` and
    /// consecutive steps are `row_stride` elements apart.
    pub fn from_element_stride(b_tops: [*const f32; NR], row_stride: isize) -> Self {
        Self::new(b_tops, row_stride * std::mem::size_of::<f32>() as isize)
    }
}

impl Gather for DenseStrided {
    #[inline(always)]
    unsafe fn gather(&self, column: usize, step: usize) -> f32 {
        self.b_tops[column]
            .byte_offset(step as isize * self.stride_bytes)
            .read_unaligned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_table_applies_bytes_unscaled() {
        let b = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let base = b.as_ptr();
        let tops = [base, unsafe { base.add(1) }, unsafe { base.add(2) }, unsafe { base.add(3) }];
        let offsets = [0isize, 16, 4];
        let gather = OffsetTable::new(tops, &offsets);

        unsafe {
            assert_eq!(gather.gather_step(0), [0.0, 1.0, 2.0, 3.0]);
            assert_eq!(gather.gather_step(1), [4.0, 5.0, 6.0, 7.0]);
            assert_eq!(gather.gather(2, 2), 3.0);
        }
    }

    #[test]
    fn test_offset_table_negative_offsets() {
        let b = [10.0f32, 20.0, 30.0, 40.0];
        let top = unsafe { b.as_ptr().add(3) };
        let offsets = [-12isize];
        let gather = OffsetTable::new([top; NR], &offsets);

        assert_eq!(unsafe { gather.gather_step(0) }, [10.0; NR]);
    }

    #[test]
    fn test_dense_strided_matches_row_major() {
        // 3x4 row-major B, one column per b_top.
        let b: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let base = b.as_ptr();
        let tops = [0, 1, 2, 3].map(|c| unsafe { base.add(c) });
        let gather = DenseStrided::from_element_stride(tops, 4);

        for step in 0..3 {
            for column in 0..NR {
                assert_eq!(
                    unsafe { gather.gather(column, step) },
                    b[step * 4 + column]
                );
            }
        }
    }

    #[test]
    fn test_dense_and_table_agree() {
        let b: Vec<f32> = (0..40).map(|i| (i * 7 % 13) as f32).collect();
        let base = b.as_ptr();
        let tops = [0, 2, 4, 6].map(|c| unsafe { base.add(c) });
        let offsets: Vec<isize> = (0..4).map(|i| i * 32).collect();

        let table = OffsetTable::new(tops, &offsets);
        let dense = DenseStrided::new(tops, 32);

        for step in 0..4 {
            assert_eq!(unsafe { table.gather_step(step) }, unsafe {
                dense.gather_step(step)
            });
        }
    }
}
