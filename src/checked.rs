//! Validating entry points over slices and `ndarray` views.
//!
//! These turn every precondition of [`compute_tile_8x4`] into a
//! [`TileError`] before the unchecked kernel runs. Validation walks the whole
//! offset table, so it costs `O(k)` on top of the kernel itself; drivers that
//! already guarantee their geometry call the raw entry point instead.

use ndarray::ArrayViewMut2;

use crate::{
    compute_tile_8x4,
    error::{destination_error, gather_error, Result, TileError},
    MR, NR,
};

const F32_BYTES: usize = std::mem::size_of::<f32>();

/// The four B source buffers, one per output column.
///
/// Each buffer's first element is that column's B-top; offsets are measured in
/// bytes from there.
#[derive(Clone, Copy, Debug)]
pub struct TileSources<'a> {
    columns: [&'a [f32]; NR],
}

impl<'a> TileSources<'a> {
    /// One buffer per output column, in column order.
    pub fn new(columns: [&'a [f32]; NR]) -> Self {
        Self { columns }
    }

    /// Uses one buffer for all four columns, e.g. a single input tensor read
    /// at four different output positions by the offset table.
    pub fn shared(source: &'a [f32]) -> Self {
        Self {
            columns: [source; NR],
        }
    }

    fn b_tops(&self) -> [*const f32; NR] {
        self.columns.map(<[f32]>::as_ptr)
    }
}

/// Checks the A-panel length, the offset table length and every gather.
fn validate_inputs(
    k: usize,
    a_panel: &[f32],
    sources: &TileSources<'_>,
    offsets: &[isize],
) -> Result<()> {
    let required = k.saturating_mul(MR);
    if a_panel.len() < required {
        return Err(TileError::PanelTooShort {
            depth: k,
            required,
            actual: a_panel.len(),
        });
    }

    if offsets.len() < k {
        return Err(TileError::OffsetTableTooShort {
            depth: k,
            actual: offsets.len(),
        });
    }

    for (step, &offset) in offsets[..k].iter().enumerate() {
        for (column, source) in sources.columns.iter().enumerate() {
            let in_bounds = usize::try_from(offset)
                .ok()
                .and_then(|start| start.checked_add(F32_BYTES))
                .is_some_and(|end| end <= source.len() * F32_BYTES);
            if !in_bounds {
                return Err(gather_error(column, step, offset, source.len()));
            }
        }
    }

    Ok(())
}

/// Checks that all 32 write-back indices fall inside `0..len`.
fn validate_destination(len: usize, rsc: isize, csc: isize) -> Result<()> {
    for row in 0..MR {
        for column in 0..NR {
            let index = (row as isize)
                .checked_mul(rsc)
                .zip((column as isize).checked_mul(csc))
                .and_then(|(r, c)| r.checked_add(c));

            match index {
                Some(index) if index >= 0 && (index as usize) < len => {}
                Some(index) => return Err(destination_error(row, column, index, len)),
                None => return Err(destination_error(row, column, isize::MAX, len)),
            }
        }
    }
    Ok(())
}

/// Checked version of [`compute_tile_8x4`] over slices.
///
/// `dest` is addressed from its first element: cell (`row`, `col`) lands at
/// `dest[row * rsc + col * csc]`. On error nothing is written.
pub fn compute_tile_8x4_checked(
    k: usize,
    a_panel: &[f32],
    sources: &TileSources<'_>,
    offsets: &[isize],
    dest: &mut [f32],
    rsc: isize,
    csc: isize,
) -> Result<()> {
    validate_inputs(k, a_panel, sources, offsets)?;
    validate_destination(dest.len(), rsc, csc)?;

    // SAFETY: A, offsets, every gather and every destination index were checked
    // above; `dest` is a unique borrow so it cannot alias the inputs.
    unsafe {
        compute_tile_8x4(
            k,
            a_panel.as_ptr(),
            &sources.b_tops(),
            offsets.as_ptr(),
            dest.as_mut_ptr(),
            rsc,
            csc,
        );
    }
    Ok(())
}

/// Computes a tile into an 8×4 `ndarray` view, whatever its memory layout.
///
/// Row and column strides are taken from the view, so row-major, column-major,
/// transposed and step-sliced views all work.
pub fn compute_tile_into(
    k: usize,
    a_panel: &[f32],
    sources: &TileSources<'_>,
    offsets: &[isize],
    mut dest: ArrayViewMut2<'_, f32>,
) -> Result<()> {
    if dest.dim() != (MR, NR) {
        return Err(TileError::ShapeMismatch {
            expected: (MR, NR),
            actual: dest.dim(),
        });
    }
    validate_inputs(k, a_panel, sources, offsets)?;

    let (rsc, csc) = (dest.strides()[0], dest.strides()[1]);

    // SAFETY: inputs were validated; an 8x4 view guarantees every
    // `ptr + row * rsc + col * csc` is an element it owns exclusively.
    unsafe {
        compute_tile_8x4(
            k,
            a_panel.as_ptr(),
            &sources.b_tops(),
            offsets.as_ptr(),
            dest.as_mut_ptr(),
            rsc,
            csc,
        );
    }
    Ok(())
}
