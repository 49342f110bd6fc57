//! Error types for the checked tile entry points.
//!
//! The raw kernel trusts its caller and never fails. These errors are produced
//! only by the validating wrappers in [`crate::checked`], which turn the kernel's
//! preconditions into descriptive failures before any memory is touched.

use std::fmt;

/// Errors reported when tile inputs do not satisfy the kernel preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    /// The packed A-panel holds fewer than `8 * depth` values.
    PanelTooShort {
        /// Requested reduction depth.
        depth: usize,
        /// Number of f32 values needed.
        required: usize,
        /// Number of f32 values provided.
        actual: usize,
    },
    /// The offset table holds fewer than `depth` entries.
    OffsetTableTooShort {
        /// Requested reduction depth.
        depth: usize,
        /// Number of offsets provided.
        actual: usize,
    },
    /// A gathered B value would be read outside its source buffer.
    GatherOutOfBounds {
        /// Output column whose source buffer is overrun.
        column: usize,
        /// Reduction step that produced the offset.
        step: usize,
        /// Byte displacement from the column's base pointer.
        byte_offset: isize,
        /// Length of the source buffer, in f32 elements.
        source_len: usize,
    },
    /// A write-back address falls outside the destination buffer.
    DestinationOutOfBounds {
        /// Tile row of the offending cell.
        row: usize,
        /// Tile column of the offending cell.
        column: usize,
        /// Element index computed from the strides.
        index: isize,
        /// Length of the destination buffer, in f32 elements.
        len: usize,
    },
    /// The destination view does not have the 8×4 tile shape.
    ShapeMismatch {
        /// Required `(rows, columns)`.
        expected: (usize, usize),
        /// Shape of the view that was provided.
        actual: (usize, usize),
    },
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::PanelTooShort {
                depth,
                required,
                actual,
            } => write!(
                f,
                "Packed A-panel too short for depth {}: need {} values, got {}",
                depth, required, actual
            ),
            TileError::OffsetTableTooShort { depth, actual } => write!(
                f,
                "Offset table too short for depth {}: got {} offsets",
                depth, actual
            ),
            TileError::GatherOutOfBounds {
                column,
                step,
                byte_offset,
                source_len,
            } => write!(
                f,
                "Gather out of bounds: column {} step {} reads byte offset {} of a {}-element source",
                column, step, byte_offset, source_len
            ),
            TileError::DestinationOutOfBounds {
                row,
                column,
                index,
                len,
            } => write!(
                f,
                "Destination out of bounds: cell ({}, {}) maps to index {} of a {}-element buffer",
                row, column, index, len
            ),
            TileError::ShapeMismatch { expected, actual } => write!(
                f,
                "Destination shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
        }
    }
}

impl std::error::Error for TileError {}

/// Result type alias for checked tile operations.
pub type Result<T> = std::result::Result<T, TileError>;

/// Creates a gather error for `column` at `step`.
pub fn gather_error(
    column: usize,
    step: usize,
    byte_offset: isize,
    source_len: usize,
) -> TileError {
    TileError::GatherOutOfBounds {
        column,
        step,
        byte_offset,
        source_len,
    }
}

/// Creates a write-back error for the cell at (`row`, `column`).
pub fn destination_error(row: usize, column: usize, index: isize, len: usize) -> TileError {
    TileError::DestinationOutOfBounds {
        row,
        column,
        index,
        len,
    }
}
