//! BMP encoder: uncompressed 1-bit and 24-bit BMP.

use alloc::vec::Vec;

use super::header::{header_for_grid, write_header};
use super::utils::{pack_bgr_row, pack_mono_row};
use crate::error::BmpError;
use crate::pixel::{BitDepth, PixelGrid};

/// Encode a grid to BMP at the depth its pixels imply.
///
/// Rows are written bottom row first with a positive height.
pub(crate) fn encode_bmp(grid: &PixelGrid, resolution: (i32, i32)) -> Result<Vec<u8>, BmpError> {
    let depth = grid.validate()?;
    let width = grid.width();
    let info = header_for_grid(width, grid.height(), depth, resolution)?;

    // header_for_grid already checked these fit
    let row_bytes = depth.row_bytes(width).unwrap_or_default();
    let row_stride = depth.row_stride(width).unwrap_or_default();
    let pad_bytes = row_stride - row_bytes;

    let mut out = Vec::with_capacity(info.file.file_size as usize);
    write_header(&mut out, &info);

    for row in grid.rows().iter().rev() {
        match depth {
            BitDepth::Mono => pack_mono_row(row, &mut out),
            BitDepth::Rgb24 => pack_bgr_row(row, &mut out),
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    log::debug!(
        "encoded {}x{} {}-bit BMP, {} bytes",
        info.width,
        info.height,
        depth.bits_per_pixel(),
        out.len()
    );
    Ok(out)
}
