//! BMP decoder for uncompressed 1-bit and 24-bit images.

use alloc::vec::Vec;

use super::header::parse_header;
use super::utils::{unpack_bgr_row, unpack_mono_row};
use crate::error::BmpError;
use crate::info::BmpInfo;
use crate::limits::{Limits, grid_memory_bytes};
use crate::pixel::{BitDepth, PixelGrid};

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
///
/// Unsupported bit depths and compression are rejected at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Reject files that violate the BMP format even in non-critical ways.
    /// Also validates: file size field, palette count, image data size
    /// field, palette reserved bytes.
    Strict,

    /// Default behavior. Reject bad magic, DIB headers other than 40 bytes,
    /// planes != 1 and truncated pixel data. A non-zero palette reserved
    /// byte is logged and ignored.
    #[default]
    Standard,

    /// Accept as much as possible. Zero-pad truncated pixel data, read
    /// larger DIB headers as their 40-byte prefix, ignore planes.
    ///
    /// A truncated file still decodes to its full declared size, so pair
    /// this with [`Limits`] for untrusted input. Grids that cannot be
    /// allocated are reported as [`BmpError::LimitExceeded`].
    Permissive,
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Total input length.
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(BmpError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let bytes = self
            .data
            .get(self.pos..)
            .and_then(|rest| rest.first_chunk::<N>())
            .ok_or(BmpError::UnexpectedEof)?;
        self.pos += N;
        Ok(*bytes)
    }

    pub(crate) fn get_u16_le(&mut self) -> Result<u16, BmpError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, BmpError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    pub(crate) fn get_i32_le(&mut self) -> Result<i32, BmpError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

// ── Full decode ─────────────────────────────────────────────────────

/// Parse and validate the headers only.
pub(crate) fn probe(data: &[u8], permissiveness: BmpPermissiveness) -> Result<BmpInfo, BmpError> {
    parse_header(&mut Cursor::new(data), permissiveness)
}

/// Decode a BMP file into a top-row-first grid.
pub(crate) fn decode_bmp(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: BmpPermissiveness,
) -> Result<(BmpInfo, PixelGrid), BmpError> {
    let info = probe(data, permissiveness)?;
    if let Some(limits) = limits {
        limits.check_grid(info.width, info.height)?;
    }
    let grid = decode_pixels(data, &info, permissiveness)?;
    Ok((info, grid))
}

fn decode_pixels(
    data: &[u8],
    info: &BmpInfo,
    permissiveness: BmpPermissiveness,
) -> Result<PixelGrid, BmpError> {
    let width = info.width as usize;
    let height = info.height as usize;
    let too_large = || BmpError::DimensionsTooLarge {
        width: u64::from(info.width),
        height: u64::from(info.height),
    };
    let row_bytes = info.depth.row_bytes(width).ok_or_else(too_large)?;
    let stride = info.depth.row_stride(width).ok_or_else(too_large)?;
    let total = stride.checked_mul(height).ok_or_else(too_large)?;

    // The decoded grid has to be addressable before any row is allocated.
    grid_memory_bytes(info.width, info.height)
        .filter(|&bytes| bytes <= isize::MAX as u64)
        .ok_or_else(too_large)?;

    // bmp_offset is authoritative; it may leave a gap after the palette.
    let available = data.get(info.file.bmp_offset as usize..).unwrap_or(&[]);
    let pixel_data = if available.len() >= total {
        &available[..total]
    } else if permissiveness == BmpPermissiveness::Permissive {
        log::warn!(
            "BMP pixel data truncated: {} of {total} bytes present, zero-filling",
            available.len()
        );
        available
    } else {
        return Err(BmpError::UnexpectedEof);
    };

    let mut rows = try_vec_with_capacity(height)?;
    let mut file_rows = pixel_data.chunks(stride);
    for _ in 0..height {
        let mut row = try_vec_with_capacity(width)?;
        row.resize(width, info.depth.zero_pixel());
        // Missing rows, and the missing tail of a cut row, stay zero.
        if let Some(file_row) = file_rows.next() {
            let file_row = &file_row[..file_row.len().min(row_bytes)];
            match info.depth {
                BitDepth::Mono => unpack_mono_row(file_row, &mut row),
                BitDepth::Rgb24 => unpack_bgr_row(file_row, &mut row),
            }
        }
        rows.push(row);
    }

    // File order is bottom row first unless the height was negative.
    if info.bottom_up {
        rows.reverse();
    }
    Ok(PixelGrid::from_rows(rows))
}

/// Allocate up front, reporting failure instead of aborting.
fn try_vec_with_capacity<T>(len: usize) -> Result<Vec<T>, BmpError> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len).map_err(|err| {
        BmpError::LimitExceeded(alloc::format!(
            "cannot allocate {len} entries for the decoded grid: {err}"
        ))
    })?;
    Ok(vec)
}
