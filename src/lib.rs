//! # bmpgrid
//!
//! BMP decoder and encoder for 1-bit monochrome and 24-bit truecolor images,
//! working on a row-major [`PixelGrid`] whose row 0 is the top of the image.
//!
//! ## Supported Formats
//!
//! - Uncompressed BMP with a 40-byte `BITMAPINFOHEADER`
//! - 1 bit per pixel with a 2-entry color table, decoded to [`Pixel::Mono`]
//! - 24 bits per pixel (BGR), decoded to [`Pixel::Rgb`]
//! - Bottom-up (positive height) and top-down (negative height) row order
//!
//! The encoder always writes bottom-up rows with a positive height, a
//! black/white palette for 1-bit images and 4-byte row padding.
//!
//! ## Non-Goals
//!
//! - Other bit depths (4, 8, 16, 32), RLE and bitfield compression
//! - OS/2 and V4/V5 headers (accepted only by [`BmpPermissiveness::Permissive`])
//! - Streaming or partial decode
//!
//! ## Usage
//!
//! ```
//! use bmpgrid::{Pixel, PixelGrid, decode_bmp, encode_bmp};
//!
//! let grid = PixelGrid::from_fn(10, 4, |x, y| Pixel::Mono((x + y) % 2 == 0));
//! let bytes = encode_bmp(&grid)?;
//! assert_eq!(&bytes[..2], b"BM");
//!
//! let decoded = decode_bmp(&bytes)?;
//! assert_eq!(decoded, grid);
//! # Ok::<(), bmpgrid::BmpError>(())
//! ```
//!
//! [`Bitmap`] wraps one grid with `open`/`save` file operations.

#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod bmp;
mod error;
mod info;
mod limits;
mod pixel;

mod decode;
mod encode;

use alloc::vec::Vec;

// Re-exports
pub use bitmap::Bitmap;
pub use bmp::{BmpPermissiveness, DibHeader, FileHeader, PaletteEntry};
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use error::{BmpError, FormatError, ValidationError};
pub use info::BmpInfo;
pub use limits::Limits;
pub use pixel::{BitDepth, Pixel, PixelGrid};

/// Decode BMP bytes with default settings.
pub fn decode_bmp(data: &[u8]) -> Result<PixelGrid, BmpError> {
    DecodeRequest::new(data).decode()
}

/// Encode a grid as BMP with default settings.
pub fn encode_bmp(grid: &PixelGrid) -> Result<Vec<u8>, BmpError> {
    EncodeRequest::new().encode(grid)
}

/// Whether `grid` is a non-empty rectangle of one pixel kind.
pub fn is_image(grid: &PixelGrid) -> bool {
    grid.is_image()
}
