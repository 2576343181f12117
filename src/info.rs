use crate::bmp::{self, BmpPermissiveness, DibHeader, FileHeader, PaletteEntry};
use crate::error::BmpError;
use crate::pixel::BitDepth;

/// Everything in a BMP file before the pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub file: FileHeader,
    pub dib: DibHeader,
    /// The 2-entry color table of a 1-bit image.
    pub palette: Option<[PaletteEntry; 2]>,
    pub depth: BitDepth,
    pub width: u32,
    /// Absolute value of the stored height.
    pub height: u32,
    /// Rows are stored bottom row first (positive stored height).
    pub bottom_up: bool,
}

impl BmpInfo {
    /// Probe BMP headers without decoding pixels.
    ///
    /// Uses [`BmpPermissiveness::Permissive`] so probing does not reject
    /// files before the caller has chosen a permissiveness level.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        bmp::probe(data, BmpPermissiveness::Permissive)
    }
}
