use alloc::vec::Vec;

use crate::bmp;
use crate::error::BmpError;
use crate::pixel::PixelGrid;

/// Builder for encoding a [`PixelGrid`] as BMP.
///
/// A grid of [`Pixel::Mono`](crate::Pixel::Mono) encodes as a 1-bit BMP
/// with a black/white palette, a grid of [`Pixel::Rgb`](crate::Pixel::Rgb)
/// as 24-bit.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    hres: i32,
    vres: i32,
}

impl Default for EncodeRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self {
            hres: bmp::DEFAULT_RESOLUTION,
            vres: bmp::DEFAULT_RESOLUTION,
        }
    }

    /// Resolution in pixels per meter. Defaults to 2835 (72 DPI).
    pub fn with_resolution(mut self, hres: i32, vres: i32) -> Self {
        self.hres = hres;
        self.vres = vres;
        self
    }

    /// Encode to an in-memory BMP file.
    ///
    /// Fails with [`BmpError::Validation`] if the grid is empty, ragged or
    /// mixes pixel kinds.
    pub fn encode(&self, grid: &PixelGrid) -> Result<Vec<u8>, BmpError> {
        bmp::encode(grid, (self.hres, self.vres))
    }

    /// Encode and write to `path`.
    ///
    /// The file is encoded fully before anything is written, then written to
    /// a temporary sibling and renamed into place, so a failure never leaves
    /// a partial file at `path`. The sibling is named
    /// `<file name>.<process id>.tmp`.
    pub fn write_to_file(
        &self,
        grid: &PixelGrid,
        path: impl AsRef<std::path::Path>,
    ) -> Result<(), BmpError> {
        let path = path.as_ref();
        let encoded = self.encode(grid)?;

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(alloc::format!(".{}.tmp", std::process::id()));
        let tmp_path = path.with_file_name(tmp_name);

        let written =
            std::fs::write(&tmp_path, &encoded).and_then(|()| std::fs::rename(&tmp_path, path));
        if let Err(err) = written {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        log::debug!("wrote {} bytes to {}", encoded.len(), path.display());
        Ok(())
    }
}
