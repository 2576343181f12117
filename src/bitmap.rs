//! File-backed image holding a single [`PixelGrid`].

use std::path::Path;

use crate::bmp::BmpPermissiveness;
use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

/// One image, loaded from and saved to BMP files.
///
/// ```no_run
/// use bmpgrid::Bitmap;
///
/// # fn main() -> Result<(), bmpgrid::BmpError> {
/// let mut image = Bitmap::new();
/// image.open("in.bmp")?;
///
/// let mut rows = image.to_pixel_grid().into_rows();
/// rows.reverse();
/// image.from_pixel_grid(rows.into());
///
/// image.save("flipped.bmp")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Bitmap {
    pixels: PixelGrid,
    permissiveness: BmpPermissiveness,
    limits: Limits,
    encoder: EncodeRequest,
}

impl Bitmap {
    /// An empty bitmap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Permissiveness used by [`open`](Self::open).
    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Resource limits applied by [`open`](Self::open). Unlimited by
    /// default.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Encoder settings used by [`save`](Self::save).
    pub fn with_encoder(mut self, encoder: EncodeRequest) -> Self {
        self.encoder = encoder;
        self
    }

    /// Replace the image with the contents of a BMP file.
    ///
    /// On failure the image is left empty and the error is logged.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), BmpError> {
        let path = path.as_ref();
        self.pixels = PixelGrid::new();

        let decoded = std::fs::read(path).map_err(BmpError::from).and_then(|data| {
            DecodeRequest::new(&data)
                .with_limits(&self.limits)
                .with_permissiveness(self.permissiveness)
                .decode()
        });
        match decoded {
            Ok(grid) => {
                log::debug!(
                    "opened {}: {}x{}",
                    path.display(),
                    grid.width(),
                    grid.height()
                );
                self.pixels = grid;
                Ok(())
            }
            Err(err) => {
                log::warn!("{} could not be opened as a BMP: {err}", path.display());
                Err(err)
            }
        }
    }

    /// Write the image as a BMP file.
    ///
    /// Refuses, without touching the filesystem, when the image is not
    /// valid (see [`PixelGrid::validate`]).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BmpError> {
        let path = path.as_ref();
        self.encoder
            .write_to_file(&self.pixels, path)
            .inspect_err(|err| log::warn!("{} could not be saved: {err}", path.display()))
    }

    /// Whether the held grid is a valid image.
    pub fn is_image(&self) -> bool {
        self.pixels.is_image()
    }

    /// A copy of the grid, or an empty grid if it is not a valid image.
    pub fn to_pixel_grid(&self) -> PixelGrid {
        if self.is_image() {
            self.pixels.clone()
        } else {
            PixelGrid::new()
        }
    }

    /// Replace the grid without validating it.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_pixel_grid(&mut self, grid: PixelGrid) {
        self.pixels = grid;
    }

    /// The held grid, valid or not.
    pub fn pixels(&self) -> &PixelGrid {
        &self.pixels
    }
}
