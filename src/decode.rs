use crate::bmp::{self, BmpPermissiveness};
use crate::error::BmpError;
use crate::info::BmpInfo;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

/// Builder for decoding a BMP file held in memory.
///
/// ```
/// use bmpgrid::{BmpPermissiveness, DecodeRequest, Limits};
///
/// # fn main() -> Result<(), bmpgrid::BmpError> {
/// # let data = bmpgrid::encode_bmp(&bmpgrid::PixelGrid::from_fn(2, 2, |_, _| bmpgrid::Pixel::WHITE))?;
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let grid = DecodeRequest::new(&data)
///     .with_limits(&limits)
///     .with_permissiveness(BmpPermissiveness::Strict)
///     .decode()?;
/// assert_eq!(grid.width(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Decode into a grid whose row 0 is the top of the image.
    pub fn decode(self) -> Result<PixelGrid, BmpError> {
        self.decode_with_info().map(|(_, grid)| grid)
    }

    /// Decode, also returning the parsed headers.
    pub fn decode_with_info(self) -> Result<(BmpInfo, PixelGrid), BmpError> {
        bmp::decode(self.data, self.limits, self.permissiveness)
    }
}
