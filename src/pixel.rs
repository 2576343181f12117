use alloc::vec::Vec;

use crate::error::ValidationError;

/// One pixel of a [`PixelGrid`].
///
/// A grid holds pixels of a single kind: `Mono` pixels encode as a 1-bit
/// BMP, `Rgb` pixels as a 24-bit BMP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pixel {
    /// Monochrome pixel; `true` is palette entry 1 (white).
    Mono(bool),
    /// Truecolor pixel as (red, green, blue).
    Rgb(u8, u8, u8),
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::Mono(false);
    pub const WHITE: Pixel = Pixel::Mono(true);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Pixel::Rgb(red, green, blue)
    }

    /// Build an `Rgb` pixel from wide integer channels.
    ///
    /// Returns [`ValidationError::ChannelOutOfRange`] for the first channel
    /// outside `0..=255`.
    pub fn try_rgb(red: i64, green: i64, blue: i64) -> Result<Self, ValidationError> {
        let channel = |v: i64| u8::try_from(v).map_err(|_| ValidationError::ChannelOutOfRange(v));
        Ok(Pixel::Rgb(channel(red)?, channel(green)?, channel(blue)?))
    }

    /// The bit depth this pixel encodes at.
    pub const fn depth(self) -> BitDepth {
        match self {
            Pixel::Mono(_) => BitDepth::Mono,
            Pixel::Rgb(..) => BitDepth::Rgb24,
        }
    }

    /// (red, green, blue) of this pixel. Mono pixels map through the
    /// black/white palette the encoder writes.
    pub const fn channels(self) -> (u8, u8, u8) {
        match self {
            Pixel::Mono(false) => (0, 0, 0),
            Pixel::Mono(true) => (255, 255, 255),
            Pixel::Rgb(r, g, b) => (r, g, b),
        }
    }

    #[cfg(feature = "rgb")]
    pub fn to_rgb8(self) -> rgb::RGB8 {
        let (r, g, b) = self.channels();
        rgb::RGB8::new(r, g, b)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Pixel {
    fn from(p: rgb::RGB8) -> Self {
        Pixel::Rgb(p.r, p.g, p.b)
    }
}

/// Supported BMP bit depths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 1 bit per pixel with a 2-entry palette.
    Mono,
    /// 24 bits per pixel, stored blue, green, red.
    Rgb24,
}

impl BitDepth {
    pub const fn bits_per_pixel(self) -> u16 {
        match self {
            Self::Mono => 1,
            Self::Rgb24 => 24,
        }
    }

    pub const fn from_bits_per_pixel(bpp: u16) -> Option<Self> {
        match bpp {
            1 => Some(Self::Mono),
            24 => Some(Self::Rgb24),
            _ => None,
        }
    }

    /// The pixel a zero-filled row decodes to.
    pub const fn zero_pixel(self) -> Pixel {
        match self {
            Self::Mono => Pixel::BLACK,
            Self::Rgb24 => Pixel::Rgb(0, 0, 0),
        }
    }

    /// Number of color table entries stored after the DIB header.
    pub const fn palette_len(self) -> usize {
        match self {
            Self::Mono => 2,
            Self::Rgb24 => 0,
        }
    }

    /// Bytes of pixel data in a row, before padding: `ceil(width * bpp / 8)`.
    pub fn row_bytes(self, width: usize) -> Option<usize> {
        match self {
            Self::Mono => Some(width.div_ceil(8)),
            Self::Rgb24 => width.checked_mul(3),
        }
    }

    /// Row length in the file: [`row_bytes`](Self::row_bytes) rounded up to
    /// a multiple of 4.
    pub fn row_stride(self, width: usize) -> Option<usize> {
        self.row_bytes(width)
            .and_then(|r| r.checked_add(3))
            .map(|r| r & !3)
    }
}

/// Rows of pixels, top row first.
///
/// Construction never validates; [`validate`](Self::validate) checks that
/// the grid is a non-empty rectangle of one pixel kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelGrid {
    rows: Vec<Vec<Pixel>>,
}

impl PixelGrid {
    /// An empty grid ("no image").
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Self {
        Self { rows }
    }

    /// Build a `width` x `height` grid from `f(x, y)`.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Pixel,
    ) -> Self {
        let rows = (0..height)
            .map(|y| (0..width).map(|x| f(x, y)).collect::<Vec<_>>())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Pixel>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Pixel>> {
        self.rows
    }

    /// Length of the first row, or 0 when there are no rows.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Check the grid can be encoded, returning the depth it encodes at.
    pub fn validate(&self) -> Result<BitDepth, ValidationError> {
        let first = self
            .rows
            .first()
            .and_then(|row| row.first())
            .ok_or(ValidationError::Empty)?;
        let depth = first.depth();
        let width = self.width();

        for (row, pixels) in self.rows.iter().enumerate() {
            if pixels.len() != width {
                return Err(ValidationError::NotRectangular {
                    row,
                    expected: width,
                    actual: pixels.len(),
                });
            }
            if let Some(column) = pixels.iter().position(|p| p.depth() != depth) {
                return Err(ValidationError::MixedPixelKinds { row, column });
            }
        }
        Ok(depth)
    }

    /// Whether the grid is a non-empty rectangle of one pixel kind.
    pub fn is_image(&self) -> bool {
        self.validate().is_ok()
    }

    /// Flatten into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> Result<imgref::ImgVec<Pixel>, ValidationError> {
        self.validate()?;
        Ok(imgref::ImgVec::new(
            self.rows.concat(),
            self.width(),
            self.height(),
        ))
    }

    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, Pixel>) -> Self {
        img.rows().map(<[Pixel]>::to_vec).collect()
    }
}

impl From<Vec<Vec<Pixel>>> for PixelGrid {
    fn from(rows: Vec<Vec<Pixel>>) -> Self {
        Self::from_rows(rows)
    }
}

impl FromIterator<Vec<Pixel>> for PixelGrid {
    fn from_iter<I: IntoIterator<Item = Vec<Pixel>>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
