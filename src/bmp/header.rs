//! BMP header codec: magic, file header, 40-byte DIB header and the 1-bit
//! color table.

use alloc::vec::Vec;

use super::decode::{BmpPermissiveness, Cursor};
use crate::error::{BmpError, FormatError};
use crate::info::BmpInfo;
use crate::pixel::BitDepth;

/// Magic + file header.
pub(crate) const FILE_HEADER_SIZE: u32 = 14;
/// BITMAPINFOHEADER (Version 3).
pub(crate) const INFO_HEADER_SIZE: u32 = 40;
pub(crate) const PALETTE_ENTRY_SIZE: u32 = 4;

/// 2835 pixels per meter (72 DPI).
pub(crate) const DEFAULT_RESOLUTION: i32 = 2835;

/// The 12 bytes following the `BM` magic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileHeader {
    /// Total file size in bytes.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset from file start to pixel data.
    pub bmp_offset: u32,
}

impl FileHeader {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, BmpError> {
        Ok(Self {
            file_size: cursor.get_u32_le()?,
            reserved1: cursor.get_u16_le()?,
            reserved2: cursor.get_u16_le()?,
            bmp_offset: cursor.get_u32_le()?,
        })
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.bmp_offset.to_le_bytes());
    }
}

/// BITMAPINFOHEADER fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DibHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive: rows stored bottom-up. Negative: top-down.
    pub height: i32,
    pub num_planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Size of the pixel data; 0 means unspecified.
    pub bmp_byte_size: u32,
    pub hres: i32,
    pub vres: i32,
    pub num_colors: u32,
    pub num_important_colors: u32,
}

impl DibHeader {
    /// Reads the 40 bytes of a Version-3 header. Extensions are left to the
    /// caller.
    fn read(cursor: &mut Cursor<'_>, header_size: u32) -> Result<Self, BmpError> {
        Ok(Self {
            header_size,
            width: cursor.get_i32_le()?,
            height: cursor.get_i32_le()?,
            num_planes: cursor.get_u16_le()?,
            bits_per_pixel: cursor.get_u16_le()?,
            compression: cursor.get_u32_le()?,
            bmp_byte_size: cursor.get_u32_le()?,
            hres: cursor.get_i32_le()?,
            vres: cursor.get_i32_le()?,
            num_colors: cursor.get_u32_le()?,
            num_important_colors: cursor.get_u32_le()?,
        })
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.num_planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.bmp_byte_size.to_le_bytes());
        out.extend_from_slice(&self.hres.to_le_bytes());
        out.extend_from_slice(&self.vres.to_le_bytes());
        out.extend_from_slice(&self.num_colors.to_le_bytes());
        out.extend_from_slice(&self.num_important_colors.to_le_bytes());
    }
}

/// Color table entry, stored blue, green, red, reserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    /// Should be 0.
    pub reserved: u8,
}

impl PaletteEntry {
    pub const BLACK: PaletteEntry = PaletteEntry::gray(0);
    pub const WHITE: PaletteEntry = PaletteEntry::gray(255);

    const fn gray(v: u8) -> Self {
        Self {
            blue: v,
            green: v,
            red: v,
            reserved: 0,
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.blue, self.green, self.red, self.reserved]);
    }
}

/// Parse everything before the pixel data and validate it against
/// `permissiveness`. Leaves `cursor` after the color table.
pub(crate) fn parse_header(
    cursor: &mut Cursor<'_>,
    permissiveness: BmpPermissiveness,
) -> Result<BmpInfo, BmpError> {
    let is_strict = permissiveness == BmpPermissiveness::Strict;
    let is_permissive = permissiveness == BmpPermissiveness::Permissive;

    let magic = cursor.read_fixed_bytes::<2>()?;
    if magic != *b"BM" {
        return Err(FormatError::BadMagic(magic).into());
    }

    let file = FileHeader::read(cursor)?;

    let header_size = cursor.get_u32_le()?;
    if header_size != INFO_HEADER_SIZE {
        // Later DIB versions extend the V3 layout; bmp_offset still tells
        // us where the pixels start.
        if is_permissive && header_size > INFO_HEADER_SIZE {
            log::warn!("BMP DIB header size {header_size}, reading it as the 40-byte layout");
        } else {
            return Err(FormatError::UnsupportedHeader(header_size).into());
        }
    }
    let dib = DibHeader::read(cursor, header_size)?;

    log::trace!("Width: {}", dib.width);
    log::trace!("Height: {}", dib.height);
    log::trace!("Bit depth: {}", dib.bits_per_pixel);
    log::trace!("Compression: {}", dib.compression);
    log::trace!("Pixel offset: {}", file.bmp_offset);

    if dib.num_planes != 1 {
        if is_permissive {
            log::warn!("BMP planes field is {}, expected 1", dib.num_planes);
        } else {
            return Err(FormatError::BadPlanes(dib.num_planes).into());
        }
    }

    let depth = BitDepth::from_bits_per_pixel(dib.bits_per_pixel)
        .ok_or(FormatError::UnsupportedDepth(dib.bits_per_pixel))?;

    if dib.compression != 0 {
        return Err(FormatError::Compressed(dib.compression).into());
    }

    if dib.width <= 0 {
        return Err(invalid(alloc::format!("BMP width is {}", dib.width)));
    }
    if dib.height == 0 {
        return Err(invalid("BMP height is zero".into()));
    }
    let width = dib.width.unsigned_abs();
    let height = dib.height.unsigned_abs();

    if is_strict {
        check_strict(cursor.len(), &file, &dib, depth, width, height)?;
    }

    let palette = if depth == BitDepth::Mono {
        cursor.set_position((FILE_HEADER_SIZE as usize).saturating_add(header_size as usize))?;
        Some(read_palette(cursor, is_strict)?)
    } else {
        None
    };

    let header_end = u64::from(FILE_HEADER_SIZE)
        + u64::from(header_size)
        + u64::from(PALETTE_ENTRY_SIZE) * depth.palette_len() as u64;
    if u64::from(file.bmp_offset) < header_end {
        return Err(invalid(alloc::format!(
            "BMP pixel data offset {} overlaps the headers (end at {header_end})",
            file.bmp_offset
        )));
    }

    Ok(BmpInfo {
        file,
        dib,
        palette,
        depth,
        width,
        height,
        bottom_up: dib.height > 0,
    })
}

fn read_palette(cursor: &mut Cursor<'_>, is_strict: bool) -> Result<[PaletteEntry; 2], BmpError> {
    let mut palette = [PaletteEntry::default(); 2];
    for (index, entry) in palette.iter_mut().enumerate() {
        let [blue, green, red, reserved] = cursor.read_fixed_bytes::<4>()?;
        if reserved != 0 {
            if is_strict {
                return Err(FormatError::BadPalette { index, reserved }.into());
            }
            log::warn!("BMP palette entry {index} has reserved byte {reserved}, expected 0");
        }
        *entry = PaletteEntry {
            blue,
            green,
            red,
            reserved,
        };
    }
    Ok(palette)
}

fn check_strict(
    data_len: usize,
    file: &FileHeader,
    dib: &DibHeader,
    depth: BitDepth,
    width: u32,
    height: u32,
) -> Result<(), BmpError> {
    if file.file_size != 0 && file.file_size as usize != data_len {
        return Err(invalid(alloc::format!(
            "BMP file size field ({}) doesn't match actual size ({data_len})",
            file.file_size
        )));
    }

    let palette_len = depth.palette_len() as u32;
    if dib.num_colors != 0 && dib.num_colors != palette_len {
        return Err(invalid(alloc::format!(
            "BMP palette count ({}) invalid for {}-bit depth",
            dib.num_colors,
            dib.bits_per_pixel
        )));
    }

    if dib.bmp_byte_size != 0 {
        let expected = depth
            .row_stride(width as usize)
            .and_then(|stride| stride.checked_mul(height as usize));
        if expected != Some(dib.bmp_byte_size as usize) {
            return Err(invalid(alloc::format!(
                "BMP image data size field ({}) doesn't match expected ({expected:?})",
                dib.bmp_byte_size
            )));
        }
    }
    Ok(())
}

fn invalid(msg: alloc::string::String) -> BmpError {
    FormatError::InvalidHeader(msg).into()
}

/// Build the headers describing a `width` x `height` image at `depth`,
/// stored bottom-up.
pub(crate) fn header_for_grid(
    width: usize,
    height: usize,
    depth: BitDepth,
    resolution: (i32, i32),
) -> Result<BmpInfo, BmpError> {
    let too_large = || BmpError::DimensionsTooLarge {
        width: width as u64,
        height: height as u64,
    };
    let dib_width = i32::try_from(width).map_err(|_| too_large())?;
    let dib_height = i32::try_from(height).map_err(|_| too_large())?;

    let pixel_data_size = depth
        .row_stride(width)
        .and_then(|stride| stride.checked_mul(height))
        .and_then(|size| u32::try_from(size).ok())
        .ok_or_else(too_large)?;
    let palette_len = depth.palette_len() as u32;
    let bmp_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_ENTRY_SIZE * palette_len;
    let file_size = bmp_offset
        .checked_add(pixel_data_size)
        .ok_or_else(too_large)?;

    let file = FileHeader {
        file_size,
        reserved1: 0,
        reserved2: 0,
        bmp_offset,
    };
    let dib = DibHeader {
        header_size: INFO_HEADER_SIZE,
        width: dib_width,
        height: dib_height,
        num_planes: 1,
        bits_per_pixel: depth.bits_per_pixel(),
        compression: 0,
        bmp_byte_size: pixel_data_size,
        hres: resolution.0,
        vres: resolution.1,
        num_colors: palette_len,
        num_important_colors: 0,
    };
    let palette = (depth == BitDepth::Mono).then_some([PaletteEntry::BLACK, PaletteEntry::WHITE]);

    Ok(BmpInfo {
        file,
        dib,
        palette,
        depth,
        width: width as u32,
        height: height as u32,
        bottom_up: true,
    })
}

/// Emit magic, file header, DIB header and color table.
pub(crate) fn write_header(out: &mut Vec<u8>, info: &BmpInfo) {
    info.file.write(out);
    info.dib.write(out);
    if let Some(palette) = &info.palette {
        for entry in palette {
            entry.write(out);
        }
    }
}
