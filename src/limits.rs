use alloc::vec::Vec;

use crate::error::BmpError;
use crate::pixel::Pixel;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for the decoded grid, row headers included.
    pub max_memory_bytes: Option<u64>,
}

/// Bytes a decoded `width` x `height` grid occupies: the pixels plus one
/// `Vec` per row. `None` on overflow.
pub(crate) fn grid_memory_bytes(width: u32, height: u32) -> Option<u64> {
    let pixel = core::mem::size_of::<Pixel>() as u64;
    let row = core::mem::size_of::<Vec<Pixel>>() as u64;
    let per_row = u64::from(width).checked_mul(pixel)?.checked_add(row)?;
    per_row.checked_mul(u64::from(height))
}

fn exceeded(what: &str, value: u64, max: u64) -> BmpError {
    BmpError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
}

impl Limits {
    /// Check a `width` x `height` grid of [`Pixel`] against every limit.
    pub(crate) fn check_grid(&self, width: u32, height: u32) -> Result<(), BmpError> {
        let pixels = u64::from(width) * u64::from(height);
        let checks = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
        ];
        for (what, value, max) in checks {
            match max {
                Some(max) if value > max => return Err(exceeded(what, value, max)),
                _ => {}
            }
        }

        if let Some(max_mem) = self.max_memory_bytes {
            let bytes = grid_memory_bytes(width, height).unwrap_or(u64::MAX);
            if bytes > max_mem {
                return Err(exceeded("grid size in bytes", bytes, max_mem));
            }
        }
        Ok(())
    }
}
