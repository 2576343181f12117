//! BMP image format decoder and encoder (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`],
//! [`crate::DecodeRequest`] and [`crate::EncodeRequest`].

mod decode;
mod encode;
mod header;
mod utils;

pub use decode::BmpPermissiveness;
pub use header::{DibHeader, FileHeader, PaletteEntry};

pub(crate) use decode::{decode_bmp as decode, probe};
pub(crate) use encode::encode_bmp as encode;
pub(crate) use header::DEFAULT_RESOLUTION;
