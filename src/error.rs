use alloc::string::String;

/// Errors from BMP decoding, encoding and file operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

/// The input is not a BMP this codec can read.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("not a BMP file: magic bytes are {0:?}, expected \"BM\"")]
    BadMagic([u8; 2]),

    #[error("unsupported DIB header size {0}, expected 40")]
    UnsupportedHeader(u32),

    #[error("BMP bit depth {0} unsupported (only 1 and 24)")]
    UnsupportedDepth(u16),

    #[error("BMP compression {0} unsupported (only uncompressed)")]
    Compressed(u32),

    #[error("BMP palette entry {index} has non-zero reserved byte {reserved}")]
    BadPalette { index: usize, reserved: u8 },

    #[error("BMP planes field is {0}, expected 1")]
    BadPlanes(u16),

    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

/// The pixel grid cannot be encoded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("pixel grid is empty")]
    Empty,

    #[error("row {row} has {actual} pixels, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("pixel at row {row}, column {column} differs in kind from the first pixel")]
    MixedPixelKinds { row: usize, column: usize },

    #[error("channel value {0} outside 0..=255")]
    ChannelOutOfRange(i64),
}
