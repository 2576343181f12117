use bmpgrid::*;

const BLACK: [u8; 4] = [0, 0, 0, 0];
const WHITE: [u8; 4] = [255, 255, 255, 0];

/// Hand-built uncompressed BMP with a 40-byte DIB header.
#[derive(Default)]
struct RawBmp<'a> {
    width: i32,
    height: i32,
    bpp: u16,
    palette: &'a [[u8; 4]],
    pixels: &'a [u8],
    /// Zero bytes appended to the DIB header (header_size = 40 + extra).
    header_extra: usize,
    /// Zero bytes between the color table and the pixel data.
    gap: usize,
}

impl RawBmp<'_> {
    fn build(&self) -> Vec<u8> {
        let offset = 54 + self.header_extra + self.palette.len() * 4 + self.gap;
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&((offset + self.pixels.len()) as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        out.extend_from_slice(&(40 + self.header_extra as u32).to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bpp.to_le_bytes());
        out.extend_from_slice(&[0; 24]); // compression .. important colors
        out.resize(out.len() + self.header_extra, 0);
        for entry in self.palette {
            out.extend_from_slice(entry);
        }
        out.resize(out.len() + self.gap, 0);
        out.extend_from_slice(self.pixels);
        out
    }
}

fn mono_bits(grid: &PixelGrid) -> Vec<Vec<u8>> {
    grid.rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|p| u8::from(*p == Pixel::Mono(true)))
                .collect()
        })
        .collect()
}

fn rgb_2x3_rows() -> [[u8; 8]; 3] {
    // Each row: two BGR pixels and 2 padding bytes, top row first.
    [
        [0, 0, 255, 0, 255, 0, 0, 0],
        [255, 0, 0, 10, 20, 30, 0, 0],
        [1, 2, 3, 4, 5, 6, 0, 0],
    ]
}

fn rgb_2x3_grid() -> PixelGrid {
    PixelGrid::from_rows(vec![
        vec![Pixel::rgb(255, 0, 0), Pixel::rgb(0, 255, 0)],
        vec![Pixel::rgb(0, 0, 255), Pixel::rgb(30, 20, 10)],
        vec![Pixel::rgb(3, 2, 1), Pixel::rgb(6, 5, 4)],
    ])
}

// ── Round-trips ─────────────────────────────────────────────────────

#[test]
fn bmp_roundtrip_rgb24() {
    let grid = PixelGrid::from_fn(5, 3, |x, y| {
        Pixel::rgb((x * 50) as u8, (y * 80) as u8, (x * y) as u8)
    });
    let encoded = encode_bmp(&grid).unwrap();
    assert_eq!(&encoded[0..2], b"BM");
    // 5 * 3 = 15 bytes per row, padded to 16
    assert_eq!(encoded.len(), 54 + 16 * 3);

    let decoded = decode_bmp(&encoded).unwrap();
    assert_eq!(decoded, grid);
}

#[test]
fn bmp_roundtrip_mono() {
    let grid = PixelGrid::from_fn(200, 200, |x, _| Pixel::Mono(x % 2 == 1));
    let encoded = encode_bmp(&grid).unwrap();
    // 200 bits = 25 bytes, padded to 28
    assert_eq!(encoded.len(), 62 + 28 * 200);

    let decoded = decode_bmp(&encoded).unwrap();
    assert_eq!(decoded, grid);
}

#[test]
fn mono_rows_are_padded_to_four_bytes() {
    let mut state: u32 = 0x1234_5678;
    for width in 1..=40usize {
        let height = 3;
        let grid = PixelGrid::from_fn(width, height, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            Pixel::Mono(state & 1 == 1)
        });
        let encoded = encode_bmp(&grid).unwrap();

        let row_bytes = width.div_ceil(8);
        let stride = row_bytes.div_ceil(4) * 4;
        assert_eq!(encoded.len(), 62 + stride * height, "width {width}");
        for row in encoded[62..].chunks_exact(stride) {
            assert!(row[row_bytes..].iter().all(|&b| b == 0), "width {width}");
            let used_bits = width % 8;
            if used_bits != 0 {
                let last = row[row_bytes - 1];
                assert_eq!(last & (0xff >> used_bits), 0, "width {width}");
            }
        }
        assert_eq!(decode_bmp(&encoded).unwrap(), grid, "width {width}");
    }
}

#[test]
fn encoder_writes_bottom_row_first() {
    let grid = PixelGrid::from_rows(vec![
        vec![Pixel::rgb(255, 0, 0)],
        vec![Pixel::rgb(0, 0, 255)],
    ]);
    let encoded = encode_bmp(&grid).unwrap();
    assert_eq!(&encoded[22..26], &2i32.to_le_bytes());
    assert_eq!(&encoded[54..58], &[255, 0, 0, 0]); // bottom: blue as BGR
    assert_eq!(&encoded[58..62], &[0, 0, 255, 0]); // top: red as BGR
}

#[test]
fn encoder_writes_black_white_palette() {
    let grid = PixelGrid::from_fn(1, 1, |_, _| Pixel::WHITE);
    let encoded = EncodeRequest::new()
        .with_resolution(200, 300)
        .encode(&grid)
        .unwrap();
    assert_eq!(&encoded[10..14], &62u32.to_le_bytes());
    assert_eq!(&encoded[38..42], &200i32.to_le_bytes());
    assert_eq!(&encoded[42..46], &300i32.to_le_bytes());
    assert_eq!(&encoded[54..62], &[0, 0, 0, 0, 255, 255, 255, 0]);
    assert_eq!(&encoded[62..66], &[0x80, 0, 0, 0]);
}

// ── Pixel layout ────────────────────────────────────────────────────

#[test]
fn mono_bits_are_msb_first() {
    let data = RawBmp {
        width: 10,
        height: 1,
        bpp: 1,
        palette: &[BLACK, WHITE],
        pixels: &[0b1011_0000, 0b0100_0000, 0, 0],
        ..Default::default()
    }
    .build();
    let grid = decode_bmp(&data).unwrap();
    assert_eq!(mono_bits(&grid), vec![vec![1, 0, 1, 1, 0, 0, 0, 0, 0, 1]]);
}

#[test]
fn row_order_follows_height_sign() {
    let rows = rgb_2x3_rows();
    let bottom_up: Vec<u8> = rows.iter().rev().flatten().copied().collect();
    let top_down: Vec<u8> = rows.iter().flatten().copied().collect();

    let positive = RawBmp {
        width: 2,
        height: 3,
        bpp: 24,
        pixels: &bottom_up,
        ..Default::default()
    }
    .build();
    let negative = RawBmp {
        width: 2,
        height: -3,
        bpp: 24,
        pixels: &top_down,
        ..Default::default()
    }
    .build();

    let (info, from_positive) = DecodeRequest::new(&positive).decode_with_info().unwrap();
    assert!(info.bottom_up);
    let (info, from_negative) = DecodeRequest::new(&negative).decode_with_info().unwrap();
    assert!(!info.bottom_up);
    assert_eq!(info.height, 3);

    assert_eq!(from_positive, from_negative);
    assert_eq!(from_positive, rgb_2x3_grid());
}

#[test]
fn pixel_offset_is_authoritative() {
    let data = RawBmp {
        width: 3,
        height: 1,
        bpp: 1,
        palette: &[BLACK, WHITE],
        pixels: &[0b0100_0000, 0, 0, 0],
        gap: 6,
        ..Default::default()
    }
    .build();
    let grid = decode_bmp(&data).unwrap();
    assert_eq!(mono_bits(&grid), vec![vec![0, 1, 0]]);
}

#[test]
fn pixel_offset_inside_headers_is_rejected() {
    let mut data = RawBmp {
        width: 1,
        height: 1,
        bpp: 1,
        palette: &[BLACK, WHITE],
        pixels: &[0; 4],
        ..Default::default()
    }
    .build();
    data[10..14].copy_from_slice(&54u32.to_le_bytes());
    let err = decode_bmp(&data).unwrap_err();
    assert!(matches!(err, BmpError::Format(FormatError::InvalidHeader(_))));
}

// ── Header rejection and permissiveness ─────────────────────────────

fn decode_with(data: &[u8], p: BmpPermissiveness) -> Result<PixelGrid, BmpError> {
    DecodeRequest::new(data).with_permissiveness(p).decode()
}

const ALL_LEVELS: [BmpPermissiveness; 3] = [
    BmpPermissiveness::Strict,
    BmpPermissiveness::Standard,
    BmpPermissiveness::Permissive,
];

#[test]
fn bad_magic_is_rejected() {
    let mut data = encode_bmp(&rgb_2x3_grid()).unwrap();
    data[0] = b'X';
    data[1] = b'Y';
    for level in ALL_LEVELS {
        match decode_with(&data, level) {
            Err(BmpError::Format(FormatError::BadMagic(magic))) => assert_eq!(&magic, b"XY"),
            other => panic!("expected BadMagic, got {other:?}"),
        }
    }
}

#[test]
fn truncated_header_is_eof() {
    assert!(matches!(decode_bmp(b""), Err(BmpError::UnexpectedEof)));
    assert!(matches!(decode_bmp(b"BM\x00\x00"), Err(BmpError::UnexpectedEof)));
}

#[test]
fn unsupported_depth_is_fatal_at_every_level() {
    let data = RawBmp {
        width: 4,
        height: 1,
        bpp: 8,
        pixels: &[0; 4],
        ..Default::default()
    }
    .build();
    for level in ALL_LEVELS {
        match decode_with(&data, level) {
            Err(BmpError::Format(FormatError::UnsupportedDepth(8))) => {}
            other => panic!("expected UnsupportedDepth at {level:?}, got {other:?}"),
        }
    }
}

#[test]
fn compression_is_fatal_at_every_level() {
    let mut data = encode_bmp(&rgb_2x3_grid()).unwrap();
    data[30..34].copy_from_slice(&1u32.to_le_bytes());
    for level in ALL_LEVELS {
        match decode_with(&data, level) {
            Err(BmpError::Format(FormatError::Compressed(1))) => {}
            other => panic!("expected Compressed at {level:?}, got {other:?}"),
        }
    }
}

#[test]
fn extended_dib_header_only_in_permissive_mode() {
    let rows = rgb_2x3_rows();
    let bottom_up: Vec<u8> = rows.iter().rev().flatten().copied().collect();
    let data = RawBmp {
        width: 2,
        height: 3,
        bpp: 24,
        pixels: &bottom_up,
        header_extra: 68, // BITMAPV4HEADER is 108 bytes
        ..Default::default()
    }
    .build();

    assert!(matches!(
        decode_with(&data, BmpPermissiveness::Standard),
        Err(BmpError::Format(FormatError::UnsupportedHeader(108)))
    ));
    let grid = decode_with(&data, BmpPermissiveness::Permissive).unwrap();
    assert_eq!(grid, rgb_2x3_grid());
}

#[test]
fn small_dib_header_is_rejected() {
    let mut data = encode_bmp(&rgb_2x3_grid()).unwrap();
    data[14..18].copy_from_slice(&12u32.to_le_bytes());
    for level in ALL_LEVELS {
        assert!(matches!(
            decode_with(&data, level),
            Err(BmpError::Format(FormatError::UnsupportedHeader(12)))
        ));
    }
}

#[test]
fn palette_reserved_byte_policy() {
    let data = RawBmp {
        width: 2,
        height: 1,
        bpp: 1,
        palette: &[BLACK, [255, 255, 255, 7]],
        pixels: &[0b0100_0000, 0, 0, 0],
        ..Default::default()
    }
    .build();

    match decode_with(&data, BmpPermissiveness::Strict) {
        Err(BmpError::Format(FormatError::BadPalette { index, reserved })) => {
            assert_eq!((index, reserved), (1, 7));
        }
        other => panic!("expected BadPalette, got {other:?}"),
    }
    for level in [BmpPermissiveness::Standard, BmpPermissiveness::Permissive] {
        let grid = decode_with(&data, level).unwrap();
        assert_eq!(mono_bits(&grid), vec![vec![0, 1]]);
    }
}

#[test]
fn planes_other_than_one() {
    let mut data = encode_bmp(&rgb_2x3_grid()).unwrap();
    data[26..28].copy_from_slice(&2u16.to_le_bytes());
    assert!(matches!(
        decode_with(&data, BmpPermissiveness::Standard),
        Err(BmpError::Format(FormatError::BadPlanes(2)))
    ));
    assert_eq!(
        decode_with(&data, BmpPermissiveness::Permissive).unwrap(),
        rgb_2x3_grid()
    );
}

#[test]
fn zero_dimensions_are_rejected() {
    for (width, height) in [(0, 1), (1, 0), (-2, 1)] {
        let data = RawBmp {
            width,
            height,
            bpp: 24,
            ..Default::default()
        }
        .build();
        assert!(matches!(
            decode_bmp(&data),
            Err(BmpError::Format(FormatError::InvalidHeader(_)))
        ));
    }
}

#[test]
fn strict_checks_header_consistency() {
    let good = encode_bmp(&rgb_2x3_grid()).unwrap();

    let mut trailing = good.clone();
    trailing.push(0);
    assert!(decode_with(&trailing, BmpPermissiveness::Standard).is_ok());
    assert!(matches!(
        decode_with(&trailing, BmpPermissiveness::Strict),
        Err(BmpError::Format(FormatError::InvalidHeader(_)))
    ));

    let mut byte_size = good.clone();
    byte_size[34..38].copy_from_slice(&999u32.to_le_bytes());
    assert!(decode_with(&byte_size, BmpPermissiveness::Standard).is_ok());
    assert!(decode_with(&byte_size, BmpPermissiveness::Strict).is_err());

    let mut colors = good;
    colors[46..50].copy_from_slice(&16u32.to_le_bytes());
    assert!(decode_with(&colors, BmpPermissiveness::Standard).is_ok());
    assert!(decode_with(&colors, BmpPermissiveness::Strict).is_err());
}

#[test]
fn truncated_pixels_zero_filled_only_when_permissive() {
    let rows = rgb_2x3_rows();
    // Bottom-up: only the bottom row is present.
    let data = RawBmp {
        width: 2,
        height: 3,
        bpp: 24,
        pixels: &rows[2],
        ..Default::default()
    }
    .build();

    assert!(matches!(
        decode_with(&data, BmpPermissiveness::Standard),
        Err(BmpError::UnexpectedEof)
    ));
    let grid = decode_with(&data, BmpPermissiveness::Permissive).unwrap();
    assert_eq!(grid.height(), 3);
    assert_eq!(grid.rows()[0], vec![Pixel::rgb(0, 0, 0); 2]);
    assert_eq!(grid.rows()[1], vec![Pixel::rgb(0, 0, 0); 2]);
    assert_eq!(grid.rows()[2], rgb_2x3_grid().rows()[2]);
}

#[test]
fn truncated_mid_row_keeps_present_pixels() {
    let rows = rgb_2x3_rows();
    let bottom_up: Vec<u8> = rows.iter().rev().flatten().copied().collect();
    // Bottom row whole, first pixel of the middle row, nothing else.
    let data = RawBmp {
        width: 2,
        height: 3,
        bpp: 24,
        pixels: &bottom_up[..11],
        ..Default::default()
    }
    .build();

    let grid = decode_with(&data, BmpPermissiveness::Permissive).unwrap();
    let expected = rgb_2x3_grid();
    assert_eq!(grid.rows()[0], vec![Pixel::rgb(0, 0, 0); 2]);
    assert_eq!(grid.rows()[1], vec![expected.rows()[1][0], Pixel::rgb(0, 0, 0)]);
    assert_eq!(grid.rows()[2], expected.rows()[2]);
}

#[test]
fn permissive_refuses_unaddressable_grid() {
    // 62 bytes declaring i32::MAX x i32::MAX at 1 bit per pixel
    let data = RawBmp {
        width: i32::MAX,
        height: i32::MAX,
        bpp: 1,
        palette: &[BLACK, WHITE],
        ..Default::default()
    }
    .build();
    assert_eq!(data.len(), 62);

    for level in ALL_LEVELS {
        assert!(decode_with(&data, level).is_err(), "{level:?}");
    }
    match decode_with(&data, BmpPermissiveness::Permissive) {
        Err(BmpError::DimensionsTooLarge { width, height }) => {
            assert_eq!((width, height), (i32::MAX as u64, i32::MAX as u64));
        }
        other => panic!("expected DimensionsTooLarge, got {other:?}"),
    }
}

#[test]
fn permissive_truncation_respects_limits() {
    let data = RawBmp {
        width: i32::MAX,
        height: 1,
        bpp: 24,
        ..Default::default()
    }
    .build();
    let limits = Limits {
        max_memory_bytes: Some(1 << 20),
        ..Default::default()
    };
    let decoded = DecodeRequest::new(&data)
        .with_limits(&limits)
        .with_permissiveness(BmpPermissiveness::Permissive)
        .decode();
    assert!(matches!(decoded, Err(BmpError::LimitExceeded(_))));
}

#[test]
fn limits_reject_large() {
    let encoded = encode_bmp(&rgb_2x3_grid()).unwrap();

    let limits = Limits {
        max_pixels: Some(5),
        ..Default::default()
    };
    match DecodeRequest::new(&encoded).with_limits(&limits).decode() {
        Err(BmpError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    let limits = Limits {
        max_width: Some(2),
        max_height: Some(3),
        ..Default::default()
    };
    assert!(DecodeRequest::new(&encoded).with_limits(&limits).decode().is_ok());
}

// ── Encoder validation ──────────────────────────────────────────────

#[test]
fn encoder_refuses_invalid_grids() {
    let p = Pixel::WHITE;
    let cases = [
        (PixelGrid::new(), ValidationError::Empty),
        (PixelGrid::from_rows(vec![vec![]]), ValidationError::Empty),
        (
            PixelGrid::from_rows(vec![vec![p, p], vec![p]]),
            ValidationError::NotRectangular {
                row: 1,
                expected: 2,
                actual: 1,
            },
        ),
        (
            PixelGrid::from_rows(vec![vec![p, Pixel::rgb(0, 0, 0)]]),
            ValidationError::MixedPixelKinds { row: 0, column: 1 },
        ),
    ];
    for (grid, expected) in cases {
        assert!(!is_image(&grid));
        match encode_bmp(&grid) {
            Err(BmpError::Validation(err)) => assert_eq!(err, expected),
            other => panic!("expected {expected:?}, got {other:?}"),
        }
    }
}

// ── Probe ───────────────────────────────────────────────────────────

#[test]
fn probe_reports_headers() {
    let grid = PixelGrid::from_fn(9, 2, |x, _| Pixel::Mono(x == 0));
    let encoded = encode_bmp(&grid).unwrap();
    let info = BmpInfo::from_bytes(&encoded).unwrap();
    assert_eq!(info.width, 9);
    assert_eq!(info.height, 2);
    assert_eq!(info.depth, BitDepth::Mono);
    assert!(info.bottom_up);
    assert_eq!(info.file.bmp_offset, 62);
    assert_eq!(info.file.file_size as usize, encoded.len());
    assert_eq!(info.dib.bits_per_pixel, 1);
    assert_eq!(
        info.palette,
        Some([PaletteEntry::BLACK, PaletteEntry::WHITE])
    );
}
