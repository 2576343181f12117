//! Row packing for 1-bit and 24-bit pixel data.
//!
//! Operates on the unpadded part of a row; callers handle the padding.

use alloc::vec::Vec;

use crate::pixel::Pixel;

/// Expand a packed 1-bit row into `out`, most significant bit first.
///
/// `input` normally holds `ceil(out.len() / 8)` bytes. The unused low bits
/// of a final partial byte are ignored; pixels past the end of a short
/// `input` are left untouched.
pub(crate) fn unpack_mono_row(input: &[u8], out: &mut [Pixel]) {
    let mut in_iter = input.iter();
    let mut out_iter = out.chunks_exact_mut(8);

    (&mut out_iter)
        .zip(&mut in_iter)
        .for_each(|(out_vals, in_val)| {
            for (pos, out_val) in out_vals.iter_mut().enumerate() {
                *out_val = Pixel::Mono((in_val >> (7 - pos)) & 0x01 == 1);
            }
        });

    if let Some(in_val) = in_iter.next() {
        let remainder_iter = out_iter.into_remainder().iter_mut();
        remainder_iter.enumerate().for_each(|(pos, out_val)| {
            *out_val = Pixel::Mono((in_val >> (7 - pos)) & 0x01 == 1);
        });
    }
}

/// Pack a row of mono pixels MSB first, zero-filling the low bits of a
/// final partial byte.
pub(crate) fn pack_mono_row(row: &[Pixel], out: &mut Vec<u8>) {
    out.extend(row.chunks(8).map(|chunk| {
        chunk
            .iter()
            .enumerate()
            .filter(|(_, p)| matches!(p, Pixel::Mono(true)))
            .fold(0u8, |byte, (pos, _)| byte | (0x80 >> pos))
    }));
}

/// Read blue, green, red triples into `out`.
pub(crate) fn unpack_bgr_row(input: &[u8], out: &mut [Pixel]) {
    for (out_val, bgr) in out.iter_mut().zip(input.chunks_exact(3)) {
        *out_val = Pixel::Rgb(bgr[2], bgr[1], bgr[0]);
    }
}

/// Write blue, green, red triples.
pub(crate) fn pack_bgr_row(row: &[Pixel], out: &mut Vec<u8>) {
    for pixel in row {
        let (r, g, b) = pixel.channels();
        out.extend_from_slice(&[b, g, r]);
    }
}
