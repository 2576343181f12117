#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(bmp: &mut [u8], offset: u32, width: i32, height: i32, bpp: u16) {
    let file_size = bmp.len() as u32;
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&file_size.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&height.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes()); // bpp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    header(&mut bmp, 54, 1, 1, 24);
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp).unwrap();

    // 1-bit 10x2 bottom-up with black/white palette
    let mut bmp = vec![0u8; 70]; // 54 header + 8 palette + 2 rows of 4
    header(&mut bmp, 62, 10, 2, 1);
    bmp[58..61].copy_from_slice(&[0xff, 0xff, 0xff]);
    bmp[62] = 0b1011_0000; bmp[63] = 0b0100_0000;
    bmp[66] = 0xff; bmp[67] = 0xc0;
    fs::write(format!("{dir}/mono_10x2.bmp"), bmp).unwrap();

    // 24-bit 2x2 top-down
    let mut bmp = vec![0u8; 70]; // 54 header + 2 rows of 8
    header(&mut bmp, 54, 2, -2, 24);
    bmp[54..60].copy_from_slice(&[0, 0, 255, 0, 255, 0]);
    bmp[62..68].copy_from_slice(&[255, 0, 0, 9, 9, 9]);
    fs::write(format!("{dir}/rgb_2x2_topdown.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/xy_magic.bin"), b"XY\x00\x00\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}
