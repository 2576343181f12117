#![no_main]
use bmpgrid::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce an identical grid
    let Ok(decoded) = decode_bmp(data) else {
        return;
    };
    assert!(decoded.is_image(), "decoded grid is not a valid image");

    let reencoded = encode_bmp(&decoded).expect("decoded grid failed to encode");
    let Ok(decoded2) = decode_bmp(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");
    assert_eq!(encode_bmp(&decoded2).ok(), Some(reencoded));
});
