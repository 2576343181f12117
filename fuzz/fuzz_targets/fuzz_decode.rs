#![no_main]
use bmpgrid::{BmpInfo, BmpPermissiveness, DecodeRequest, Limits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe and decode at every level; must never panic
    let _ = BmpInfo::from_bytes(data);

    // Permissive zero-fills truncated data, so cap the allocation
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    for level in [
        BmpPermissiveness::Strict,
        BmpPermissiveness::Standard,
        BmpPermissiveness::Permissive,
    ] {
        let _ = DecodeRequest::new(data)
            .with_limits(&limits)
            .with_permissiveness(level)
            .decode();
    }
});
