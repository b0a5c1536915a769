#![no_main]

use libfuzzer_sys::fuzz_target;

// Arbitrary streams may fail, but must never panic or produce more than they declare.
fuzz_target!(|data: &[u8]| {
    for unit_size in [1, 2] {
        if let Ok(output) = pvr_texture_rle::decompress(data, unit_size) {
            assert_eq!(Some(output.len()), pvr_texture_rle::decompressed_len(data));
        }
    }
});
