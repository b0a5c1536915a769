#![no_main]

use libfuzzer_sys::fuzz_target;
use pvr_texture_common::pixel_format::PixelFormat;

// Stored values that decode must re-encode to themselves for the 16 bit color formats.
fuzz_target!(|raw: [u8; 2]| {
    for format in [PixelFormat::Argb1555, PixelFormat::Rgb565, PixelFormat::Argb4444] {
        let color = format.decode_pixel(&raw, 0);
        let mut encoded = [0u8; 2];
        format.encode_pixel(color, &mut encoded, 0);
        assert_eq!(encoded, raw, "{format:?} did not round trip");
    }
});
