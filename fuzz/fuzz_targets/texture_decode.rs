#![no_main]

use libfuzzer_sys::{arbitrary, fuzz_target};
use pvr_texture_api::TextureDecoder;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct DecodeInput {
    pub container: Vec<u8>,
    pub palette: Option<Vec<u8>>,
}

// Malformed containers must surface as load failures or errors, never panics.
fuzz_target!(|input: DecodeInput| {
    let decoder = TextureDecoder::new(&input.container);
    let palette = input.palette.as_deref();

    if let Ok(rgba) = decoder.decode(palette) {
        if decoder.load_success() {
            let expected = decoder.width() as usize * decoder.height() as usize * 4;
            assert_eq!(rgba.len(), expected, "Decoded size does not match the header");
        }
    }
    let _ = decoder.decode_mipmaps(palette);
});
