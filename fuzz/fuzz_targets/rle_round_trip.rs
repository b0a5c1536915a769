#![no_main]

use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct RleInput {
    pub unit_size: u8,
    pub data: Vec<u8>,
}

// Whatever goes in must come back out unchanged.
fuzz_target!(|input: RleInput| {
    let unit_size = (input.unit_size % 4) as usize + 1;
    let compressed = pvr_texture_rle::compress(&input.data, unit_size);
    let restored =
        pvr_texture_rle::decompress(&compressed, unit_size).expect("own output decompresses");
    assert_eq!(restored, input.data, "Round trip changed the data");
});
