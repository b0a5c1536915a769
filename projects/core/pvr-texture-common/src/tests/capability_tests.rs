use crate::test_prelude::*;

#[test]
fn encodable_formats_are_decodable() {
    for format in ENCODABLE_FORMATS {
        assert!(format.can_encode(), "{format:?}");
        assert!(format.can_decode(), "{format:?}");
        assert_eq!(format.palette_entries(), 0);
    }
}

#[test]
fn black_and_white_survive_every_encodable_format() {
    let black = Color8888::new(0, 0, 0, 255);
    let white = Color8888::new(255, 255, 255, 255);
    for format in ENCODABLE_FORMATS {
        let palette = Palette::new(vec![black, white]);
        let bytes = encode_palette(&palette, format).unwrap();
        assert_eq!(bytes.len(), format.byte_len(2));
        assert_eq!(decode_palette(&bytes, 2, format).unwrap(), palette, "{format:?}");
    }
}

#[test]
fn packed_nibbles_do_not_clobber_neighbours() {
    let mut data = vec![0u8; 2];
    for x in 0..4 {
        PixelFormat::Intensity4.encode_pixel(Color8888::new(255, 255, 255, 255), &mut data, x);
    }
    assert_eq!(data, vec![0xFF, 0xFF]);

    PixelFormat::Intensity4.encode_pixel(Color8888::new(0, 0, 0, 255), &mut data, 1);
    assert_eq!(data, vec![0x0F, 0xFF]);
}
