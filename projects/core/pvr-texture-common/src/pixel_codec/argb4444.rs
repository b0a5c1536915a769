use crate::color_8888::Color8888;
use bitfield::bitfield;

bitfield! {
    /// Packed ARGB4444 pixel.
    ///
    /// Bit layout:
    /// - Bits 0-3: Blue
    /// - Bits 4-7: Green
    /// - Bits 8-11: Red
    /// - Bits 12-15: Alpha
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Argb4444(u16);
    impl Debug;
    u16;

    pub blue, set_blue: 3, 0;
    pub green, set_green: 7, 4;
    pub red, set_red: 11, 8;
    pub alpha, set_alpha: 15, 12;
}

impl Argb4444 {
    #[inline]
    pub fn from_raw(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub fn raw_value(&self) -> u16 {
        self.0
    }

    #[inline]
    pub fn to_color_8888(self) -> Color8888 {
        Color8888::new(
            (self.red() * 17) as u8,
            (self.green() * 17) as u8,
            (self.blue() * 17) as u8,
            (self.alpha() * 17) as u8,
        )
    }

    #[inline]
    pub fn from_color_8888(color: Color8888) -> Self {
        let mut packed = Self::default();
        packed.set_red((color.r >> 4) as u16);
        packed.set_green((color.g >> 4) as u16);
        packed.set_blue((color.b >> 4) as u16);
        packed.set_alpha((color.a >> 4) as u16);
        packed
    }
}
