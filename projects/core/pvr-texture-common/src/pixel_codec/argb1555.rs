use crate::color_8888::Color8888;
use bitfield::bitfield;

bitfield! {
    /// Packed ARGB1555 pixel.
    ///
    /// Bit layout:
    /// - Bits 0-4: Blue
    /// - Bits 5-9: Green
    /// - Bits 10-14: Red
    /// - Bit 15: Alpha
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Argb1555(u16);
    impl Debug;
    u16;

    pub blue, set_blue: 4, 0;
    pub green, set_green: 9, 5;
    pub red, set_red: 14, 10;
    pub alpha, set_alpha: 15;
}

#[inline]
fn expand_5(value: u16) -> u8 {
    ((value << 3) | (value >> 2)) as u8
}

impl Argb1555 {
    #[inline]
    pub fn from_raw(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub fn raw_value(&self) -> u16 {
        self.0
    }

    /// Converts to RGBA, replicating the top bits of each 5-bit channel.
    #[inline]
    pub fn to_color_8888(self) -> Color8888 {
        Color8888::new(
            expand_5(self.red()),
            expand_5(self.green()),
            expand_5(self.blue()),
            if self.alpha() { 255 } else { 0 },
        )
    }

    /// Truncates each channel to 5 bits; alpha is set when `a >= 128`.
    #[inline]
    pub fn from_color_8888(color: Color8888) -> Self {
        let mut packed = Self::default();
        packed.set_red((color.r >> 3) as u16);
        packed.set_green((color.g >> 3) as u16);
        packed.set_blue((color.b >> 3) as u16);
        packed.set_alpha(color.a >= 128);
        packed
    }
}
