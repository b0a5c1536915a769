use crate::color_8888::Color8888;

/// Represents a 16-bit RGB565 pixel (5 bits red, 6 bits green, 5 bits blue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb565 {
    value: u16,
}

impl Rgb565 {
    #[inline]
    pub fn from_raw(value: u16) -> Self {
        Self { value }
    }

    /// Creates a new [`Rgb565`] by truncating each 8-bit component.
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            value: ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3),
        }
    }

    #[inline]
    pub fn raw_value(&self) -> u16 {
        self.value
    }

    /// Extracts the expanded 8-bit red component
    #[inline]
    pub fn red(&self) -> u8 {
        let r = (self.value & 0b11111000_00000000) >> 11;
        ((r << 3) | (r >> 2)) as u8
    }

    /// Extracts the expanded 8-bit green component
    #[inline]
    pub fn green(&self) -> u8 {
        let g = (self.value & 0b00000111_11100000) >> 5;
        ((g << 2) | (g >> 4)) as u8
    }

    /// Extracts the expanded 8-bit blue component
    #[inline]
    pub fn blue(&self) -> u8 {
        let b = self.value & 0b00000000_00011111;
        ((b << 3) | (b >> 2)) as u8
    }

    /// Converts to an opaque [`Color8888`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pvr_texture_common::pixel_codec::rgb565::Rgb565;
    ///
    /// let color = Rgb565::from_rgb(255, 0, 0).to_color_8888();
    /// assert_eq!((color.r, color.g, color.b, color.a), (255, 0, 0, 255));
    /// ```
    #[inline]
    pub fn to_color_8888(&self) -> Color8888 {
        Color8888::new(self.red(), self.green(), self.blue(), 255)
    }
}
