/// Represents a single RGBA8888 pixel; the canonical color every pixel format converts through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Fully transparent black. Used for out of range palette lookups.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// # Examples
    ///
    /// ```
    /// use pvr_texture_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.a, 255);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Reads the pixel at `index` from a tightly packed RGBA8888 buffer.
    ///
    /// # Panics
    ///
    /// If `rgba` holds fewer than `(index + 1) * 4` bytes.
    #[inline]
    pub fn from_rgba_slice(rgba: &[u8], index: usize) -> Self {
        let offset = index * 4;
        Self::new(
            rgba[offset],
            rgba[offset + 1],
            rgba[offset + 2],
            rgba[offset + 3],
        )
    }

    /// Writes this pixel at `index` into a tightly packed RGBA8888 buffer.
    #[inline]
    pub fn write_rgba_slice(&self, rgba: &mut [u8], index: usize) {
        let offset = index * 4;
        rgba[offset..offset + 4].copy_from_slice(&self.to_array());
    }

    /// Returns the components as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Rec.601 luma, rounded to the nearest integer.
    #[inline]
    pub fn luminance(&self) -> u8 {
        let weighted = self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114;
        ((weighted + 500) / 1000) as u8
    }

    /// Squared euclidean distance over all four channels.
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        let da = self.a as i32 - other.a as i32;
        (dr * dr + dg * dg + db * db + da * da) as u32
    }
}

impl From<[u8; 4]> for Color8888 {
    #[inline]
    fn from(value: [u8; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}
