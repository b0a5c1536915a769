//! The packed pixel formats a `PVRT` chunk may declare.
//!
//! Each [`PixelFormat`] carries a static [`PixelFormatInfo`] describing its storage size and
//! capabilities. Callers must check [`PixelFormat::can_decode`] / [`PixelFormat::can_encode`]
//! before converting pixels; the index formats only ever store raw palette indices.

use derive_enum_all_values::AllValues;

/// Pixel format code stored in byte 8 of the `PVRT` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
#[repr(u8)]
pub enum PixelFormat {
    /// 1 bit alpha, 5 bits per color channel.
    Argb1555 = 0x00,
    /// 5 bits red, 6 bits green, 5 bits blue. Always opaque.
    Rgb565 = 0x01,
    /// 4 bits per channel.
    Argb4444 = 0x02,
    /// Luma/chroma pairs, two pixels per 32 bits. Decode only.
    Yuv422 = 0x03,
    /// 4-bit palette index. Only meaningful inside an indexed data layout.
    Index4 = 0x05,
    /// 8-bit palette index. Only meaningful inside an indexed data layout.
    Index8 = 0x06,
    /// 4-bit grayscale.
    Intensity4 = 0x07,
    /// 8-bit grayscale.
    Intensity8 = 0x08,
}

/// Static description of a [`PixelFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormatInfo {
    /// Storage size of a single pixel, in bits.
    pub bits_per_pixel: u32,
    /// Whether pixels can be converted to RGBA.
    pub can_decode: bool,
    /// Whether RGBA can be converted into this format.
    pub can_encode: bool,
    /// Palette size implied by the format; zero for direct color formats.
    pub palette_entries: usize,
}

const fn info(
    bits_per_pixel: u32,
    can_decode: bool,
    can_encode: bool,
    palette_entries: usize,
) -> PixelFormatInfo {
    PixelFormatInfo {
        bits_per_pixel,
        can_decode,
        can_encode,
        palette_entries,
    }
}

static ARGB1555_INFO: PixelFormatInfo = info(16, true, true, 0);
static RGB565_INFO: PixelFormatInfo = info(16, true, true, 0);
static ARGB4444_INFO: PixelFormatInfo = info(16, true, true, 0);
static YUV422_INFO: PixelFormatInfo = info(16, true, false, 0);
static INDEX4_INFO: PixelFormatInfo = info(4, false, false, 16);
static INDEX8_INFO: PixelFormatInfo = info(8, false, false, 256);
static INTENSITY4_INFO: PixelFormatInfo = info(4, true, true, 0);
static INTENSITY8_INFO: PixelFormatInfo = info(8, true, true, 0);

const fn build_code_table() -> [Option<PixelFormat>; 256] {
    let mut table = [None; 256];
    let formats = PixelFormat::all_values();
    let mut x = 0;
    while x < formats.len() {
        table[formats[x] as usize] = Some(formats[x]);
        x += 1;
    }
    table
}

static CODE_TABLE: [Option<PixelFormat>; 256] = build_code_table();

impl PixelFormat {
    /// Resolves a container code; [`None`] for codes outside the known set.
    #[inline]
    pub fn from_code(code: u8) -> Option<Self> {
        CODE_TABLE[code as usize]
    }

    /// The code written to the container.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Static information for this format.
    #[inline]
    pub const fn info(self) -> &'static PixelFormatInfo {
        match self {
            PixelFormat::Argb1555 => &ARGB1555_INFO,
            PixelFormat::Rgb565 => &RGB565_INFO,
            PixelFormat::Argb4444 => &ARGB4444_INFO,
            PixelFormat::Yuv422 => &YUV422_INFO,
            PixelFormat::Index4 => &INDEX4_INFO,
            PixelFormat::Index8 => &INDEX8_INFO,
            PixelFormat::Intensity4 => &INTENSITY4_INFO,
            PixelFormat::Intensity8 => &INTENSITY8_INFO,
        }
    }

    #[inline]
    pub const fn bits_per_pixel(self) -> u32 {
        self.info().bits_per_pixel
    }

    #[inline]
    pub const fn can_decode(self) -> bool {
        self.info().can_decode
    }

    #[inline]
    pub const fn can_encode(self) -> bool {
        self.info().can_encode
    }

    #[inline]
    pub const fn palette_entries(self) -> usize {
        self.info().palette_entries
    }

    /// Size of one pixel unit in bytes, rounded up to at least one byte.
    ///
    /// This is the granularity used by the run-length codec and for mipmap head padding.
    #[inline]
    pub const fn unit_size(self) -> usize {
        let bytes = (self.bits_per_pixel() / 8) as usize;
        if bytes == 0 {
            1
        } else {
            bytes
        }
    }

    /// Number of bytes needed to store `pixels` pixels in this format.
    #[inline]
    pub const fn byte_len(self, pixels: usize) -> usize {
        (pixels * self.bits_per_pixel() as usize).div_ceil(8)
    }
}
