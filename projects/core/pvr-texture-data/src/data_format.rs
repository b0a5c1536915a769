//! The data formats a `PVRT` chunk may declare, and their static properties.

use derive_enum_all_values::AllValues;
use pvr_texture_common::pixel_format::PixelFormat;

/// Data format code stored in byte 9 of the `PVRT` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
#[repr(u8)]
pub enum DataFormat {
    SquareTwiddled = 0x01,
    /// Twiddled with mipmaps, preceded by one pixel unit of padding.
    SquareTwiddledMipmaps = 0x02,
    /// 2x2 vector quantized with a 256 entry codebook.
    Vq = 0x03,
    VqMipmaps = 0x04,
    /// 4-bit indices; the palette lives in a companion stream.
    Index4 = 0x05,
    Index4Mipmaps = 0x06,
    /// 8-bit indices; the palette lives in a companion stream.
    Index8 = 0x07,
    Index8Mipmaps = 0x08,
    /// Row-major, any dimensions.
    Rectangle = 0x09,
    /// 4-bit indices with the palette stored in the payload.
    Index4EmbeddedPalette = 0x0E,
    /// 8-bit indices with the palette stored in the payload.
    Index8EmbeddedPalette = 0x0F,
    /// Vector quantized with a codebook sized by texture width.
    SmallVq = 0x10,
    SmallVqMipmaps = 0x11,
    /// Twiddled with mipmaps, preceded by three pixel units of padding.
    SquareTwiddledMipmapsAlt = 0x12,
}

/// How pixels of one level are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLayout {
    Raster,
    Twiddled,
    Vq,
    /// Twiddled palette indices stored with the given index format.
    Indexed(PixelFormat),
}

/// Zeroed pixel units written before the first (smallest) mipmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MipmapPadding {
    None,
    OnePixel,
    ThreePixels,
}

impl MipmapPadding {
    #[inline]
    pub const fn units(self) -> usize {
        match self {
            MipmapPadding::None => 0,
            MipmapPadding::OnePixel => 1,
            MipmapPadding::ThreePixels => 3,
        }
    }
}

/// How many palette entries a format carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteRule {
    None,
    Fixed(usize),
    /// Ordered `(max_width, entries)` pairs; the first tier whose `max_width >= width` applies.
    WidthTiered(&'static [(u32, usize)]),
}

impl PaletteRule {
    pub fn entries(self, width: u32) -> usize {
        match self {
            PaletteRule::None => 0,
            PaletteRule::Fixed(entries) => entries,
            PaletteRule::WidthTiered(tiers) => tiers
                .iter()
                .find(|(max_width, _)| width <= *max_width)
                .map(|(_, entries)| *entries)
                .unwrap_or(0),
        }
    }
}

/// Codebook slots per VQ entry: one per pixel of a 2x2 block.
pub const VQ_SLOTS_PER_ENTRY: usize = 4;

/// Codebook slots of a full size VQ codebook (256 entries).
pub const VQ_CODEBOOK_SLOTS: usize = 256 * VQ_SLOTS_PER_ENTRY;

/// Codebook slot tiers of [`DataFormat::SmallVq`].
pub static SMALL_VQ_TIERS: [(u32, usize); 4] = [(16, 64), (32, 128), (64, 512), (u32::MAX, 1024)];

/// Codebook slot tiers of [`DataFormat::SmallVqMipmaps`].
pub static SMALL_VQ_MIPMAP_TIERS: [(u32, usize); 3] = [(16, 64), (32, 256), (u32::MAX, 1024)];

/// Static description of a [`DataFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFormatInfo {
    pub layout: DataLayout,
    pub has_mipmaps: bool,
    pub padding: MipmapPadding,
    pub palette: PaletteRule,
    pub external_palette: bool,
}

const fn info(
    layout: DataLayout,
    has_mipmaps: bool,
    padding: MipmapPadding,
    palette: PaletteRule,
    external_palette: bool,
) -> DataFormatInfo {
    DataFormatInfo {
        layout,
        has_mipmaps,
        padding,
        palette,
        external_palette,
    }
}

const INDEX4: DataLayout = DataLayout::Indexed(PixelFormat::Index4);
const INDEX8: DataLayout = DataLayout::Indexed(PixelFormat::Index8);

static SQUARE_TWIDDLED: DataFormatInfo = info(
    DataLayout::Twiddled,
    false,
    MipmapPadding::None,
    PaletteRule::None,
    false,
);
static SQUARE_TWIDDLED_MIPMAPS: DataFormatInfo = info(
    DataLayout::Twiddled,
    true,
    MipmapPadding::OnePixel,
    PaletteRule::None,
    false,
);
static SQUARE_TWIDDLED_MIPMAPS_ALT: DataFormatInfo = info(
    DataLayout::Twiddled,
    true,
    MipmapPadding::ThreePixels,
    PaletteRule::None,
    false,
);
static VQ: DataFormatInfo = info(
    DataLayout::Vq,
    false,
    MipmapPadding::None,
    PaletteRule::Fixed(VQ_CODEBOOK_SLOTS),
    false,
);
static VQ_MIPMAPS: DataFormatInfo = info(
    DataLayout::Vq,
    true,
    MipmapPadding::None,
    PaletteRule::Fixed(VQ_CODEBOOK_SLOTS),
    false,
);
static SMALL_VQ: DataFormatInfo = info(
    DataLayout::Vq,
    false,
    MipmapPadding::None,
    PaletteRule::WidthTiered(&SMALL_VQ_TIERS),
    false,
);
static SMALL_VQ_MIPMAPS: DataFormatInfo = info(
    DataLayout::Vq,
    true,
    MipmapPadding::None,
    PaletteRule::WidthTiered(&SMALL_VQ_MIPMAP_TIERS),
    false,
);
static INDEX4_EXTERNAL: DataFormatInfo = info(
    INDEX4,
    false,
    MipmapPadding::None,
    PaletteRule::Fixed(16),
    true,
);
static INDEX4_EXTERNAL_MIPMAPS: DataFormatInfo = info(
    INDEX4,
    true,
    MipmapPadding::None,
    PaletteRule::Fixed(16),
    true,
);
static INDEX8_EXTERNAL: DataFormatInfo = info(
    INDEX8,
    false,
    MipmapPadding::None,
    PaletteRule::Fixed(256),
    true,
);
static INDEX8_EXTERNAL_MIPMAPS: DataFormatInfo = info(
    INDEX8,
    true,
    MipmapPadding::None,
    PaletteRule::Fixed(256),
    true,
);
static INDEX4_EMBEDDED: DataFormatInfo = info(
    INDEX4,
    false,
    MipmapPadding::None,
    PaletteRule::Fixed(16),
    false,
);
static INDEX8_EMBEDDED: DataFormatInfo = info(
    INDEX8,
    false,
    MipmapPadding::None,
    PaletteRule::Fixed(256),
    false,
);
static RECTANGLE: DataFormatInfo = info(
    DataLayout::Raster,
    false,
    MipmapPadding::None,
    PaletteRule::None,
    false,
);

const fn build_code_table() -> [Option<DataFormat>; 256] {
    let mut table = [None; 256];
    let formats = DataFormat::all_values();
    let mut x = 0;
    while x < formats.len() {
        table[formats[x] as usize] = Some(formats[x]);
        x += 1;
    }
    table
}

static CODE_TABLE: [Option<DataFormat>; 256] = build_code_table();

impl DataFormat {
    /// Resolves a container code; [`None`] for codes outside the known set.
    #[inline]
    pub fn from_code(code: u8) -> Option<Self> {
        CODE_TABLE[code as usize]
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn info(self) -> &'static DataFormatInfo {
        match self {
            DataFormat::SquareTwiddled => &SQUARE_TWIDDLED,
            DataFormat::SquareTwiddledMipmaps => &SQUARE_TWIDDLED_MIPMAPS,
            DataFormat::SquareTwiddledMipmapsAlt => &SQUARE_TWIDDLED_MIPMAPS_ALT,
            DataFormat::Vq => &VQ,
            DataFormat::VqMipmaps => &VQ_MIPMAPS,
            DataFormat::SmallVq => &SMALL_VQ,
            DataFormat::SmallVqMipmaps => &SMALL_VQ_MIPMAPS,
            DataFormat::Index4 => &INDEX4_EXTERNAL,
            DataFormat::Index4Mipmaps => &INDEX4_EXTERNAL_MIPMAPS,
            DataFormat::Index8 => &INDEX8_EXTERNAL,
            DataFormat::Index8Mipmaps => &INDEX8_EXTERNAL_MIPMAPS,
            DataFormat::Index4EmbeddedPalette => &INDEX4_EMBEDDED,
            DataFormat::Index8EmbeddedPalette => &INDEX8_EMBEDDED,
            DataFormat::Rectangle => &RECTANGLE,
        }
    }

    #[inline]
    pub const fn layout(self) -> DataLayout {
        self.info().layout
    }

    #[inline]
    pub const fn has_mipmaps(self) -> bool {
        self.info().has_mipmaps
    }

    #[inline]
    pub const fn padding(self) -> MipmapPadding {
        self.info().padding
    }

    /// Palette entries (or VQ codebook slots) for a texture of the given width.
    #[inline]
    pub fn palette_entries(self, width: u32) -> usize {
        self.info().palette.entries(width)
    }

    /// Maximum number of 2x2 codebook entries for VQ formats; zero otherwise.
    #[inline]
    pub fn codebook_entries(self, width: u32) -> usize {
        match self.layout() {
            DataLayout::Vq => self.palette_entries(width) / VQ_SLOTS_PER_ENTRY,
            _ => 0,
        }
    }

    /// Whether the palette is carried by a companion stream instead of the payload.
    #[inline]
    pub const fn needs_external_palette(self) -> bool {
        self.info().external_palette
    }

    /// Whether the palette (or codebook) is stored at the start of the payload.
    #[inline]
    pub fn has_internal_palette(self) -> bool {
        !self.needs_external_palette() && !matches!(self.info().palette, PaletteRule::None)
    }

    /// Whether width and height must be equal powers of two.
    #[inline]
    pub const fn requires_square_power_of_two(self) -> bool {
        !matches!(self.layout(), DataLayout::Raster)
    }

    /// Whether the format stores palette indices.
    #[inline]
    pub const fn is_indexed(self) -> bool {
        matches!(self.layout(), DataLayout::Indexed(_))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[test]
    fn codes_round_trip_for_all_formats() {
        for &format in DataFormat::all_values() {
            assert_eq!(DataFormat::from_code(format.code()), Some(format));
        }
        assert_eq!(DataFormat::from_code(0x00), None);
        assert_eq!(DataFormat::from_code(0x0A), None);
        assert_eq!(DataFormat::from_code(0xFF), None);
    }

    #[rstest]
    #[case(8, 64)]
    #[case(16, 64)]
    #[case(17, 128)]
    #[case(32, 128)]
    #[case(33, 512)]
    #[case(64, 512)]
    #[case(65, 1024)]
    #[case(1024, 1024)]
    fn small_vq_tiers(#[case] width: u32, #[case] expected_slots: usize) {
        assert_eq!(DataFormat::SmallVq.palette_entries(width), expected_slots);
    }

    #[rstest]
    #[case(16, 64)]
    #[case(17, 256)]
    #[case(32, 256)]
    #[case(33, 1024)]
    #[case(64, 1024)]
    #[case(65, 1024)]
    fn small_vq_mipmap_tiers(#[case] width: u32, #[case] expected_slots: usize) {
        assert_eq!(DataFormat::SmallVqMipmaps.palette_entries(width), expected_slots);
    }

    #[rstest]
    #[case(DataFormat::SmallVq, 16, 16)]
    #[case(DataFormat::SmallVq, 32, 32)]
    #[case(DataFormat::SmallVq, 64, 128)]
    #[case(DataFormat::SmallVqMipmaps, 32, 64)]
    #[case(DataFormat::Vq, 8, 256)]
    #[case(DataFormat::Rectangle, 8, 0)]
    fn codebook_entries_are_quarter_of_slots(
        #[case] format: DataFormat,
        #[case] width: u32,
        #[case] expected: usize,
    ) {
        assert_eq!(format.codebook_entries(width), expected);
    }

    #[rstest]
    #[case(DataFormat::Index4, true, false)]
    #[case(DataFormat::Index8Mipmaps, true, false)]
    #[case(DataFormat::Index4EmbeddedPalette, false, true)]
    #[case(DataFormat::Vq, false, true)]
    #[case(DataFormat::SquareTwiddled, false, false)]
    fn palette_storage(#[case] format: DataFormat, #[case] external: bool, #[case] internal: bool) {
        assert_eq!(format.needs_external_palette(), external);
        assert_eq!(format.has_internal_palette(), internal);
    }

    #[rstest]
    #[case(DataFormat::SquareTwiddledMipmaps, 1)]
    #[case(DataFormat::SquareTwiddledMipmapsAlt, 3)]
    #[case(DataFormat::VqMipmaps, 0)]
    #[case(DataFormat::Index4Mipmaps, 0)]
    fn head_padding_units(#[case] format: DataFormat, #[case] units: usize) {
        assert!(format.has_mipmaps());
        assert_eq!(format.padding().units(), units);
    }

    #[test]
    fn only_rectangle_allows_arbitrary_dimensions() {
        for &format in DataFormat::all_values() {
            assert_eq!(
                format.requires_square_power_of_two(),
                format != DataFormat::Rectangle
            );
        }
    }
}
