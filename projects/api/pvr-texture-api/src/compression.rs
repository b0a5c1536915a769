use crate::error::TextureResult;
use pvr_texture_common::pixel_format::PixelFormat;

/// Whole-payload compression applied by the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionFormat {
    #[default]
    None,
    /// Run-length compression over pixel sized units, see [`pvr_texture_rle`].
    Rle,
}

impl CompressionFormat {
    /// Compresses a payload. Units are the size of one pixel of `pixel_format`.
    pub(crate) fn compress(self, payload: Vec<u8>, pixel_format: PixelFormat) -> Vec<u8> {
        match self {
            CompressionFormat::None => payload,
            CompressionFormat::Rle => {
                pvr_texture_rle::compress(&payload, pixel_format.unit_size())
            }
        }
    }

    /// Reverses [`CompressionFormat::compress`].
    pub(crate) fn decompress(
        self,
        data: &[u8],
        pixel_format: PixelFormat,
    ) -> TextureResult<Vec<u8>> {
        match self {
            CompressionFormat::None => Ok(data.to_vec()),
            CompressionFormat::Rle => Ok(pvr_texture_rle::decompress(
                data,
                pixel_format.unit_size(),
            )?),
        }
    }
}
