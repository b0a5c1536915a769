//! Reading and writing the `GBIX`/`PVRT` chunk headers.
//!
//! ```text
//! [u32 prefix]      only when compressed: uncompressed file size
//! GBIX  u32 8  u32 global_index  u32 0          optional
//! PVRT  u32 payload_len + 8  u8 pixel  u8 data  u16 0  u16 width  u16 height
//! payload           raw, or run-length compressed
//! ```
//!
//! All multi-byte fields are little endian. The `PVRT` length always describes the
//! uncompressed payload.

use crate::error::{TextureError, TextureResult};
use endian_writer::{EndianReader, EndianWriter, LittleEndianReader, LittleEndianWriter};

pub const GBIX_MAGIC: u32 = u32::from_le_bytes(*b"GBIX");
pub const PVRT_MAGIC: u32 = u32::from_le_bytes(*b"PVRT");

/// Size of a `GBIX` chunk, header included.
pub const GBIX_CHUNK_SIZE: usize = 16;
/// Value of the `GBIX` length field.
pub const GBIX_DATA_LEN: u32 = 8;
/// Size of the `PVRT` chunk header.
pub const PVRT_HEADER_SIZE: usize = 16;
/// Bytes of the `PVRT` chunk counted by its length field before the payload.
pub const PVRT_LEN_BIAS: u32 = 8;
/// Size of the uncompressed-size prefix of compressed files.
pub const COMPRESSED_PREFIX_SIZE: usize = 4;

// Field offsets within the PVRT chunk.
const PVRT_LEN_OFFSET: usize = 4;
const PVRT_PIXEL_FORMAT_OFFSET: usize = 8;
const PVRT_DATA_FORMAT_OFFSET: usize = 9;
const PVRT_RESERVED_OFFSET: usize = 10;
const PVRT_WIDTH_OFFSET: usize = 12;
const PVRT_HEIGHT_OFFSET: usize = 14;

/// The fields of a `PVRT` chunk header, as raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PvrtHeader {
    pub pixel_format: u8,
    pub data_format: u8,
    pub width: u16,
    pub height: u16,
    /// Uncompressed payload length.
    pub payload_len: u32,
}

/// Everything known about a container after reading its headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    pub global_index: Option<u32>,
    pub pvrt: PvrtHeader,
    pub compressed: bool,
    /// Offset of the first payload byte (compressed or not) from the start of the file.
    pub payload_offset: usize,
}

#[inline]
fn magic_at(data: &[u8], offset: usize) -> Option<u32> {
    if data.len() < offset + 4 {
        return None;
    }

    // SAFETY: We checked data.len() >= offset + 4
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    Some(unsafe { reader.read_u32_at(offset as isize) })
}

#[inline]
fn is_chunk_magic(magic: Option<u32>) -> bool {
    matches!(magic, Some(GBIX_MAGIC) | Some(PVRT_MAGIC))
}

/// Determines whether the data starts like a texture, uncompressed or compressed.
///
/// Only the magic is checked; the headers may still be invalid.
pub fn is_texture(data: &[u8]) -> bool {
    is_chunk_magic(magic_at(data, 0)) || is_chunk_magic(magic_at(data, COMPRESSED_PREFIX_SIZE))
}

/// Size of the headers written before the payload.
#[inline]
pub fn headers_len(has_global_index: bool, compressed: bool) -> usize {
    let prefix = if compressed { COMPRESSED_PREFIX_SIZE } else { 0 };
    let gbix = if has_global_index { GBIX_CHUNK_SIZE } else { 0 };
    prefix + gbix + PVRT_HEADER_SIZE
}

/// Writes the prefix (when compressed), `GBIX` chunk (when indexed) and `PVRT` header.
///
/// # Returns
///
/// The header bytes, ready for the payload to be appended.
pub fn write_headers(global_index: Option<u32>, pvrt: &PvrtHeader, compressed: bool) -> Vec<u8> {
    let len = headers_len(global_index.is_some(), compressed);
    let mut output = vec![0u8; len];
    let mut offset = 0;

    // SAFETY: output is exactly headers_len() bytes, which covers every write below.
    unsafe {
        let mut writer = LittleEndianWriter::new(output.as_mut_ptr());

        if compressed {
            // Size of the file once decompressed, excluding the prefix itself.
            let uncompressed = pvrt.payload_len as usize + len - COMPRESSED_PREFIX_SIZE;
            writer.write_u32_at(uncompressed as u32, 0);
            offset += COMPRESSED_PREFIX_SIZE;
        }

        if let Some(index) = global_index {
            writer.write_u32_at(GBIX_MAGIC, offset as isize);
            writer.write_u32_at(GBIX_DATA_LEN, (offset + 4) as isize);
            writer.write_u32_at(index, (offset + 8) as isize);
            writer.write_u32_at(0, (offset + 12) as isize);
            offset += GBIX_CHUNK_SIZE;
        }

        writer.write_u32_at(PVRT_MAGIC, offset as isize);
        writer.write_u32_at(
            pvrt.payload_len + PVRT_LEN_BIAS,
            (offset + PVRT_LEN_OFFSET) as isize,
        );
        writer.write_u16_at(0, (offset + PVRT_RESERVED_OFFSET) as isize);
        writer.write_u16_at(pvrt.width, (offset + PVRT_WIDTH_OFFSET) as isize);
        writer.write_u16_at(pvrt.height, (offset + PVRT_HEIGHT_OFFSET) as isize);
    }

    output[offset + PVRT_PIXEL_FORMAT_OFFSET] = pvrt.pixel_format;
    output[offset + PVRT_DATA_FORMAT_OFFSET] = pvrt.data_format;
    output
}

/// Parses the container headers.
///
/// # Errors
///
/// - [`TextureError::NotATexture`] if neither offset 0 nor offset 4 holds a chunk magic.
/// - [`TextureError::InvalidHeader`] if a chunk is truncated or its length is inconsistent.
pub fn parse_container(data: &[u8]) -> TextureResult<ContainerInfo> {
    let compressed = if is_chunk_magic(magic_at(data, 0)) {
        false
    } else if is_chunk_magic(magic_at(data, COMPRESSED_PREFIX_SIZE)) {
        true
    } else {
        return Err(TextureError::NotATexture);
    };

    let mut offset = if compressed { COMPRESSED_PREFIX_SIZE } else { 0 };
    let mut global_index = None;

    if magic_at(data, offset) == Some(GBIX_MAGIC) {
        if data.len() < offset + 8 {
            return Err(TextureError::InvalidHeader("GBIX chunk truncated"));
        }

        // SAFETY: We checked data.len() >= offset + 8
        let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
        let chunk_len = unsafe { reader.read_u32_at((offset + 4) as isize) } as usize;
        let chunk_end = (offset + 8)
            .checked_add(chunk_len)
            .filter(|&end| end <= data.len())
            .ok_or(TextureError::InvalidHeader("GBIX chunk truncated"))?;

        if chunk_len >= 4 {
            // SAFETY: chunk_end <= data.len() and chunk_len >= 4
            global_index = Some(unsafe { reader.read_u32_at((offset + 8) as isize) });
        }
        offset = chunk_end;
    }

    if magic_at(data, offset) != Some(PVRT_MAGIC) {
        return Err(TextureError::InvalidHeader("missing PVRT chunk"));
    }
    if data.len() < offset + PVRT_HEADER_SIZE {
        return Err(TextureError::InvalidHeader("PVRT header truncated"));
    }

    // SAFETY: We checked data.len() >= offset + PVRT_HEADER_SIZE
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    let (chunk_len, width, height) = unsafe {
        (
            reader.read_u32_at((offset + PVRT_LEN_OFFSET) as isize),
            reader.read_u16_at((offset + PVRT_WIDTH_OFFSET) as isize),
            reader.read_u16_at((offset + PVRT_HEIGHT_OFFSET) as isize),
        )
    };
    let payload_len = chunk_len
        .checked_sub(PVRT_LEN_BIAS)
        .ok_or(TextureError::InvalidHeader("PVRT length smaller than its header"))?;
    let payload_offset = offset + PVRT_HEADER_SIZE;

    if compressed {
        // SAFETY: The PVRT chunk follows the prefix, so data.len() > COMPRESSED_PREFIX_SIZE
        let prefix = unsafe { reader.read_u32_at(0) } as u64;
        let uncompressed = (payload_offset - COMPRESSED_PREFIX_SIZE) as u64 + payload_len as u64;
        if prefix != uncompressed {
            return Err(TextureError::InvalidHeader(
                "compressed prefix disagrees with the PVRT length",
            ));
        }
    }

    Ok(ContainerInfo {
        global_index,
        pvrt: PvrtHeader {
            pixel_format: data[offset + PVRT_PIXEL_FORMAT_OFFSET],
            data_format: data[offset + PVRT_DATA_FORMAT_OFFSET],
            width,
            height,
            payload_len,
        },
        compressed,
        payload_offset,
    })
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    fn sample_header() -> PvrtHeader {
        PvrtHeader {
            pixel_format: 0x01,
            data_format: 0x09,
            width: 4,
            height: 2,
            payload_len: 16,
        }
    }

    #[rstest]
    #[case(None, false, 16)]
    #[case(Some(7), false, 32)]
    #[case(None, true, 20)]
    #[case(Some(7), true, 36)]
    fn header_sizes(
        #[case] global_index: Option<u32>,
        #[case] compressed: bool,
        #[case] expected: usize,
    ) {
        let header = write_headers(global_index, &sample_header(), compressed);
        assert_eq!(header.len(), expected);
        assert_eq!(headers_len(global_index.is_some(), compressed), expected);
    }

    #[test]
    fn writes_gbix_and_pvrt_fields() {
        let header = write_headers(Some(0x1234), &sample_header(), false);
        assert_eq!(&header[0..4], b"GBIX");
        assert_eq!(&header[4..8], &8u32.to_le_bytes());
        assert_eq!(&header[8..12], &0x1234u32.to_le_bytes());
        assert_eq!(&header[12..16], &[0, 0, 0, 0]);
        assert_eq!(&header[16..20], b"PVRT");
        assert_eq!(&header[20..24], &24u32.to_le_bytes());
        assert_eq!(&header[24..32], &[0x01, 0x09, 0, 0, 4, 0, 2, 0]);
    }

    #[rstest]
    #[case(None, 32)]
    #[case(Some(3), 48)]
    fn compressed_prefix_is_uncompressed_file_size(
        #[case] global_index: Option<u32>,
        #[case] expected: u32,
    ) {
        let header = write_headers(global_index, &sample_header(), true);
        assert_eq!(&header[0..4], &expected.to_le_bytes());
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(42), false)]
    #[case(None, true)]
    #[case(Some(42), true)]
    fn parses_what_it_writes(#[case] global_index: Option<u32>, #[case] compressed: bool) {
        let mut data = write_headers(global_index, &sample_header(), compressed);
        let header_len = data.len();
        data.extend([0u8; 16]);

        let info = parse_container(&data).unwrap();
        assert_eq!(info.global_index, global_index);
        assert_eq!(info.pvrt, sample_header());
        assert_eq!(info.compressed, compressed);
        assert_eq!(info.payload_offset, header_len);
        assert!(is_texture(&data));
    }

    #[test]
    fn rejects_unknown_magic() {
        assert!(matches!(
            parse_container(b"DDS \0\0\0\0"),
            Err(TextureError::NotATexture)
        ));
        assert!(!is_texture(b"PVR"));
    }

    #[test]
    fn rejects_truncated_pvrt() {
        let data = write_headers(None, &sample_header(), false);
        assert!(matches!(
            parse_container(&data[..12]),
            Err(TextureError::InvalidHeader(_))
        ));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(9))]
    fn rejects_corrupt_compressed_prefix(#[case] global_index: Option<u32>) {
        let mut data = write_headers(global_index, &sample_header(), true);
        data.extend([0u8; 16]);
        let prefix = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        data[0..4].copy_from_slice(&(prefix + 1).to_le_bytes());
        assert!(matches!(
            parse_container(&data),
            Err(TextureError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rejects_oversized_gbix_length() {
        let mut data = write_headers(Some(1), &sample_header(), false);
        data[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            parse_container(&data),
            Err(TextureError::InvalidHeader(_))
        ));
    }
}
