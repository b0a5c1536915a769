#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use endian_writer::{EndianReader, EndianWriter, LittleEndianReader, LittleEndianWriter};
use likely_stable::unlikely;
use thiserror::Error;

/// Size of the uncompressed length header.
pub const HEADER_SIZE: usize = 4;

/// Longest literal segment, in units.
pub const MAX_LITERAL_RUN: usize = 128;

/// Longest repeat segment, in units.
pub const MAX_REPEAT_RUN: usize = 129;

const REPEAT_FLAG: u8 = 0x80;

/// Errors that can occur while decompressing a run-length stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RleError {
    /// The stream is too short to hold the length header.
    #[error("Stream too short for the 4 byte length header")]
    MissingHeader,

    /// The stream ended before the declared length was produced.
    #[error("Stream truncated: {expected} bytes declared, only {actual} could be decoded")]
    Truncated {
        /// Declared uncompressed length.
        expected: usize,
        /// Bytes produced before the input ran out.
        actual: usize,
    },

    /// A segment would produce more data than the declared length.
    #[error("Run passes the declared length: {expected} bytes declared, segment reaches {actual}")]
    RunOverflow {
        /// Declared uncompressed length.
        expected: usize,
        /// Length the offending segment would reach.
        actual: usize,
    },
}

/// Reads the declared uncompressed length without decompressing.
pub fn decompressed_len(data: &[u8]) -> Option<usize> {
    if data.len() < HEADER_SIZE {
        return None;
    }

    // SAFETY: We checked data.len() >= HEADER_SIZE
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    Some(unsafe { reader.read_u32_at(0) } as usize)
}

/// Compresses `data` in units of `unit_size` bytes (values below 1 are treated as 1).
///
/// # Panics
///
/// If `data` is longer than [`u32::MAX`] bytes.
pub fn compress(data: &[u8], unit_size: usize) -> Vec<u8> {
    assert!(data.len() <= u32::MAX as usize, "input too large for a u32 length");
    let unit = unit_size.max(1);
    let units = data.len() / unit;
    let unit_at = |x: usize| &data[x * unit..(x + 1) * unit];
    let starts_repeat = |x: usize| x + 1 < units && unit_at(x) == unit_at(x + 1);

    let mut output = vec![0u8; HEADER_SIZE];
    // SAFETY: output holds HEADER_SIZE bytes
    unsafe {
        let mut writer = LittleEndianWriter::new(output.as_mut_ptr());
        writer.write_u32_at(data.len() as u32, 0);
    }

    let mut x = 0;
    while x < units {
        if starts_repeat(x) {
            let mut run = 2;
            while run < MAX_REPEAT_RUN && x + run < units && unit_at(x + run) == unit_at(x) {
                run += 1;
            }
            output.push(REPEAT_FLAG | (run - 2) as u8);
            output.extend_from_slice(unit_at(x));
            x += run;
            continue;
        }

        let start = x;
        x += 1;
        while x < units && x - start < MAX_LITERAL_RUN && !starts_repeat(x) {
            x += 1;
        }
        output.push((x - start - 1) as u8);
        output.extend_from_slice(&data[start * unit..x * unit]);
    }

    output.extend_from_slice(&data[units * unit..]);
    output
}

/// Decompresses a stream produced by [`compress`] with the same `unit_size`.
///
/// Input past the end of the stream is ignored.
///
/// # Errors
///
/// - [`RleError::MissingHeader`] if `data` is shorter than [`HEADER_SIZE`].
/// - [`RleError::Truncated`] if the input ends before the declared length is produced.
/// - [`RleError::RunOverflow`] if a segment passes the declared length.
pub fn decompress(data: &[u8], unit_size: usize) -> Result<Vec<u8>, RleError> {
    let expected = decompressed_len(data).ok_or(RleError::MissingHeader)?;
    let unit = unit_size.max(1);
    let whole = expected - expected % unit;

    // Never trust the header for the allocation size.
    let mut output = Vec::with_capacity(expected.min(data.len().saturating_mul(MAX_REPEAT_RUN)));
    let mut position = HEADER_SIZE;

    while output.len() < whole {
        let truncated = RleError::Truncated {
            expected,
            actual: output.len(),
        };
        let control = *data.get(position).ok_or(truncated)?;
        position += 1;

        if control & REPEAT_FLAG == 0 {
            let bytes = (control as usize + 1) * unit;
            if unlikely(output.len() + bytes > whole) {
                return Err(RleError::RunOverflow {
                    expected,
                    actual: output.len() + bytes,
                });
            }
            let literal = data.get(position..position + bytes).ok_or(truncated)?;
            output.extend_from_slice(literal);
            position += bytes;
        } else {
            let count = (control & !REPEAT_FLAG) as usize + 2;
            if unlikely(output.len() + count * unit > whole) {
                return Err(RleError::RunOverflow {
                    expected,
                    actual: output.len() + count * unit,
                });
            }
            let repeated = data.get(position..position + unit).ok_or(truncated)?;
            for _ in 0..count {
                output.extend_from_slice(repeated);
            }
            position += unit;
        }
    }

    let tail = data
        .get(position..position + (expected - whole))
        .ok_or(RleError::Truncated {
            expected,
            actual: output.len(),
        })?;
    output.extend_from_slice(tail);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn round_trip(data: &[u8], unit: usize) {
        let compressed = compress(data, unit);
        assert_eq!(decompressed_len(&compressed), Some(data.len()));
        assert_eq!(decompress(&compressed, unit).unwrap(), data);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn empty_input(#[case] unit: usize) {
        round_trip(&[], unit);
        assert_eq!(compress(&[], unit), vec![0, 0, 0, 0]);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(1, 129)]
    #[case(1, 130)]
    #[case(2, 1000)]
    fn all_equal_sequences(#[case] unit: usize, #[case] units: usize) {
        round_trip(&vec![0xAB; unit * units], unit);
    }

    #[rstest]
    #[case(1, 127)]
    #[case(1, 128)]
    #[case(1, 129)]
    #[case(2, 300)]
    fn sequences_without_repeats(#[case] unit: usize, #[case] units: usize) {
        let data: Vec<u8> = (0..unit * units).map(|x| (x % 251) as u8).collect();
        round_trip(&data, unit);
    }

    #[rstest]
    #[case(2, 7)]
    #[case(4, 10)]
    fn trailing_partial_unit(#[case] unit: usize, #[case] len: usize) {
        let data: Vec<u8> = (0..len).map(|x| (x / 3) as u8).collect();
        round_trip(&data, unit);
    }

    #[test]
    fn mixed_runs_compress() {
        let mut data = vec![1u8, 2, 3];
        data.extend(vec![9u8; 50]);
        data.extend([4u8, 5]);
        let compressed = compress(&data, 1);
        assert_eq!(
            compressed[4..].to_vec(),
            vec![0x02u8, 1, 2, 3, 0x80 | 48, 9, 0x01, 4, 5]
        );
        round_trip(&data, 1);
    }

    #[test]
    fn zero_unit_size_acts_as_bytes() {
        round_trip(&[5, 5, 5, 6], 0);
    }

    #[test]
    fn missing_header_is_reported() {
        assert_eq!(decompress(&[1, 0], 1), Err(RleError::MissingHeader));
    }

    #[test]
    fn truncated_stream_is_reported() {
        let compressed = compress(&[1, 2, 3, 4, 5, 6], 1);
        assert_eq!(
            decompress(&compressed[..compressed.len() - 2], 1),
            Err(RleError::Truncated {
                expected: 6,
                actual: 0
            })
        );

        // Header only.
        assert_eq!(
            decompress(&[10, 0, 0, 0], 1),
            Err(RleError::Truncated {
                expected: 10,
                actual: 0
            })
        );
    }

    #[test]
    fn overlong_run_is_reported() {
        // Declares 3 bytes, then repeats one byte 5 times.
        let stream = [3, 0, 0, 0, 0x83, 7];
        assert_eq!(
            decompress(&stream, 1),
            Err(RleError::RunOverflow {
                expected: 3,
                actual: 5
            })
        );
    }

    #[test]
    fn trailing_input_is_ignored() {
        let mut compressed = compress(&[1, 1, 1], 1);
        compressed.extend([0xFF, 0xFF]);
        assert_eq!(decompress(&compressed, 1).unwrap(), vec![1, 1, 1]);
    }
}
