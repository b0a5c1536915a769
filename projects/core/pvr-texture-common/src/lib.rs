#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod color_8888;
pub mod mipmap;
pub mod palette;
pub mod pixel_codec;
pub mod pixel_format;
pub mod twiddle;

#[cfg(test)]
pub mod test_prelude;

#[cfg(test)]
mod tests;
