#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod codec;
pub mod data_format;
pub mod error;
pub mod layout;
pub mod vq;

mod indexed;
mod raster;
mod twiddled;

pub use codec::{DataCodec, LevelPalette, LevelSource};
pub use data_format::DataFormat;
pub use error::{DataCodecError, DataCodecResult};
pub use layout::{LevelSpan, TextureLayout};

#[cfg(test)]
pub mod test_prelude;
