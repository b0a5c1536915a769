//! Common test imports and utilities for the common crate's tests.
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

pub use alloc::{format, vec, vec::Vec};

pub use rstest::rstest;

pub use crate::color_8888::Color8888;
pub use crate::mipmap::*;
pub use crate::palette::*;
pub use crate::pixel_codec::*;
pub use crate::pixel_format::PixelFormat;
pub use crate::twiddle::*;

/// Every format that converts both ways between RGBA and storage.
pub const ENCODABLE_FORMATS: [PixelFormat; 5] = [
    PixelFormat::Argb1555,
    PixelFormat::Rgb565,
    PixelFormat::Argb4444,
    PixelFormat::Intensity4,
    PixelFormat::Intensity8,
];
