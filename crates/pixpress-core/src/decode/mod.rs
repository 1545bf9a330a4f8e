//! Image decoding and downscaling for the compression pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG, WebP and GIF uploads with EXIF orientation applied
//! - Reading header dimensions without a full decode
//! - Planning and applying aspect-preserving downscales
//!
//! All operations are synchronous and single-threaded, so the same code runs
//! inside a WASM worker and on native targets.
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::decode::{decode_image, fit_within, FilterType};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let fitted = fit_within(&image, 1920, 1920, FilterType::Bilinear).unwrap();
//! println!("{}x{} -> {}x{}", image.width, image.height, fitted.width, fitted.height);
//! ```

mod load;
mod orientation;
mod resize;
mod types;

pub use load::{decode_image, read_dimensions};
pub use orientation::Orientation;
pub use resize::{fit_within, plan_dimensions, resize};
pub use types::{DecodeError, DecodedImage, FilterType, PixelLayout};
