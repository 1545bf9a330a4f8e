//! Pixpress Core - size-targeted image compression
//!
//! This crate shrinks user-selected images before they are uploaded to object
//! storage: it decodes, downscales to a bounding box, and re-encodes with a
//! bisection search over encoder quality until the file fits a byte ceiling.

pub mod compress;
pub mod decode;
pub mod encode;
mod size;

pub use compress::{
    compress_image, compress_image_to_size, compress_images_with_progress, CompressError,
    CompressedImage, CompressionOptions, CompressionOutcome, Compressor, SourceImage,
};
pub use encode::{CodecEncoder, OutputFormat, QualityEncoder};
pub use size::format_file_size;
