//! Size-targeted compression of uploaded images.
//!
//! A [`Compressor`] turns a [`SourceImage`] into a [`CompressedImage`] that
//! fits under a byte ceiling:
//!
//! 1. Sources already under the ceiling with an acceptable declared MIME type
//!    are returned untouched (no decode, no re-encode).
//! 2. Otherwise the image is decoded, downscaled to fit the max dimensions,
//!    and re-encoded through a bisection search over encoder quality.
//! 3. If the floor quality still does not fit, that encoding is returned
//!    anyway and marked [`CompressionOutcome::SoftFail`].
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::compress::{compress_image, CompressionOptions, SourceImage};
//!
//! let bytes = std::fs::read("beach.png").unwrap();
//! let source = SourceImage::new("beach.png", "image/png", bytes);
//! let out = compress_image(source, &CompressionOptions::default()).unwrap();
//! println!("{} ({} bytes)", out.name, out.bytes.len());
//! ```

mod batch;
mod file;
mod options;
mod search;

pub use batch::compress_images_with_progress;
pub use file::{generate_file_name, is_acceptable_mime, CompressedImage, CompressionOutcome, SourceImage};
pub use options::{CompressionOptions, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_SIZE_BYTES, DEFAULT_QUALITY};
pub use search::{search_quality, SearchResult, MAX_ATTEMPTS, MIN_QUALITY};

use thiserror::Error;

use crate::decode::{self, DecodeError};
use crate::encode::{CodecEncoder, EncodeError, QualityEncoder};

/// Errors that abort a compression.
///
/// An oversized result is not an error; see [`CompressionOutcome::SoftFail`].
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("Invalid compression options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Compresses images with one set of options.
///
/// The encoder defaults to [`CodecEncoder`]; any [`QualityEncoder`] can be
/// plugged in with [`Compressor::with_encoder`].
#[derive(Debug, Clone)]
pub struct Compressor<E = CodecEncoder> {
    options: CompressionOptions,
    encoder: E,
}

impl Compressor<CodecEncoder> {
    pub fn new(options: CompressionOptions) -> Result<Self, CompressError> {
        Self::with_encoder(options, CodecEncoder)
    }
}

impl<E: QualityEncoder> Compressor<E> {
    pub fn with_encoder(options: CompressionOptions, encoder: E) -> Result<Self, CompressError> {
        options.validate()?;
        Ok(Self { options, encoder })
    }

    pub fn options(&self) -> &CompressionOptions {
        &self.options
    }

    /// Compress a single image.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::Decode` if the bytes are not a readable image
    /// and `CompressError::Encode` if the codec fails. Exceeding the size
    /// ceiling is never an error.
    pub fn compress(&self, source: SourceImage) -> Result<CompressedImage, CompressError> {
        let opts = &self.options;

        if source.size() <= opts.max_size_bytes && is_acceptable_mime(&source.mime_type) {
            tracing::debug!(name = %source.name, size = source.size(), "passing through unchanged");
            let dimensions = decode::read_dimensions(&source.bytes);
            return Ok(CompressedImage {
                name: source.name,
                mime_type: source.mime_type,
                bytes: source.bytes,
                dimensions,
                quality: None,
                attempts: 0,
                outcome: CompressionOutcome::PassThrough,
            });
        }

        let decoded = decode::decode_image(&source.bytes)?;
        let fitted = decode::fit_within(&decoded, opts.max_width, opts.max_height, opts.filter)?;
        drop(decoded);

        let search = search_quality(
            &self.encoder,
            &fitted,
            opts.format,
            opts.max_size_bytes,
            opts.quality,
        )?;

        let outcome = if search.within_limit {
            CompressionOutcome::WithinLimit
        } else {
            tracing::warn!(
                name = %source.name,
                size = search.bytes.len(),
                max_size_bytes = opts.max_size_bytes,
                "could not reach target size, returning best effort"
            );
            CompressionOutcome::SoftFail
        };

        tracing::info!(
            name = %source.name,
            original_size = source.size(),
            compressed_size = search.bytes.len(),
            width = fitted.width,
            height = fitted.height,
            attempts = search.attempts,
            "compressed image"
        );

        Ok(CompressedImage {
            name: generate_file_name(&source.name, opts.format),
            mime_type: opts.format.mime_type().to_string(),
            bytes: search.bytes,
            dimensions: Some((fitted.width, fitted.height)),
            quality: search.quality,
            attempts: search.attempts,
            outcome,
        })
    }
}

/// Compress one image with the given options.
pub fn compress_image(
    source: SourceImage,
    options: &CompressionOptions,
) -> Result<CompressedImage, CompressError> {
    Compressor::new(options.clone())?.compress(source)
}

/// Compress one image with default options and a custom size ceiling.
pub fn compress_image_to_size(
    source: SourceImage,
    max_size_bytes: u64,
) -> Result<CompressedImage, CompressError> {
    compress_image(source, &CompressionOptions::with_max_size(max_size_bytes))
}
