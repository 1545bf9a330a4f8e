//! Quality search: bisect the encoder quality until the output fits.
//!
//! Starting from the configured quality, every oversized attempt halves the
//! distance to the floor. The search stops at the first encoding that fits,
//! or at the floor. The tenth attempt is always made at the floor, so no
//! image costs more than [`MAX_ATTEMPTS`] encodes.
//!
//! PNG has no quality parameter, so it gets a single encode.

use crate::decode::DecodedImage;
use crate::encode::{EncodeError, OutputFormat, QualityEncoder};

/// Lowest quality the search will try.
pub const MIN_QUALITY: f32 = 0.1;
/// Upper bound on encode calls per image.
pub const MAX_ATTEMPTS: u32 = 10;

/// Result of a quality search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub bytes: Vec<u8>,
    /// Quality of `bytes`; `None` for lossless formats.
    pub quality: Option<f32>,
    pub attempts: u32,
    pub within_limit: bool,
}

/// Find an encoding of `image` no larger than `max_size_bytes`.
///
/// Never fails on size alone: if even the floor quality is too large, that
/// encoding is returned with `within_limit == false`.
///
/// # Arguments
///
/// * `encoder` - Codec used for every attempt
/// * `image` - Already downscaled pixels
/// * `format` - Output format; lossless formats get a single encode
/// * `max_size_bytes` - Size ceiling for the encoded output
/// * `initial_quality` - First quality tried, 0.0-1.0
///
/// # Returns
///
/// The last encoding produced together with its quality, the number of encode
/// calls (at most [`MAX_ATTEMPTS`]) and whether it fits the ceiling.
///
/// # Errors
///
/// Propagates the first `EncodeError` from `encoder`.
pub fn search_quality<E: QualityEncoder>(
    encoder: &E,
    image: &DecodedImage,
    format: OutputFormat,
    max_size_bytes: u64,
    initial_quality: f32,
) -> Result<SearchResult, EncodeError> {
    if !format.is_lossy() {
        let bytes = encoder.encode(image, format, 1.0)?;
        let within_limit = bytes.len() as u64 <= max_size_bytes;
        tracing::debug!(%format, size = bytes.len(), within_limit, "lossless single encode");
        return Ok(SearchResult {
            bytes,
            quality: None,
            attempts: 1,
            within_limit,
        });
    }

    let mut quality = initial_quality.clamp(MIN_QUALITY, 1.0);
    let mut attempts = 0;

    loop {
        attempts += 1;
        if attempts == MAX_ATTEMPTS {
            quality = MIN_QUALITY;
        }

        let bytes = encoder.encode(image, format, quality)?;
        let size = bytes.len() as u64;
        let within_limit = size <= max_size_bytes;
        tracing::debug!(%format, attempt = attempts, quality, size, max_size_bytes, "encode attempt");

        if within_limit || quality <= MIN_QUALITY {
            return Ok(SearchResult {
                bytes,
                quality: Some(quality),
                attempts,
                within_limit,
            });
        }

        quality = (MIN_QUALITY + quality) / 2.0;
    }
}
