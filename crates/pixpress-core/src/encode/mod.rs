//! Image encoding for compressed output.
//!
//! This module provides functionality for:
//! - Encoding to JPEG and lossy WebP with a continuous 0.0-1.0 quality
//! - Encoding to PNG (lossless, quality ignored)
//! - The [`QualityEncoder`] seam the quality search encodes through
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::decode::DecodedImage;
//! use pixpress_core::encode::{encode, OutputFormat};
//!
//! let image = DecodedImage::rgb(100, 100, vec![128u8; 100 * 100 * 3]);
//! let jpeg = encode(&image, OutputFormat::Jpeg, 0.8).unwrap();
//! println!("Encoded {} bytes", jpeg.len());
//! ```

mod jpeg;
mod png;
mod types;
mod webp;

pub use self::jpeg::encode_jpeg;
pub use self::png::encode_png;
pub use self::webp::encode_webp;
pub use types::{EncodeError, OutputFormat};

use crate::decode::DecodedImage;

/// Encode `image` in `format` at a quality in `0.0..=1.0`.
///
/// JPEG maps quality onto 1-100, WebP onto 0-100, and PNG ignores it.
pub fn encode(image: &DecodedImage, format: OutputFormat, quality: f32) -> Result<Vec<u8>, EncodeError> {
    let quality = quality.clamp(0.0, 1.0);
    match format {
        OutputFormat::Jpeg => encode_jpeg(image, (quality * 100.0).round() as u8),
        OutputFormat::Webp => encode_webp(image, quality * 100.0),
        OutputFormat::Png => encode_png(image),
    }
}

/// Something that can turn pixels into an encoded buffer at a given quality.
///
/// The compressor only ever talks to this trait, so callers can swap in a
/// different codec backend (or a recording one in tests).
pub trait QualityEncoder {
    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Production encoder backed by the `image` and `webp` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecEncoder;

impl QualityEncoder for CodecEncoder {
    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        encode(image, format, quality)
    }
}

impl<E: QualityEncoder + ?Sized> QualityEncoder for &E {
    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image, format, quality)
    }
}

/// Check dimensions and buffer length before handing pixels to a codec.
pub(crate) fn validate(image: &DecodedImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.width as usize * image.height as usize * image.layout.channels();
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;

    fn noise(width: u32, height: u32) -> DecodedImage {
        let mut state = 0x2545_F491u32;
        let pixels = (0..width * height * 3)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect();
        DecodedImage::rgb(width, height, pixels)
    }

    #[test]
    fn test_encode_dispatches_by_format() {
        let img = DecodedImage::rgb(8, 8, vec![100u8; 8 * 8 * 3]);

        let jpeg = encode(&img, OutputFormat::Jpeg, 0.8).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        let webp = encode(&img, OutputFormat::Webp, 0.8).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");

        let png = encode(&img, OutputFormat::Png, 0.8).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_lower_quality_is_smaller_for_noise() {
        let img = noise(64, 64);
        let high = encode(&img, OutputFormat::Jpeg, 0.95).unwrap();
        let low = encode(&img, OutputFormat::Jpeg, 0.1).unwrap();
        assert!(low.len() < high.len(), "low={} high={}", low.len(), high.len());
    }

    #[test]
    fn test_png_ignores_quality() {
        let img = noise(16, 16);
        let a = encode(&img, OutputFormat::Png, 0.1).unwrap();
        let b = encode(&img, OutputFormat::Png, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_zero_dimensions() {
        let img = DecodedImage {
            width: 0,
            height: 10,
            layout: PixelLayout::Rgb8,
            pixels: vec![],
        };
        assert!(matches!(
            encode(&img, OutputFormat::Jpeg, 0.8),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_validate_pixel_length() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            layout: PixelLayout::Rgba8,
            pixels: vec![0u8; 10 * 10 * 3],
        };
        assert!(matches!(
            encode(&img, OutputFormat::Png, 1.0),
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 300
            })
        ));
    }

    #[test]
    fn test_codec_encoder_matches_encode() {
        let img = noise(12, 12);
        let direct = encode(&img, OutputFormat::Jpeg, 0.5).unwrap();
        let via_trait = CodecEncoder.encode(&img, OutputFormat::Jpeg, 0.5).unwrap();
        assert_eq!(direct, via_trait);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
