//! Lossy WebP encoding through libwebp.
//!
//! The `image` crate only writes lossless WebP, which has no quality knob, so
//! lossy output goes through the `webp` crate instead.

use super::{validate, EncodeError};
use crate::decode::{DecodedImage, PixelLayout};

/// Encode an image to lossy WebP. `quality` is libwebp's 0-100 scale.
pub fn encode_webp(image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let encoder = match image.layout {
        PixelLayout::Rgb8 => ::webp::Encoder::from_rgb(&image.pixels, image.width, image.height),
        PixelLayout::Rgba8 => ::webp::Encoder::from_rgba(&image.pixels, image.width, image.height),
    };

    let memory = encoder
        .encode_simple(false, quality.clamp(0.0, 100.0))
        .map_err(|e| EncodeError::EncodingFailed(format!("{e:?}")))?;

    Ok(memory.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_webp_riff_header() {
        let img = DecodedImage::rgb(16, 16, vec![90u8; 16 * 16 * 3]);
        let webp = encode_webp(&img, 75.0).unwrap();

        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_webp_rgba() {
        let img = DecodedImage::rgba(8, 8, vec![255u8; 8 * 8 * 4]);
        assert!(encode_webp(&img, 50.0).is_ok());
    }
}
