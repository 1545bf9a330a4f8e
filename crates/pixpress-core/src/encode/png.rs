//! PNG encoding.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use super::{validate, EncodeError};
use crate::decode::{DecodedImage, PixelLayout};

/// Encode an image to PNG bytes at the strongest lossless compression.
pub fn encode_png(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let color = match image.layout {
        PixelLayout::Rgb8 => ExtendedColorType::Rgb8,
        PixelLayout::Rgba8 => ExtendedColorType::Rgba8,
    };

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, FilterType::Adaptive)
        .write_image(&image.pixels, image.width, image.height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let img = DecodedImage::rgb(20, 10, vec![50u8; 20 * 10 * 3]);
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_keeps_alpha() {
        let img = DecodedImage::rgba(4, 4, vec![0u8; 4 * 4 * 4]);
        let png = encode_png(&img).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert!(decoded.color().has_alpha());
    }
}
