//! Decoding of uploaded image bytes with EXIF orientation handling.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is sniffed from content, not from the declared MIME type, so a
/// PNG uploaded as `image/jpeg` still decodes.
///
/// # Errors
///
/// Returns `DecodeError::LoadFailed` if the bytes are empty, of an unknown
/// format, or corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::LoadFailed("empty input".to_string()));
    }

    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::LoadFailed(e.to_string()))?
        .decode()
        .map_err(|e| DecodeError::LoadFailed(e.to_string()))?;

    let orientation = Orientation::read(bytes);
    if orientation != Orientation::Normal {
        tracing::debug!(?orientation, "applying EXIF orientation");
    }

    Ok(DecodedImage::from_dynamic(orientation.apply(img)))
}

/// Read the upright pixel dimensions from the image header without decoding
/// pixel data.
///
/// The EXIF orientation tag is honored, so a portrait photo stored sideways
/// reports the same dimensions [`decode_image`] would produce.
pub fn read_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;

    if Orientation::read(bytes).swaps_dimensions() {
        Some((height, width))
    } else {
        Some((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::test_support::with_exif_orientation;
    use crate::decode::PixelLayout;
    use image::ImageFormat;

    fn encoded(img: image::DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let bytes = encoded(
            image::DynamicImage::ImageRgb8(image::RgbImage::new(12, 7)),
            ImageFormat::Png,
        );
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (12, 7));
        assert_eq!(img.layout, PixelLayout::Rgb8);
    }

    #[test]
    fn test_decode_png_with_alpha() {
        let bytes = encoded(
            image::DynamicImage::ImageRgba8(image::RgbaImage::new(3, 3)),
            ImageFormat::Png,
        );
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.layout, PixelLayout::Rgba8);
        assert_eq!(img.pixels.len(), 3 * 3 * 4);
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = encoded(
            image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
                16,
                8,
                image::Rgb([200, 30, 30]),
            )),
            ImageFormat::Jpeg,
        );
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (16, 8));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        match decode_image(&[0x00, 0x01, 0x02, 0x03]) {
            Err(DecodeError::LoadFailed(_)) => {}
            other => panic!("Expected LoadFailed, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_bytes() {
        let err = decode_image(&[]).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load image"));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encoded(
            image::DynamicImage::ImageRgb8(image::RgbImage::new(32, 32)),
            ImageFormat::Png,
        );
        assert!(decode_image(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn test_read_dimensions() {
        let bytes = encoded(
            image::DynamicImage::ImageRgb8(image::RgbImage::new(500, 20)),
            ImageFormat::Png,
        );
        assert_eq!(read_dimensions(&bytes), Some((500, 20)));
        assert_eq!(read_dimensions(b"not an image"), None);
    }

    fn landscape_jpeg(width: u32, height: u32) -> Vec<u8> {
        encoded(
            image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
                width,
                height,
                image::Rgb([40, 120, 200]),
            )),
            ImageFormat::Jpeg,
        )
    }

    #[test]
    fn test_exif_tag_is_read_from_jpeg() {
        let bytes = with_exif_orientation(&landscape_jpeg(80, 40), 6);
        assert_eq!(Orientation::read(&bytes), Orientation::Rotate90CW);
    }

    #[test]
    fn test_decode_applies_exif_rotation() {
        let bytes = with_exif_orientation(&landscape_jpeg(80, 40), 6);
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (40, 80));
    }

    #[test]
    fn test_decode_keeps_unrotated_orientation() {
        let bytes = with_exif_orientation(&landscape_jpeg(80, 40), 3);
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (80, 40));
    }

    #[test]
    fn test_read_dimensions_honors_exif_rotation() {
        let bytes = with_exif_orientation(&landscape_jpeg(80, 40), 6);
        assert_eq!(read_dimensions(&bytes), Some((40, 80)));
        assert_eq!(read_dimensions(&landscape_jpeg(80, 40)), Some((80, 40)));
    }
}
