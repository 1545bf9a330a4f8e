//! JPEG encoding.
//!
//! JPEG has no alpha channel. RGBA input is composited onto black, the same
//! result a canvas `toBlob("image/jpeg")` gives for transparent regions.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate, EncodeError};
use crate::decode::{DecodedImage, PixelLayout};

/// Encode an image to JPEG bytes.
///
/// `quality` is the 1-100 JPEG scale; out-of-range values are clamped.
pub fn encode_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let quality = quality.clamp(1, 100);
    let rgb;
    let pixels: &[u8] = match image.layout {
        PixelLayout::Rgb8 => &image.pixels,
        PixelLayout::Rgba8 => {
            rgb = flatten_on_black(&image.pixels);
            &rgb
        }
    };

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

fn flatten_on_black(rgba: &[u8]) -> Vec<u8> {
    let premultiply = |c: u8, a: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
    rgba.chunks_exact(4)
        .flat_map(|px| {
            let a = px[3];
            [premultiply(px[0], a), premultiply(px[1], a), premultiply(px[2], a)]
        })
        .collect()
}
