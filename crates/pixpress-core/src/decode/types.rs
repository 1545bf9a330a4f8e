//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes could not be interpreted as an image of a supported format.
    #[error("Failed to load image: {0}")]
    LoadFailed(String),

    /// A pixel buffer could not be rebuilt from the decoded data.
    #[error("Invalid pixel buffer for {width}x{height} image")]
    InvalidBuffer { width: u32, height: u32 },

    /// Requested output dimensions were zero.
    #[error("Invalid target dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation, close to what a browser canvas does by default.
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Channel layout of a decoded pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 bytes per pixel.
    Rgb8,
    /// 4 bytes per pixel, straight alpha.
    Rgba8,
}

impl PixelLayout {
    /// Bytes used by a single pixel.
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 => 4,
        }
    }
}

/// A decoded image ready for resizing and re-encoding.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub layout: PixelLayout,
    /// Pixel data in row-major order.
    /// Length is width * height * layout.channels().
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create an RGB image from dimensions and pixel data.
    pub fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_layout(width, height, PixelLayout::Rgb8, pixels)
    }

    /// Create an RGBA image from dimensions and pixel data.
    pub fn rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_layout(width, height, PixelLayout::Rgba8, pixels)
    }

    fn with_layout(width: u32, height: u32, layout: PixelLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Take ownership of an `image::DynamicImage`, keeping alpha only when present.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        if img.color().has_alpha() {
            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            Self::rgba(width, height, rgba.into_raw())
        } else {
            let rgb = img.into_rgb8();
            let (width, height) = rgb.dimensions();
            Self::rgb(width, height, rgb.into_raw())
        }
    }

    /// Rebuild an `image::DynamicImage` view of this buffer.
    pub fn to_dynamic(&self) -> Result<image::DynamicImage, DecodeError> {
        let invalid = || DecodeError::InvalidBuffer {
            width: self.width,
            height: self.height,
        };

        match self.layout {
            PixelLayout::Rgb8 => image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                .map(image::DynamicImage::ImageRgb8)
                .ok_or_else(invalid),
            PixelLayout::Rgba8 => image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
                .map(image::DynamicImage::ImageRgba8)
                .ok_or_else(invalid),
        }
    }

    /// Whether the buffer carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.layout == PixelLayout::Rgba8
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_layout_channels() {
        assert_eq!(PixelLayout::Rgb8.channels(), 3);
        assert_eq!(PixelLayout::Rgba8.channels(), 4);
    }

    #[test]
    fn test_from_dynamic_drops_missing_alpha() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(4, 2));
        let decoded = DecodedImage::from_dynamic(img);
        assert_eq!(decoded.layout, PixelLayout::Rgb8);
        assert_eq!(decoded.pixels.len(), 4 * 2 * 3);
    }

    #[test]
    fn test_from_dynamic_keeps_alpha() {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(4, 2));
        let decoded = DecodedImage::from_dynamic(img);
        assert!(decoded.has_alpha());
        assert_eq!(decoded.pixels.len(), 4 * 2 * 4);
    }

    #[test]
    fn test_to_dynamic_round_trips_dimensions() {
        let decoded = DecodedImage::rgb(10, 5, vec![7u8; 10 * 5 * 3]);
        let dynamic = decoded.to_dynamic().unwrap();
        assert_eq!((dynamic.width(), dynamic.height()), (10, 5));
        assert_eq!(decoded.pixel_count(), 50);
    }

    #[test]
    fn test_to_dynamic_rejects_short_buffer() {
        let decoded = DecodedImage {
            width: 10,
            height: 10,
            layout: PixelLayout::Rgb8,
            pixels: vec![0u8; 12],
        };
        assert!(matches!(
            decoded.to_dynamic(),
            Err(DecodeError::InvalidBuffer { width: 10, height: 10 })
        ));
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::rgb(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::LoadFailed("unknown format".to_string());
        assert_eq!(err.to_string(), "Failed to load image: unknown format");
    }
}
