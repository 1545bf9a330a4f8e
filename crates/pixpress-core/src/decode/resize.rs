//! Dimension planning and downscaling.
//!
//! Output dimensions never exceed the configured bounds, keep the source
//! aspect ratio, and are never larger than the source.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let resized = image
        .to_dynamic()?
        .resize_exact(width, height, filter.to_image_filter());
    Ok(DecodedImage::from_dynamic(resized))
}

/// Downscale an image so it fits within `max_width` x `max_height`.
///
/// Images that already fit are returned unchanged.
pub fn fit_within(
    image: &DecodedImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_width,
            height: max_height,
        });
    }

    let (width, height) = plan_dimensions(image.width, image.height, max_width, max_height);
    resize(image, width, height, filter)
}

/// Compute target dimensions for a source image.
///
/// Width is constrained first, then height is constrained against the
/// already-scaled result. The net effect is one uniform scale factor of
/// `min(max_width / width, max_height / height, 1)`. Both outputs are rounded
/// and at least 1.
///
/// # Arguments
///
/// * `source_width`, `source_height` - Upright source size in pixels
/// * `max_width`, `max_height` - Bounding box
///
/// # Returns
///
/// `(width, height)` no larger than the source and, apart from the minimum of
/// 1, within the bounding box.
///
/// # Example
///
/// ```
/// use pixpress_core::decode::plan_dimensions;
///
/// assert_eq!(plan_dimensions(4000, 3000, 1920, 1920), (1920, 1440));
/// assert_eq!(plan_dimensions(800, 600, 1920, 1920), (800, 600));
/// ```
pub fn plan_dimensions(
    source_width: u32,
    source_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    let mut width = source_width as f64;
    let mut height = source_height as f64;
    let max_w = max_width as f64;
    let max_h = max_height as f64;

    if width > max_w {
        height = height * max_w / width;
        width = max_w;
    }

    if height > max_h {
        width = width * max_h / height;
        height = max_h;
    }

    (
        (width.round() as u32).max(1),
        (height.round() as u32).max(1),
    )
}
