//! Compression settings.

use serde::{Deserialize, Serialize};

use super::CompressError;
use crate::decode::FilterType;
use crate::encode::OutputFormat;

/// 5 MiB, the upload ceiling used when no limit is given.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;
pub const DEFAULT_QUALITY: f32 = 0.8;

/// Settings for a compression run.
///
/// Every field is optional when deserializing; missing keys take the
/// defaults below. Keys are camelCase so a JS options object maps directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionOptions {
    /// Target ceiling for the output size in bytes (default 5 MiB)
    pub max_size_bytes: u64,
    /// Maximum output width in pixels (default 1920)
    pub max_width: u32,
    /// Maximum output height in pixels (default 1920)
    pub max_height: u32,
    /// Starting point of the quality search, in (0, 1] (default 0.8)
    pub quality: f32,
    /// Output encoding (default jpeg)
    pub format: OutputFormat,
    /// Interpolation used when downscaling (default bilinear)
    pub filter: FilterType,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            quality: DEFAULT_QUALITY,
            format: OutputFormat::default(),
            filter: FilterType::default(),
        }
    }
}

impl CompressionOptions {
    /// Defaults with a custom size ceiling.
    pub fn with_max_size(max_size_bytes: u64) -> Self {
        Self {
            max_size_bytes,
            ..Self::default()
        }
    }

    /// Reject settings the search cannot work with.
    pub fn validate(&self) -> Result<(), CompressError> {
        if self.max_size_bytes == 0 {
            return Err(CompressError::InvalidOptions(
                "maxSizeBytes must be positive".to_string(),
            ));
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(CompressError::InvalidOptions(format!(
                "maxWidth and maxHeight must be positive, got {}x{}",
                self.max_width, self.max_height
            )));
        }
        if !(self.quality > 0.0 && self.quality <= 1.0) {
            return Err(CompressError::InvalidOptions(format!(
                "quality must be in (0, 1], got {}",
                self.quality
            )));
        }
        Ok(())
    }
}
