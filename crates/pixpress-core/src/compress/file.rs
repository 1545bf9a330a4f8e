//! Input and output files of the compressor.

use crate::encode::OutputFormat;

/// MIME types that may be uploaded as-is when already small enough.
const ACCEPTABLE_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/webp", "image/png"];

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Original file name, e.g. `beach.heic`
    pub name: String,
    /// Declared MIME type. Used for the pass-through check only; decoding
    /// sniffs the real format from content.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// How a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionOutcome {
    /// Source was already small enough and in an acceptable format.
    PassThrough,
    /// Re-encoded output fits the size ceiling.
    WithinLimit,
    /// Best effort at the quality floor; still larger than the ceiling.
    SoftFail,
}

/// A file ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    /// Final upright pixel dimensions. For pass-through results this comes
    /// from the file header with EXIF orientation applied, and is `None` if
    /// the header could not be read.
    pub dimensions: Option<(u32, u32)>,
    /// Quality of the returned encoding, `None` for pass-through and PNG.
    pub quality: Option<f32>,
    /// Number of encode calls made.
    pub attempts: u32,
    pub outcome: CompressionOutcome,
}

impl CompressedImage {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn within_limit(&self) -> bool {
        self.outcome != CompressionOutcome::SoftFail
    }
}

/// Whether a declared MIME type is one we can upload without re-encoding.
pub fn is_acceptable_mime(mime_type: &str) -> bool {
    let mime_type = mime_type.trim().to_ascii_lowercase();
    ACCEPTABLE_MIME_TYPES.contains(&mime_type.as_str())
}

/// Name for a compressed file: the original name minus its last extension,
/// then `_compressed` and the output format's extension.
///
/// `photo.HEIC` becomes `photo_compressed.jpg`; `notes` becomes
/// `notes_compressed.jpg`.
pub fn generate_file_name(original: &str, format: OutputFormat) -> String {
    let stem = match original.rfind('.') {
        Some(dot) if is_extension(&original[dot + 1..]) => &original[..dot],
        _ => original,
    };
    format!("{stem}_compressed.{}", format.extension())
}

fn is_extension(candidate: &str) -> bool {
    !candidate.is_empty() && !candidate.contains('/')
}
