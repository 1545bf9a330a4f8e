//! Pixpress WASM - WebAssembly bindings for Pixpress
//!
//! This crate exposes the pixpress-core compressor to the browser, where it
//! runs between file selection and the storage upload call.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for source and compressed files
//! - `compress` - Single-file and batch compression bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image, format_file_size, JsSourceImage } from '@pixpress/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = compress_image(new JsSourceImage(file.name, file.type, bytes), undefined);
//! console.log(`${out.name}: ${format_file_size(out.size)}`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod types;

pub use compress::{compress_image, compress_image_to_size, compress_images, compress_images_with_progress};
pub use types::{JsCompressedImage, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Human-readable size, e.g. `1.5 KB`.
///
/// # Arguments
///
/// * `bytes` - Byte count; negative or NaN values read as 0
///
/// # Returns
///
/// The size in the largest fitting base-1024 unit, with at most two decimals.
///
/// # Example
///
/// ```typescript
/// label.textContent = format_file_size(file.size); // "2.35 MB"
/// ```
#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    pixpress_core::format_file_size(bytes.max(0.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(1536.0), "1.5 KB");
        assert_eq!(format_file_size(-3.0), "0 Bytes");
    }
}
