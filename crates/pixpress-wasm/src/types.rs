//! WASM-compatible wrapper types for files going in and out of the compressor.

use pixpress_core::{CompressedImage, CompressionOutcome, SourceImage};
use wasm_bindgen::prelude::*;

/// A file picked for upload.
///
/// Build one from a browser `File`:
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const source = new JsSourceImage(file.name, file.type, bytes);
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsSourceImage {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsSourceImage {
    #[wasm_bindgen(constructor)]
    pub fn new(name: String, mime_type: String, bytes: Vec<u8>) -> JsSourceImage {
        JsSourceImage {
            name,
            mime_type,
            bytes,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl JsSourceImage {
    pub(crate) fn into_core(self) -> SourceImage {
        SourceImage::new(self.name, self.mime_type, self.bytes)
    }
}

/// A compressed file ready to hand to the storage upload call.
///
/// ```typescript
/// const out = compress_image(source, { maxSizeBytes: 2 * 1024 * 1024 });
/// const blob = new Blob([out.bytes()], { type: out.mimeType });
/// await storage.upload(`posts/${out.name}`, blob);
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsCompressedImage {
    inner: CompressedImage,
}

#[wasm_bindgen]
impl JsCompressedImage {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type.clone()
    }

    /// Encoded bytes as a `Uint8Array` (copied out of WASM memory).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.bytes.len()
    }

    /// Final width, or `undefined` for a pass-through file with an unreadable header.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> Option<u32> {
        self.inner.dimensions.map(|(w, _)| w)
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> Option<u32> {
        self.inner.dimensions.map(|(_, h)| h)
    }

    /// Quality of the final encode, `undefined` when no lossy encode happened.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> Option<f32> {
        self.inner.quality
    }

    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.inner.attempts
    }

    /// False when the quality floor was reached and the file is still too big.
    #[wasm_bindgen(getter, js_name = withinLimit)]
    pub fn within_limit(&self) -> bool {
        self.inner.within_limit()
    }

    #[wasm_bindgen(getter, js_name = passedThrough)]
    pub fn passed_through(&self) -> bool {
        self.inner.outcome == CompressionOutcome::PassThrough
    }
}

impl From<CompressedImage> for JsCompressedImage {
    fn from(inner: CompressedImage) -> Self {
        Self { inner }
    }
}
