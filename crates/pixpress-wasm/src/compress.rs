//! Compression WASM bindings.
//!
//! # Functions
//!
//! - [`compress_image`] - Compress one file to fit the size ceiling
//! - [`compress_image_to_size`] - Default options with a custom ceiling
//! - [`compress_images`] - Compress a list of files, all-or-nothing
//! - [`compress_images_with_progress`] - Same, reporting `(completed, total)`
//!
//! `options` is a plain object with any of `maxSizeBytes`, `maxWidth`,
//! `maxHeight`, `quality`, `format` (`"jpeg" | "webp" | "png"`) and `filter`
//! (`"nearest" | "bilinear" | "lanczos3"`). Pass `undefined` for defaults.
//!
//! # Example
//!
//! ```typescript
//! import { compress_images_with_progress, JsSourceImage } from '@pixpress/wasm';
//!
//! const sources = await Promise.all(files.map(async (f) =>
//!   new JsSourceImage(f.name, f.type, new Uint8Array(await f.arrayBuffer()))));
//!
//! const results = compress_images_with_progress(sources, { format: 'webp' },
//!   (done, total) => setProgress(done / total));
//! ```

use pixpress_core::{CompressionOptions, Compressor};
use wasm_bindgen::prelude::*;

use crate::types::{JsCompressedImage, JsSourceImage};

/// Compress a single file.
///
/// # Arguments
///
/// * `source` - The picked file
/// * `options` - Options object, or `undefined` for defaults
///
/// # Returns
///
/// The compressed file. JPEG, WebP and PNG files already under `maxSizeBytes`
/// come back untouched with `passedThrough` set.
///
/// # Errors
///
/// Throws if the options are malformed, the file cannot be decoded, or the
/// encoder fails. An output that is still larger than `maxSizeBytes` is not an
/// error; check `withinLimit`.
///
/// # Example
///
/// ```typescript
/// const out = compress_image(source, { maxSizeBytes: 500 * 1024, format: 'webp' });
/// if (!out.withinLimit) console.warn(`${out.name} is still ${out.size} bytes`);
/// ```
#[wasm_bindgen]
pub fn compress_image(source: JsSourceImage, options: JsValue) -> Result<JsCompressedImage, JsValue> {
    let compressor = compressor_from_js(options)?;
    compressor
        .compress(source.into_core())
        .map(JsCompressedImage::from)
        .map_err(to_js_error)
}

/// Compress a single file with default options and the given ceiling.
///
/// # Arguments
///
/// * `source` - The picked file
/// * `max_size_bytes` - Size ceiling in bytes
///
/// # Returns
///
/// The compressed file, as from [`compress_image`].
///
/// # Errors
///
/// Throws if `max_size_bytes` is not a finite number of at least 1, or if
/// decoding or encoding fails.
///
/// # Example
///
/// ```typescript
/// const avatar = compress_image_to_size(source, 200 * 1024);
/// ```
#[wasm_bindgen]
pub fn compress_image_to_size(source: JsSourceImage, max_size_bytes: f64) -> Result<JsCompressedImage, JsValue> {
    if !(max_size_bytes.is_finite() && max_size_bytes >= 1.0) {
        return Err(JsValue::from_str("maxSizeBytes must be a positive number"));
    }
    pixpress_core::compress_image_to_size(source.into_core(), max_size_bytes as u64)
        .map(JsCompressedImage::from)
        .map_err(to_js_error)
}

/// Compress files in order. The first failure aborts the whole batch.
///
/// # Arguments
///
/// * `sources` - Files to compress
/// * `options` - Options object, or `undefined` for defaults
///
/// # Returns
///
/// One result per source, in input order.
///
/// # Errors
///
/// Throws on malformed options or on the first file that fails; no partial
/// results are returned.
///
/// # Example
///
/// ```typescript
/// const results = compress_images(sources, undefined);
/// const blobs = results.map((r) => new Blob([r.bytes()], { type: r.mimeType }));
/// ```
#[wasm_bindgen]
pub fn compress_images(sources: Vec<JsSourceImage>, options: JsValue) -> Result<Vec<JsCompressedImage>, JsValue> {
    let compressor = compressor_from_js(options)?;
    compressor
        .compress_all(sources.into_iter().map(JsSourceImage::into_core).collect())
        .map(|results| results.into_iter().map(JsCompressedImage::from).collect())
        .map_err(to_js_error)
}

/// Compress files in order, calling `on_progress(completed, total)` after
/// each one.
///
/// An exception thrown by the callback is logged to the console and does not
/// stop the batch.
///
/// # Arguments
///
/// * `sources` - Files to compress
/// * `options` - Options object, or `undefined` for defaults
/// * `on_progress` - Called as `(completed, total)` after each file
///
/// # Returns
///
/// One result per source, in input order.
///
/// # Errors
///
/// Same as [`compress_images`].
///
/// # Example
///
/// ```typescript
/// const results = compress_images_with_progress(sources, { maxWidth: 1280 },
///   (done, total) => { progress.value = done / total; });
/// ```
#[wasm_bindgen]
pub fn compress_images_with_progress(
    sources: Vec<JsSourceImage>,
    options: JsValue,
    on_progress: &js_sys::Function,
) -> Result<Vec<JsCompressedImage>, JsValue> {
    let compressor = compressor_from_js(options)?;
    let sources = sources.into_iter().map(JsSourceImage::into_core).collect();

    compressor
        .compress_with_progress(sources, |completed, total| {
            let args = (JsValue::from(completed as u32), JsValue::from(total as u32));
            if let Err(err) = on_progress.call2(&JsValue::NULL, &args.0, &args.1) {
                web_sys::console::warn_2(&JsValue::from_str("progress callback threw:"), &err);
            }
        })
        .map(|results| results.into_iter().map(JsCompressedImage::from).collect())
        .map_err(to_js_error)
}

fn compressor_from_js(options: JsValue) -> Result<Compressor, JsValue> {
    let options = parse_options(options)?;
    Compressor::new(options).map_err(to_js_error)
}

/// `undefined`/`null` mean defaults; anything else must deserialize.
pub(crate) fn parse_options(options: JsValue) -> Result<CompressionOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(CompressionOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&format!("Invalid compression options: {e}")))
}

fn to_js_error(err: pixpress_core::CompressError) -> JsValue {
    JsValue::from_str(&err.to_string())
}


/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test --headless --chrome`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn options_object(entries: &[(&str, JsValue)]) -> JsValue {
        let obj = js_sys::Object::new();
        for (key, value) in entries {
            js_sys::Reflect::set(&obj, &JsValue::from_str(key), value).unwrap();
        }
        obj.into()
    }

    #[wasm_bindgen_test]
    fn test_parse_undefined_options() {
        let opts = parse_options(JsValue::UNDEFINED).unwrap();
        assert_eq!(opts, CompressionOptions::default());
    }

    #[wasm_bindgen_test]
    fn test_parse_partial_options() {
        let opts = parse_options(options_object(&[
            ("maxSizeBytes", JsValue::from(2048)),
            ("format", JsValue::from_str("webp")),
        ]))
        .unwrap();

        assert_eq!(opts.max_size_bytes, 2048);
        assert_eq!(opts.format, pixpress_core::OutputFormat::Webp);
        assert_eq!(opts.max_width, 1920);
    }

    #[wasm_bindgen_test]
    fn test_parse_rejects_unknown_format() {
        assert!(parse_options(options_object(&[("format", JsValue::from_str("avif"))])).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_image_decode_failure() {
        let source = JsSourceImage::new("x.heic".into(), "image/heic".into(), vec![1, 2, 3]);
        assert!(compress_image(source, JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_image_to_size_rejects_nan() {
        let source = JsSourceImage::new("x.png".into(), "image/png".into(), vec![]);
        assert!(compress_image_to_size(source, f64::NAN).is_err());
    }

    #[wasm_bindgen_test]
    fn test_progress_callback_called() {
        let counter = js_sys::Array::new();
        let push = js_sys::Function::new_with_args("done, total", "this.push([done, total])");
        let bound = push.bind(&counter);

        let sources = vec![
            JsSourceImage::new("a.jpg".into(), "image/jpeg".into(), vec![1]),
            JsSourceImage::new("b.jpg".into(), "image/jpeg".into(), vec![2]),
        ];
        let results = compress_images_with_progress(sources, JsValue::UNDEFINED, &bound).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(counter.length(), 2);
    }
}
