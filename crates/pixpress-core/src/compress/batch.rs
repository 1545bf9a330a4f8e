//! Batch compression.
//!
//! Batches are all-or-nothing: the first failing image aborts the batch and
//! its error is returned. Results always come back in input order.

use super::{CompressError, CompressedImage, CompressionOptions, Compressor, SourceImage};
use crate::encode::QualityEncoder;

impl<E: QualityEncoder> Compressor<E> {
    /// Compress every source, one at a time.
    pub fn compress_all(&self, sources: Vec<SourceImage>) -> Result<Vec<CompressedImage>, CompressError> {
        self.compress_with_progress(sources, |_, _| {})
    }

    /// Compress sources one at a time, calling `on_progress(completed, total)`
    /// after each image finishes.
    pub fn compress_with_progress<F>(
        &self,
        sources: Vec<SourceImage>,
        mut on_progress: F,
    ) -> Result<Vec<CompressedImage>, CompressError>
    where
        F: FnMut(usize, usize),
    {
        let total = sources.len();
        let mut results = Vec::with_capacity(total);

        for (index, source) in sources.into_iter().enumerate() {
            let name = source.name.clone();
            let compressed = self.compress(source).inspect_err(|err| {
                tracing::error!(%name, index, total, error = %err, "batch aborted");
            })?;
            results.push(compressed);
            on_progress(index + 1, total);
        }

        Ok(results)
    }
}

#[cfg(feature = "parallel")]
impl<E: QualityEncoder + Sync> Compressor<E> {
    /// Compress every source on the rayon pool.
    pub fn par_compress_all(&self, sources: Vec<SourceImage>) -> Result<Vec<CompressedImage>, CompressError> {
        self.par_compress_with_progress(sources, |_, _| {})
    }

    /// Compress sources on the rayon pool.
    ///
    /// Images finish in any order, but `on_progress` still sees `completed`
    /// count up by one per call, and results keep input order.
    pub fn par_compress_with_progress<F>(
        &self,
        sources: Vec<SourceImage>,
        on_progress: F,
    ) -> Result<Vec<CompressedImage>, CompressError>
    where
        F: FnMut(usize, usize) + Send,
    {
        use rayon::prelude::*;
        use std::sync::Mutex;

        let total = sources.len();
        let progress = Mutex::new((0usize, on_progress));

        sources
            .into_par_iter()
            .map(|source| {
                let compressed = self.compress(source)?;
                if let Ok(mut guard) = progress.lock() {
                    let (completed, callback) = &mut *guard;
                    *completed += 1;
                    callback(*completed, total);
                }
                Ok(compressed)
            })
            .collect()
    }
}

/// Compress sources sequentially with the given options, reporting progress
/// after each image.
pub fn compress_images_with_progress<F>(
    sources: Vec<SourceImage>,
    options: &CompressionOptions,
    on_progress: F,
) -> Result<Vec<CompressedImage>, CompressError>
where
    F: FnMut(usize, usize),
{
    Compressor::new(options.clone())?.compress_with_progress(sources, on_progress)
}
