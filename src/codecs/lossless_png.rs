use std::path::Path;

use compio::fs;
use oxipng::Options;
use snafu::ResultExt;
use tracing::debug;

use crate::codecs::PngCompressor;
use crate::codecs::png_compressor::{OptimizeSnafu, PngCompressionError, ReadSnafu, WriteSnafu};
use crate::ext::PathDisplayExt;

/// Lossless PNG re-encoding through `oxipng`.
#[derive(Debug, Clone)]
pub struct LosslessPng {
    options: Options,
}

impl LosslessPng {
    pub const DEFAULT_PRESET: u8 = 2;

    pub fn new(preset: u8) -> Self {
        Self {
            options: Options::from_preset(preset),
        }
    }

    pub fn optimize(&self, bytes: &[u8]) -> Result<Vec<u8>, oxipng::PngError> {
        oxipng::optimize_from_memory(bytes, &self.options)
    }
}

impl Default for LosslessPng {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PRESET)
    }
}

impl PngCompressor for LosslessPng {
    async fn compress(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<(), PngCompressionError> {
        let bytes = fs::read(source).await.context(ReadSnafu { path: source })?;
        let optimized = self
            .optimize(&bytes)
            .context(OptimizeSnafu { path: source })?;
        debug!(
            "Optimized {} losslessly: {} -> {} bytes",
            source.best_effort_display(),
            bytes.len(),
            optimized.len()
        );

        fs::write(destination, optimized)
            .await
            .0
            .context(WriteSnafu { path: destination })?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "oxipng"
    }
}
