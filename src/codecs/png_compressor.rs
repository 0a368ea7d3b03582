use std::path::{Path, PathBuf};

use snafu::Snafu;

use crate::codecs::QuantizeError;
use crate::ext::PathDisplayExt;

/// A way of shrinking a PNG file from `source` into `destination`.
pub trait PngCompressor {
    async fn compress(&self, source: &Path, destination: &Path)
    -> Result<(), PngCompressionError>;

    /// Short name used in log messages.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PngCompressionError {
    #[snafu(display("Failed to read {}", path.best_effort_display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write {}", path.best_effort_display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to optimize {}", path.best_effort_display()))]
    OptimizeError {
        path: PathBuf,
        source: oxipng::PngError,
    },
    #[snafu(display("Quantization failed"))]
    QuantizationError { source: QuantizeError },
}

impl PngCompressionError {
    /// Whether the failure lies in the image data rather than in the
    /// filesystem.
    pub fn is_transcode_failure(&self) -> bool {
        matches!(
            self,
            PngCompressionError::OptimizeError { .. } | PngCompressionError::QuantizationError { .. }
        )
    }
}
