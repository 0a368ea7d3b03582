use std::path::Path;

use derive_more::Display;
use tracing::{debug, warn};

use crate::codecs::{LosslessPng, PngCompressionError, PngCompressor, Pngquant};
use crate::ext::PathDisplayExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PngOutcome {
    #[display("quantized")]
    Quantized,
    #[display("lossless")]
    Lossless,
}

/// Quantizes when a quantizer is available and falls back to lossless
/// optimization per file when it is absent or fails.
#[derive(Debug, Clone)]
pub struct PngPipeline {
    quantizer: Option<Pngquant>,
    lossless: LosslessPng,
}

impl PngPipeline {
    pub fn new(quantizer: Option<Pngquant>, lossless: LosslessPng) -> Self {
        Self {
            quantizer,
            lossless,
        }
    }

    pub fn lossless_only() -> Self {
        Self::new(None, LosslessPng::default())
    }

    pub fn quantizer(&self) -> Option<&Pngquant> {
        self.quantizer.as_ref()
    }

    pub async fn compress(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<PngOutcome, PngCompressionError> {
        if let Some(quantizer) = &self.quantizer {
            match quantizer.compress(source, destination).await {
                Ok(()) => return Ok(PngOutcome::Quantized),
                Err(err) => warn!(
                    "{} failed on {}; falling back to {}: {}",
                    quantizer.name(),
                    source.file_name_display(),
                    self.lossless.name(),
                    snafu::Report::from_error(err)
                ),
            }
        } else {
            debug!(
                "No quantizer, optimizing {} losslessly",
                source.best_effort_display()
            );
        }

        self.lossless.compress(source, destination).await?;
        Ok(PngOutcome::Lossless)
    }
}
