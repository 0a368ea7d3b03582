//! Image transcoders used by the compressor.
//!
//! JPEG files are re-encoded in-process. PNG files go through a
//! [`PngPipeline`]: palette quantization with an external `pngquant` when one
//! is available, lossless optimization otherwise or when quantization fails.

mod jpeg;
mod lossless_png;
mod png_compressor;
mod png_pipeline;
mod pngquant;
mod quality;

pub use jpeg::{JpegError, JpegReencoder};
pub use lossless_png::LosslessPng;
pub use png_compressor::{PngCompressionError, PngCompressor};
pub use png_pipeline::{PngOutcome, PngPipeline};
pub use pngquant::{Pngquant, QuantizeError};
pub(crate) use pngquant::is_executable;
#[cfg(all(test, target_family = "unix"))]
pub(crate) use pngquant::test_support as pngquant_test_support;
pub use quality::{QualityRange, QualityRangeError};
