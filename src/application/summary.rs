use std::fmt;

use crate::codecs::PngOutcome;
use crate::filesystem::FileKind;

/// Tally of one compression run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressionSummary {
    pub jpeg: usize,
    pub png_quantized: usize,
    pub png_lossless: usize,
    pub copied: usize,
    /// Images that failed to transcode and were copied unchanged.
    pub passed_through: usize,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Jpeg,
    Png(PngOutcome),
    Copied,
    PassedThrough(FileKind),
}

impl CompressionSummary {
    pub fn record(&mut self, outcome: FileOutcome, input_bytes: u64, output_bytes: u64) {
        match outcome {
            FileOutcome::Jpeg => self.jpeg += 1,
            FileOutcome::Png(PngOutcome::Quantized) => self.png_quantized += 1,
            FileOutcome::Png(PngOutcome::Lossless) => self.png_lossless += 1,
            FileOutcome::Copied => self.copied += 1,
            FileOutcome::PassedThrough(_) => self.passed_through += 1,
        }
        self.input_bytes += input_bytes;
        self.output_bytes += output_bytes;
    }

    pub fn total_files(&self) -> usize {
        self.jpeg + self.png_quantized + self.png_lossless + self.copied + self.passed_through
    }
}

impl fmt::Display for CompressionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} files ({} JPEG, {} PNG quantized, {} PNG lossless, {} copied, \
             {} passed through): {} -> {} bytes",
            self.total_files(),
            self.jpeg,
            self.png_quantized,
            self.png_lossless,
            self.copied,
            self.passed_through,
            self.input_bytes,
            self.output_bytes
        )
    }
}
