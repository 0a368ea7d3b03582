use std::path::PathBuf;

use crate::cli::{CompressCli, CountCli};

/// Where the PNG quantizer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizerSource {
    /// Search the executable path.
    Discover,
    Explicit(PathBuf),
    Disabled,
}

#[derive(Debug, Clone)]
pub struct CompressConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub jpeg_quality: u8,
    pub png_min: u8,
    pub png_max: u8,
    pub quantizer: QuantizerSource,
    /// Abort on the first file that cannot be transcoded instead of copying
    /// it unchanged.
    pub strict: bool,
}

impl CompressConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            jpeg_quality: 85,
            png_min: 60,
            png_max: 80,
            quantizer: QuantizerSource::Discover,
            strict: false,
        }
    }
}

impl From<CompressCli> for CompressConfig {
    fn from(cli: CompressCli) -> Self {
        let quantizer = match (cli.no_quantize, cli.pngquant) {
            (true, _) => QuantizerSource::Disabled,
            (false, Some(path)) => QuantizerSource::Explicit(path),
            (false, None) => QuantizerSource::Discover,
        };

        Self {
            input: cli.input,
            output: cli.output,
            jpeg_quality: cli.jpeg_quality,
            png_min: cli.png_min,
            png_max: cli.png_max,
            quantizer,
            strict: cli.strict,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CountConfig {
    pub base: PathBuf,
    pub name: String,
}

impl From<CountCli> for CountConfig {
    fn from(cli: CountCli) -> Self {
        Self {
            base: cli.base,
            name: cli.name,
        }
    }
}
