use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Mirror a directory tree, recompressing JPEG and PNG images on the way.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct CompressCli {
    /// Directory to read assets from
    #[clap(long, short)]
    pub input: PathBuf,

    /// Directory to write the mirrored assets to
    #[clap(long, short)]
    pub output: PathBuf,

    /// JPEG quality (1-100)
    #[clap(long, default_value_t = 85, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: u8,

    /// Minimum PNG quantization quality (0-100)
    #[clap(long, default_value_t = 60, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub png_min: u8,

    /// Maximum PNG quantization quality (0-100)
    #[clap(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub png_max: u8,

    /// Quantizer executable to use instead of searching PATH for pngquant
    #[clap(long, conflicts_with = "no_quantize")]
    pub pngquant: Option<PathBuf>,

    /// Never quantize, optimize every PNG losslessly
    #[clap(long)]
    pub no_quantize: bool,

    /// Abort on the first image that cannot be transcoded
    #[clap(long)]
    pub strict: bool,

    /// Diagnostics printed to stderr. `error` and `silent` also hide
    /// warnings such as a missing pngquant or a per-file fallback to
    /// lossless PNG optimization
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
