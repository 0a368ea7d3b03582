mod application_impl;
mod asset_compressor;
pub mod data;
mod progress;
mod runtime_config;
mod summary;

pub use application_impl::{Application, ApplicationError};
pub use asset_compressor::{AssetCompressor, ProcessError};
pub use progress::{configure_colors, print_progress};
pub use runtime_config::{CompressConfig, CountConfig, QuantizerSource};
pub use summary::{CompressionSummary, FileOutcome};
