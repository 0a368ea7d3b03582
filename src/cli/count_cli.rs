use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::variations::{DEFAULT_BASE_DIR, DEFAULT_TABLE_NAME};

/// Count PNG variations in the A-Z and 0-9 folders of a directory and print
/// them as a lookup table literal.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct CountCli {
    /// Directory holding one folder per letter or digit
    #[clap(long, short, default_value = DEFAULT_BASE_DIR)]
    pub base: PathBuf,

    /// Name of the printed table
    #[clap(long, short, default_value = DEFAULT_TABLE_NAME)]
    pub name: String,

    /// Diagnostics printed to stderr. `error` and `silent` also hide
    /// warnings such as a missing base directory
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
