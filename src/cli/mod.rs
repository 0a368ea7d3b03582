mod compress_cli;
mod count_cli;

pub use compress_cli::CompressCli;
pub use count_cli::CountCli;
