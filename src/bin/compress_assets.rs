use asset_squeeze::application::{Application, ApplicationError, CompressConfig, configure_colors};
use asset_squeeze::cli::CompressCli;
use clap::Parser as _;
use tracing::debug;

#[compio::main]
#[snafu::report]
async fn main() -> Result<(), ApplicationError> {
    let cli_args = CompressCli::parse();
    cli_args.log_level.init_tracing();
    configure_colors();
    debug!("Parsed CLI arguments: {cli_args:?}");

    let summary = Application::compress(CompressConfig::from(cli_args)).await?;
    println!("{summary}");

    Ok(())
}
