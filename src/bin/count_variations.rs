use asset_squeeze::application::{Application, ApplicationError, CountConfig};
use asset_squeeze::cli::CountCli;
use clap::Parser as _;
use tracing::debug;

#[snafu::report]
fn main() -> Result<(), ApplicationError> {
    let cli_args = CountCli::parse();
    cli_args.log_level.init_tracing();
    debug!("Parsed CLI arguments: {cli_args:?}");

    let rendered = Application::count_variations(CountConfig::from(cli_args))?;
    print!("{rendered}");

    Ok(())
}
