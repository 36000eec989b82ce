use std::process::ExitCode;

use clap::Parser;
use drupal_env_settings::{Cli, EnvSettingsError};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let builder = cli.project_builder();
    match builder.handle(&cli.command.into_action()) {
        Ok(result) => {
            println!("{result}");
            if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let EnvSettingsError::UnknownKeys(errors) = &e {
                for error in errors {
                    eprintln!("  {error}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
