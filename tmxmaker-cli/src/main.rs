use std::process::ExitCode;

use clap::Parser;
use tmxmaker_cli::{Args, CliError, Config, run};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<(), CliError> {
    let config = Config::load(Config::locate())?;
    let summary = run(args, &config)?;
    tracing::debug!(
        directories = summary.directories,
        units = summary.units,
        "done"
    );
    Ok(())
}
