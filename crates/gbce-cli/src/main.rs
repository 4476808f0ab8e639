mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        tracing::error!(%error, exit_code = error.exit_code(), "command failed");
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let data = commands::run(&cli)?;
    output::render(&data, cli.format, cli.pretty)
}
