use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use city_radius::data::read_store_from_file;
use city_radius::session::{OutputFormat, Session};
use clap::Parser;
use log::info;

/// Interactive radius search over a file of named coordinates.
#[derive(Debug, Parser)]
#[command(name = "city_radius", version)]
struct Cli {
    /// File of two-line records: a name, then "<north>, <east>"
    #[arg(short, long, default_value = "data.txt")]
    data: PathBuf,
    /// How each search result is printed
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn run(cli: Cli) -> Result<()> {
    let store = read_store_from_file(&cli.data)
        .with_context(|| format!("failed to load points from {}", cli.data.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&store, stdin.lock(), stdout.lock(), cli.format);
    let answered = session.run()?;
    session.into_output().flush()?;

    info!("answered {} queries", answered);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
