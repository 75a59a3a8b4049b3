//! Interactive viewer and editor for aircraft data files.

use clap::Parser;
use planedata::logging::{Verbosity, init_logging};
use planedata::session::Session;
use planedata::{StoreError, load_store};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Options {
    /// Path to the aircraft data file
    #[arg(env = "PLANEDATA_FILE", default_value = "plane_data.txt")]
    file: PathBuf,

    /// Increase log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let options = Options::parse();
    init_logging(Verbosity::from_flags(options.quiet, options.verbose));

    println!("Aircraft Information System");
    println!("------------------------------");

    // a missing file and an empty one are reported the same way
    let mut store = match load_store(&options.file) {
        Ok(decoded) => decoded.records,
        Err(err @ StoreError::Open { .. }) => {
            error!(error = %err, "could not load data file");
            println!("Error: Could not open file {}", options.file.display());
            Default::default()
        }
        Err(err) => return Err(err.into()),
    };

    if store.is_empty() {
        println!("Error: No plane data found or could not open file.");
        return Ok(ExitCode::FAILURE);
    }

    println!("Successfully loaded data for {} aircraft.", store.len());
    println!();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(&mut store, &options.file, stdin.lock(), stdout.lock()).run()?;

    Ok(ExitCode::SUCCESS)
}
