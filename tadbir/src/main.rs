use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;

use tadbir::app::{self, Outcome};
use tadbir::cli::Cli;
use tadbir::logging::init_tracing;
use tadbir::wiring;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Run failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let registry = Arc::new(wiring::default_registry()?);
    let outcome = app::run(cli, registry)?;
    print(cli, &outcome)
}

fn print(cli: &Cli, outcome: &Outcome) -> Result<(), Box<dyn Error>> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        print!("{outcome}");
    }
    Ok(())
}
