// src/bin/cmdkit.rs

use cmdkit::{
    cli::{self, Cli, dispatcher::Dispatcher, logging, properties},
    constants::SENTINEL_CODE,
    context::ExecutionContext,
    errors::CliError,
    models::ExecutionOutcome,
    samples,
};
use colored::*;
use std::env;
use std::io;

/// The main entry point of the `cmdkit` binary.
/// It sets up logging, reads the properties file, parses arguments, dispatches
/// to the registered command and turns the outcome into the process exit code.
fn main() {
    if let Err(e) = logging::init() {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(SENTINEL_CODE);
    }

    let color = colored::control::SHOULD_COLORIZE.should_colorize();
    let registry = samples::registry();
    let argv: Vec<String> = env::args().collect();

    let args = match cli::launcher_args(&registry, &argv) {
        Some(args) => args,
        None => match Cli::parse_with(&registry, argv, color) {
            Ok(parsed) => parsed.args,
            // Prints clap's help, version or usage error and exits accordingly.
            Err(e) => e.exit(),
        },
    };

    let version = properties::discover_version().or_else(|| Some(env!("CARGO_PKG_VERSION").to_string()));
    let dispatcher = Dispatcher::new(registry)
        .with_version(version)
        .with_color(color);

    match run_cli(&dispatcher, &args) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            log::debug!("Dispatch failed: {:?}", e);
            eprintln!("\n{}: {}", "Error".red().bold(), e);
            std::process::exit(e.return_code());
        }
    }
}

/// Runs one dispatch against the real process streams.
fn run_cli(dispatcher: &Dispatcher, args: &[String]) -> Result<ExecutionOutcome, CliError> {
    let current_path = env::current_dir()?;
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let mut ctx = ExecutionContext::new(current_path, &mut stdout, &mut stderr);
    dispatcher.dispatch(args, &mut ctx)
}
