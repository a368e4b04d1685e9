use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use wmo_header::cli::{args::Args, commands};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        let _ = Args::command().print_help();
        println!();
        return ExitCode::SUCCESS;
    }

    if let Err(error) = commands::shared::setup_logging(&args) {
        eprintln!("Failed to initialize logging: {}", error);
        return ExitCode::FAILURE;
    }

    match commands::run(args) {
        Ok(code) => code,
        Err(error) => {
            // Print the full context chain to stderr
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
