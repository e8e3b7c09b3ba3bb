//! Socrop command-line tool.

mod cli;
mod commands;
mod error;
mod script;

use clap::Parser;
use cli::{Cli, Command};
use error::CliError;
use serde::Serialize;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level() {
        builder.filter_level(level);
    }
    builder.init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Apply(args) => {
            let outcome = commands::run_apply(args)?;
            if let Some(export) = &outcome.export {
                log::info!("Saved to {}", export.asset.uri);
            }
            print_json(&outcome)
        }
        Command::Preview(args) => print_json(&commands::run_preview(args)?),
        Command::Presets(args) => {
            for preset in commands::run_presets(args) {
                let deltas: Vec<String> = preset
                    .adjustments
                    .iter()
                    .filter(|(_, v)| *v != 0)
                    .map(|(k, v)| format!("{k} {v:+}"))
                    .collect();
                println!(
                    "{:<14} {:<12} {:<8} {}",
                    preset.id,
                    preset.name,
                    preset.category,
                    deltas.join(", ")
                );
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
