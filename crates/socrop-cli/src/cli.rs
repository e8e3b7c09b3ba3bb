//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use socrop_core::{ExportFormat, ExportQuality};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "socrop",
    version,
    about = "Replay photo edits and export the result",
    long_about = "Replay a JSON edit script against the Socrop editing engine.\n\n\
                  Scripts drive the same operations as the editor UI: adjustments,\n\
                  filters, text, drawing, rotation, crop, undo and redo."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less log output (-q errors only, -qq silent).
    #[arg(short, long, action = clap::ArgAction::Count, global = true, conflicts_with = "verbose")]
    pub quiet: u8,
}

impl Cli {
    /// Log level from the flags, or `None` to defer to `RUST_LOG`.
    pub fn log_level(&self) -> Option<LevelFilter> {
        match (self.verbose, self.quiet) {
            (0, 0) => None,
            (0, 1) => Some(LevelFilter::Error),
            (0, _) => Some(LevelFilter::Off),
            (1, _) => Some(LevelFilter::Info),
            (2, _) => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay an edit script and export the result to the gallery.
    Apply(ApplyArgs),

    /// Replay an edit script and print the preview model as JSON.
    Preview(PreviewArgs),

    /// List the built-in filter presets.
    Presets(PresetsArgs),
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Path to the JSON edit script.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Session configuration file (JSON).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory exported photos are saved into.
    #[arg(long, value_name = "DIR")]
    pub gallery: Option<PathBuf>,

    /// Output format: jpeg, png or webp.
    #[arg(long)]
    pub format: Option<ExportFormat>,

    /// Output quality: max, high, medium or low.
    #[arg(long)]
    pub quality: Option<ExportQuality>,

    /// Output width in pixels (0 keeps the original size).
    #[arg(long, value_name = "PX")]
    pub max_size: Option<u32>,

    /// Plan the export without rendering or saving anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the final editor state as JSON.
    #[arg(long)]
    pub print_state: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Path to the JSON edit script.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Session configuration file (JSON).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Width of the viewport the preview is laid out for.
    #[arg(long, value_name = "PX", default_value_t = 390.0)]
    pub viewport: f64,
}

#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Only list presets in this category.
    #[arg(long, default_value = "All")]
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply() {
        let cli = Cli::parse_from([
            "socrop",
            "-vv",
            "apply",
            "edit.json",
            "--format",
            "png",
            "--quality",
            "high",
            "--max-size",
            "1080",
            "--dry-run",
        ]);
        assert_eq!(cli.log_level(), Some(LevelFilter::Debug));
        let Command::Apply(args) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(args.format, Some(ExportFormat::Png));
        assert_eq!(args.quality, Some(ExportQuality::High));
        assert_eq!(args.max_size, Some(1080));
        assert!(args.dry_run);
        assert!(!args.print_state);
    }

    #[test]
    fn test_log_levels() {
        let quiet = Cli::parse_from(["socrop", "-q", "presets"]);
        assert_eq!(quiet.log_level(), Some(LevelFilter::Error));
        let default = Cli::parse_from(["socrop", "presets"]);
        assert_eq!(default.log_level(), None);
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(Cli::try_parse_from(["socrop", "apply", "x.json", "--format", "gif"]).is_err());
    }
}
