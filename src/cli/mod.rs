//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;

/// astra - manage cloud databases from the command line
#[derive(Parser, Debug)]
#[command(name = "astra", version, about, propagate_version = true)]
pub struct Cli {
    /// Path to a config file (defaults to the user config dir)
    #[arg(long, global = true, env = "ASTRA_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default tracing filter for the requested verbosity.
    ///
    /// Warnings always reach stderr so release failures stay visible.
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "warn,astra=info",
            1 => "info,astra=debug",
            2 => "debug,astra=trace",
            _ => "trace",
        }
    }
}
