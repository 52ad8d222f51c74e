//! astra db - Database subcommands

use clap::{Args, Subcommand};

pub mod sec_bundle;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Get secure bundle by database ID
    ///
    /// Gets the secure connection bundle for the database from your Astra
    /// account by ID.
    #[command(name = "secBundle")]
    SecBundle(sec_bundle::SecBundleArgs),
}

pub fn run(ctx: &AppContext, args: &DbArgs) -> Result<()> {
    match &args.command {
        DbCommand::SecBundle(args) => sec_bundle::run(ctx, args),
    }
}
