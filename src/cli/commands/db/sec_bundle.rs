//! astra db secBundle - Fetch the secure connection bundle for a database

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use reqwest::blocking::{Client, Response};
use tracing::{debug, info, warn};

use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::error::{AstraError, Result};
use crate::ops::{DatabaseService, SecureBundle};

pub const DEFAULT_LOCATION: &str = "secureBundle.zip";

#[derive(Args, Debug)]
pub struct SecBundleArgs {
    /// Database ID
    pub id: String,

    /// Output format for the bundle
    #[arg(short = 'o', long, value_enum, default_value_t = BundleFormat::Zip)]
    pub output: BundleFormat,

    /// Location to download the bundle to when using zip format (ignored for json)
    #[arg(short = 'l', long, value_name = "PATH", default_value = DEFAULT_LOCATION)]
    pub location: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BundleFormat {
    /// Download the bundle archive to --location
    Zip,
    /// Print the bundle descriptor as JSON
    Json,
}

pub fn run(ctx: &AppContext, args: &SecBundleArgs) -> Result<()> {
    let client = ctx.login().map_err(|e| AstraError::Login(Box::new(e)))?;
    let http = ctx.http_client()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&client, &http, args, &mut out)
}

/// Look up the bundle and dispatch on the output format.
pub fn execute<S, W>(service: &S, http: &Client, args: &SecBundleArgs, out: &mut W) -> Result<()>
where
    S: DatabaseService + ?Sized,
    W: Write,
{
    debug!(id = %args.id, format = ?args.output, "fetching secure bundle");
    let bundle = service
        .get_secure_bundle(&args.id)
        .map_err(|e| AstraError::BundleLookup {
            id: args.id.clone(),
            source: Box::new(e),
        })?;

    match args.output {
        BundleFormat::Zip => {
            let written = save_zip(http, &bundle, &args.location)?;
            writeln!(
                out,
                "file {} saved {written} bytes written",
                args.location.display()
            )?;
            Ok(())
        }
        BundleFormat::Json => emit_json(out, &bundle),
    }
}

/// Stream the bundle archive to `location`, returning the bytes written.
///
/// A partially written file is removed when the copy fails.
pub fn save_zip(http: &Client, bundle: &SecureBundle, location: &Path) -> Result<u64> {
    let mut response = http
        .get(&bundle.download_url)
        .send()
        .and_then(Response::error_for_status)
        .map_err(AstraError::Download)?;
    debug!(status = %response.status(), "download started");

    let mut file = File::create(location).map_err(|source| AstraError::CreateFile {
        path: location.to_path_buf(),
        source,
    })?;

    let written = match io::copy(&mut response, &mut file) {
        Ok(written) => written,
        Err(source) => {
            drop(file);
            discard_partial(location);
            return Err(AstraError::CopyFile {
                path: location.to_path_buf(),
                source,
            });
        }
    };

    release_file(file, location);
    info!(path = %location.display(), bytes = written, "bundle saved");
    Ok(written)
}

fn release_file(file: File, location: &Path) {
    if let Err(err) = file.sync_all() {
        warn!(
            path = %location.display(),
            error = %err,
            "error closing file"
        );
    }
}

fn discard_partial(location: &Path) {
    if let Err(err) = std::fs::remove_file(location) {
        warn!(
            path = %location.display(),
            error = %err,
            "unable to remove partial download"
        );
    }
}
