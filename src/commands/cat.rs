//! Cat command implementation

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use assetmount::Resolver;
use assetmount::bundle::open_bundle;
use assetmount::error::{self, Result};

use crate::cli::CatArgs;
use crate::commands::helpers::load_settings;

/// Run cat command
pub fn run(config: Option<PathBuf>, args: CatArgs) -> Result<ExitCode> {
    let settings = load_settings(config.as_deref(), args.overrides())?;
    let bundle = open_bundle(&settings.bundle)?;
    let mount_root = settings.mount_root()?;

    let resolver = Resolver::new(bundle.as_ref(), mount_root).lazy(settings.lazy);
    let bytes = resolver.read(&args.path)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&bytes)
        .and_then(|()| stdout.flush())
        .map_err(|e| error::fs::io_error(format!("Failed to write to stdout: {e}")))?;

    Ok(ExitCode::SUCCESS)
}
