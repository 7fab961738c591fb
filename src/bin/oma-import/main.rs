//! oma-import CLI - interactive importer for oma data artifacts

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

use oma_import::catalog::BazelLicenseQuery;
use oma_import::ops::{run_import, ImportOptions};
use oma_import::util::{Config, Prompter, Shell};

fn main() {
    if let Err(e) = run() {
        Shell::default().error(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("oma_import=debug")
    } else {
        EnvFilter::new("oma_import=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::new(cli.no_color);

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let config = Config::load(&cwd)?;
    let manifest_path = config.manifest_path(&cwd);

    // The license catalog query runs where the manifest lives.
    let workspace = manifest_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| cwd.clone());
    let license_source = BazelLicenseQuery::new(config.bazel_program(), &workspace);

    let opts = ImportOptions {
        dry_run: cli.dry_run,
        manifest_path,
        default_namespace: config.default_namespace().to_string(),
    };

    // One interactive session for the whole run; released on return.
    let mut prompter = Prompter::stdio();
    run_import(&mut prompter, &license_source, &shell, &opts)?;

    Ok(())
}
