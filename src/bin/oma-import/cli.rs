//! CLI definitions using clap.

use clap::Parser;

/// Interactively import a data artifact into MODULE.bazel
#[derive(Parser)]
#[command(name = "oma-import")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print the generated stanza without modifying the manifest
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
