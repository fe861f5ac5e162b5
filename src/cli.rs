use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fixprov")]
#[command(about = "Provision deterministic filesystem fixtures for test runs \
                   from a declarative TOML manifest.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create every fixture the manifest describes.
    Provision {
        /// Path to the fixture manifest (TOML).
        manifest: PathBuf,

        /// Resolve fixture paths against this directory instead of the
        /// directory containing the manifest.
        #[arg(short = 'C', long = "base-dir")]
        base_dir: Option<PathBuf>,
    },

    /// Remove the fixtures named by the manifest.
    Clean {
        /// Path to the fixture manifest (TOML).
        manifest: PathBuf,

        /// Resolve fixture paths against this directory instead of the
        /// directory containing the manifest.
        #[arg(short = 'C', long = "base-dir")]
        base_dir: Option<PathBuf>,

        /// Also remove fixture directories that still hold entries the
        /// manifest does not know about.
        #[arg(long)]
        force: bool,
    },

    /// Check the on-disk tree against the manifest without touching it.
    Verify {
        /// Path to the fixture manifest (TOML).
        manifest: PathBuf,

        /// Resolve fixture paths against this directory instead of the
        /// directory containing the manifest.
        #[arg(short = 'C', long = "base-dir")]
        base_dir: Option<PathBuf>,
    },
}
