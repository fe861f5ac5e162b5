use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use fixprov::cli::{Cli, Command};
use fixprov::manifest::Manifest;
use fixprov::provision;

fn main() -> Result<()> {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Provision { manifest, base_dir } => {
            let (base, spec) = load(&manifest, base_dir)?;
            provision::provision(&base, &spec)?;
            println!("Provisioned {} entries under {}", spec.entries.len(), base.display());
        }
        Command::Clean {
            manifest,
            base_dir,
            force,
        } => {
            let (base, spec) = load(&manifest, base_dir)?;
            provision::clean(&base, &spec, force)?;
            println!("Cleaned fixtures under {}", base.display());
        }
        Command::Verify { manifest, base_dir } => {
            let (base, spec) = load(&manifest, base_dir)?;
            let report = provision::verify(&base, &spec)?;
            if !report.is_clean() {
                for m in &report.mismatches {
                    eprintln!("{}", m);
                }
                bail!(
                    "{} fixture(s) do not match the manifest",
                    report.mismatches.len()
                );
            }
            println!("Fixtures match the manifest");
        }
    }
    Ok(())
}

fn load(
    manifest: &std::path::Path,
    base_dir: Option<PathBuf>,
) -> Result<(PathBuf, fixprov::manifest::FixtureSpec)> {
    let m = Manifest::load(manifest)?;
    Ok((base_dir.unwrap_or(m.base_dir), m.spec))
}
