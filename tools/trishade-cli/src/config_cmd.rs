//! Config command - show or initialize config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use trishade_core::{Config, config};

#[derive(Args)]
pub struct ConfigArgs {
    /// Write a config file with default values
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

pub fn execute(args: ConfigArgs, path: Option<PathBuf>, config: &Config) -> Result<()> {
    if args.init {
        let path = path.context("No config directory available on this platform")?;
        init(&path, args.force)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    match &path {
        Some(path) if path.exists() => println!("# {}", path.display()),
        Some(path) => println!("# {} (not found, using defaults)", path.display()),
        None => println!("# no config directory, using defaults"),
    }
    print!("{}", toml::to_string_pretty(config).context("Failed to serialize config")?);
    Ok(())
}

/// Write the default config to `path`, refusing to clobber it unless `force`.
fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    config::save_to(&Config::default(), path)
}
