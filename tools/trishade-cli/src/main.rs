//! trishade - triangle shader tool
//!
//! # Commands
//!
//! - `trishade validate` - Check WGSL against the triangle binding contract
//! - `trishade eval` - Print the CPU reference outputs of both stages
//! - `trishade render` - Draw the triangle offscreen and save a PNG
//! - `trishade watch` - Re-validate (and re-render) a WGSL file on every save
//! - `trishade config` - Show or initialize `config.toml`
//!
//! # Usage
//!
//! ```bash
//! # Validate the built-in shader, or a file
//! trishade validate
//! trishade validate shaders/triangle.wgsl
//!
//! # Render a red triangle on white
//! trishade render --color "#ff0000" --background "#ffffff" -o red.png
//!
//! # Hot reload while editing
//! trishade watch shaders/triangle.wgsl -o preview.png
//! ```
//!
//! Set `RUST_LOG=debug` for more output.

mod config_cmd;
mod eval;
mod render;
mod validate;
mod watch;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use trishade_core::{Config, config};

/// trishade - solid-color triangle shader tool
#[derive(Parser)]
#[command(name = "trishade")]
#[command(about = "Validate, evaluate and render the solid-color triangle shader")]
#[command(version)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check WGSL against the triangle binding contract
    Validate(validate::ValidateArgs),

    /// Print the CPU reference outputs of both stages
    Eval(eval::EvalArgs),

    /// Draw the triangle offscreen and save a PNG
    Render(render::RenderArgs),

    /// Re-validate (and re-render) a WGSL file on every save
    Watch(watch::WatchArgs),

    /// Show or initialize config.toml
    Config(config_cmd::ConfigArgs),
}

impl Cli {
    /// Path of the config file in effect, if any.
    fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(config::config_path)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config_path();
    let config = config_path
        .as_deref()
        .map(config::load_from)
        .unwrap_or_else(Config::default);

    match cli.command {
        Commands::Validate(args) => validate::execute(args, &config),
        Commands::Eval(args) => eval::execute(args, &config),
        Commands::Render(args) => render::execute(args, config),
        Commands::Watch(args) => watch::execute(args, config),
        Commands::Config(args) => config_cmd::execute(args, config_path, &config),
    }
}
