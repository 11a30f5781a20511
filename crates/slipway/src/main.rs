//! Slipway CLI - assemble a deployable website from a game build.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "slipway")]
#[command(about = "Assemble a deployable website from a pre-built WASM game")]
#[command(version)]
pub struct Cli {
    /// Path to a build of the game (defaults to config or "build")
    #[arg(short, long)]
    game_build_path: Option<PathBuf>,

    /// Path to where the website should be built (defaults to config or "build-website")
    #[arg(short, long)]
    build_path: Option<PathBuf>,

    /// Upgrade a leading http scheme in URL to https
    #[arg(long)]
    force_url_https: bool,

    /// Delete the destination directory before rebuilding
    #[arg(long)]
    clear_first: bool,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    commands::build::run(cli)?;

    Ok(())
}
