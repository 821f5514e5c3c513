//! # guibench - single-window pixel test bench
//!
//! Opens a window, runs the selected app on a worker thread and pumps window
//! events on the main thread until the app is done or the user quits.
//!
//! Keys: `q` quits, `c` clears the window, `x` toggles the pen between draw
//! and erase. Clicking draws a point with the current pen.

use anyhow::{Context, Result};
use clap::Parser;
use guibench::config::{expand_path, MAX_MULTIPLIER};
use guibench::{app, headless, window, BenchConfig};
use log::{error, info};
use std::process::ExitCode;

const DEFAULT_CONFIG_PATH: &str = "~/.config/guibench/guibench.toml";

#[derive(Parser)]
#[command(name = "guibench")]
#[command(about = "A single-window pixel test bench for GUI drawing code")]
#[command(version)]
struct Cli {
    /// Number of screen pixels per logical pixel (default 1)
    #[arg(short = 'm', long = "multi", value_parser = clap::value_parser!(u32).range(1..=MAX_MULTIPLIER as i64))]
    multi: Option<u32>,

    /// Number of logical pixels wide (default 192)
    #[arg(short = 'x', long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Number of logical pixels high (default 192)
    #[arg(short = 'y', long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Built-in app to run: cross, probe
    #[arg(short, long)]
    app: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Milliseconds to keep the result on screen after the app returns
    #[arg(long)]
    linger_ms: Option<u64>,

    /// Run without a window and print the final picture
    #[arg(long)]
    headless: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn load_config(path: &str) -> Result<BenchConfig> {
    let expanded = expand_path(path)?;
    if !expanded.exists() {
        info!("📝 No config at {}, using defaults", expanded.display());
        return Ok(BenchConfig::default());
    }

    match BenchConfig::load(&expanded) {
        Ok(config) => {
            info!("✅ Configuration loaded from: {}", expanded.display());
            Ok(config)
        }
        Err(e) => {
            error!("❌ Failed to load configuration: {:#}", e);
            info!("📝 Using default configuration");
            Ok(BenchConfig::default())
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    info!("🚀 Starting guibench {}", guibench::VERSION);

    let mut config = load_config(&cli.config)?;

    // Override config with CLI flags
    if let Some(multi) = cli.multi {
        config.window.multiplier = multi;
    }
    if let Some(width) = cli.width {
        config.window.width = width;
    }
    if let Some(height) = cli.height {
        config.window.height = height;
    }
    if let Some(name) = cli.app {
        config.app.name = name;
    }
    if let Some(linger_ms) = cli.linger_ms {
        config.app.linger_ms = linger_ms;
    }

    config.validate().context("Invalid settings")?;
    let app = app::builtin(&config.app.name)?;

    if cli.headless {
        let picture = headless::run(&config, app)?;
        print!("{}", picture);
        return Ok(ExitCode::SUCCESS);
    }

    let reason = window::run(&config, app)?;
    Ok(ExitCode::from(reason.exit_code()))
}
