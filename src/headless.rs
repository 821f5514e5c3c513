//! Windowless runner
//!
//! Runs an app against a bench nobody looks at and hands back the final
//! picture as text. The expose is simulated right away and there is no
//! linger, so the run takes exactly as long as the app.

use crate::app::{self, App};
use crate::bench::Bench;
use crate::config::BenchConfig;
use anyhow::{Context, Result};
use log::info;
use std::time::Duration;

/// Run `app` to completion and return the mirror as ASCII art
pub fn run(config: &BenchConfig, app: Box<dyn App>) -> Result<String> {
    let (width, height) = (config.window.width, config.window.height);
    let bench = Bench::headless(width, height);

    info!("🖥️ Headless bench {}x{}, running app '{}'", width, height, app.name());

    let worker = app::spawn(app, bench.clone(), Duration::ZERO, || {})?;
    let name = worker.name().to_string();

    bench.expose(config.window.clear_on_expose);

    // No window to close, so wait for as long as the app takes
    let result = worker
        .finish(Duration::MAX)
        .with_context(|| format!("App '{}' did not finish", name))?;
    result.with_context(|| format!("App '{}' failed", name))?;

    bench.close();
    Ok(bench.with_mirror(|m| m.to_ascii()))
}
