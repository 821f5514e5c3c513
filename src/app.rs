//! App routines and the worker thread that runs them
//!
//! An app is the code under test: it only sees a [`Bench`] and draws through
//! it. The worker waits for the start gate, runs the app once, keeps the
//! result on screen for a while and then tells the UI loop it is done.

use crate::bench::Bench;
use crate::canvas::Pen;
use crate::error::{BenchError, BenchResult};
use anyhow::{Context, Result};
use log::{error, info, warn};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Code driven by the bench on its worker thread
pub trait App: Send {
    fn name(&self) -> &str;

    fn run(&mut self, bench: &Bench) -> Result<()>;
}

/// Names accepted by [`builtin`]
pub const BUILTIN_APPS: &[&str] = &["cross", "probe"];

/// Look up a built-in app by name
pub fn builtin(name: &str) -> BenchResult<Box<dyn App>> {
    match name {
        "cross" => Ok(Box::new(Cross)),
        "probe" => Ok(Box::new(Probe)),
        other => Err(BenchError::UnknownApp(other.to_string())),
    }
}

/// Draws an X from the top corners down to the diagonal
#[derive(Debug, Default, Clone, Copy)]
pub struct Cross;

impl Cross {
    fn draw(bench: &Bench) -> Result<()> {
        let (width, height) = bench.get_dim();
        info!("Window is {} x {}", width, height);

        bench.clear_window()?;

        for x in 0..width as i32 {
            let y = x;
            if (y as u32) < height {
                bench.draw_point(x, y, Pen::Draw)?;
                bench.draw_point(width as i32 - x - 1, y, Pen::Draw)?;
            }
        }
        Ok(())
    }
}

impl App for Cross {
    fn name(&self) -> &str {
        "cross"
    }

    fn run(&mut self, bench: &Bench) -> Result<()> {
        Cross::draw(bench)
    }
}

/// Cross followed by a read-back of the top-left pixels
#[derive(Debug, Default, Clone, Copy)]
pub struct Probe;

impl App for Probe {
    fn name(&self) -> &str {
        "probe"
    }

    fn run(&mut self, bench: &Bench) -> Result<()> {
        Cross::draw(bench)?;

        let origin = bench.get_pixel(0, 0).context("reading pixel (0,0)")?;
        let (width, _) = bench.get_dim();
        if width > 1 {
            let next = bench.get_pixel(1, 0).context("reading pixel (1,0)")?;
            info!("Pixel(0,0)={}, Pixel(1,0)={}", origin, next);
        } else {
            info!("Pixel(0,0)={}", origin);
        }
        Ok(())
    }
}

/// Set once the worker closure is over, panics included
#[derive(Debug, Default)]
struct Done {
    flag: Mutex<bool>,
    cond: Condvar,
}

struct DoneGuard(Arc<Done>);

impl Drop for DoneGuard {
    fn drop(&mut self) {
        *self.0.flag.lock() = true;
        self.0.cond.notify_all();
    }
}

/// Handle to the app worker thread
#[derive(Debug)]
pub struct Worker {
    name: String,
    handle: JoinHandle<Result<()>>,
    done: Arc<Done>,
}

impl Worker {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Join the worker if it stops within `grace`.
    ///
    /// Returns `None` and leaves the thread detached when it is still running.
    pub fn finish(self, grace: Duration) -> Option<Result<()>> {
        let mut done = self.done.flag.lock();
        if !*done {
            self.done.cond.wait_while_for(&mut done, |done| !*done, grace);
        }
        if !*done {
            warn!("⏳ App '{}' still running, leaving it behind", self.name);
            return None;
        }
        drop(done);

        Some(match self.handle.join() {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!("app '{}' panicked", self.name)),
        })
    }
}

/// Start `app` on its own thread.
///
/// The thread waits on the bench's start gate, runs the app unless the bench
/// was closed first, lingers for `linger` and finally calls `on_finish`.
pub fn spawn<F>(
    mut app: Box<dyn App>,
    bench: Bench,
    linger: Duration,
    on_finish: F,
) -> Result<Worker>
where
    F: FnOnce() + Send + 'static,
{
    let name = app.name().to_string();
    let thread_name = format!("app-{}", name);
    let done = Arc::new(Done::default());
    let guard = DoneGuard(done.clone());

    let handle = thread::Builder::new()
        .name(thread_name)
        .spawn(move || {
            let _guard = guard;
            bench.gate().wait();

            let result = if bench.is_closed() {
                info!("Bench closed before app '{}' could start", app.name());
                Ok(())
            } else {
                info!("▶️ Running app '{}'", app.name());
                let result = app.run(&bench);
                match &result {
                    Ok(()) => info!("app '{}' returned..", app.name()),
                    Err(e) => error!("❌ App '{}' failed: {:#}", app.name(), e),
                }
                if !linger.is_zero() {
                    bench.linger(linger);
                }
                result
            };

            on_finish();
            result
        })
        .with_context(|| format!("Failed to spawn worker for app '{}'", name))?;

    Ok(Worker { name, handle, done })
}
