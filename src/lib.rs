//! # guibench - a single-window pixel test bench
//!
//! Opens one window, gives a separately written app routine a tiny drawing
//! API and pumps window events on the main thread while the app runs on a
//! worker thread.
//!
//! ## Architecture
//!
//! - `canvas`: pixel mirror, pens and colours
//! - `gate`: one-shot startup gate released by the first expose
//! - `bench`: the shared drawing handle and its mutex
//! - `app`: the app trait, built-in apps and the worker thread
//! - `input`: key commands and click drawing
//! - `window`: winit + pixels presenter and UI event loop
//! - `headless`: windowless runner
//! - `config`: configuration parsing and management
//!
//! ## Usage
//!
//! ```rust,no_run
//! use guibench::{app, headless, BenchConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = BenchConfig::default();
//!     let picture = headless::run(&config, app::builtin("cross")?)?;
//!     print!("{}", picture);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod bench;
pub mod canvas;
pub mod config;
pub mod error;
pub mod gate;
pub mod headless;
pub mod input;
pub mod window;

// Re-export main types for easy access
pub use app::App;
pub use bench::Bench;
pub use canvas::{Color, Pen, PixelMirror};
pub use config::BenchConfig;
pub use error::{BenchError, BenchResult};
pub use window::ExitReason;

/// Version information for guibench
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
