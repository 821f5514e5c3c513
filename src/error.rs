//! Error types for the drawing API
//!
//! Drawing calls return [`BenchError`] so app code can tell a bad coordinate
//! apart from a window that has already gone away. Application-level plumbing
//! (config loading, the presenter, `main`) uses `anyhow` on top of this.

use thiserror::Error;

/// Errors raised by the pixel mirror and the drawing API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BenchError {
    /// Point lies outside the logical drawing area
    #[error("point ({x}, {y}) is outside the {width}x{height} drawing area")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// The window was closed; no further drawing is possible
    #[error("the bench window has been closed")]
    Closed,

    /// No built-in app is registered under this name
    #[error("unknown app '{0}'")]
    UnknownApp(String),

    /// Colour string is not `#RRGGBB`
    #[error("invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),
}

pub type BenchResult<T> = std::result::Result<T, BenchError>;
