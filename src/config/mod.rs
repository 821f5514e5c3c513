//! Configuration management for guibench
//!
//! Settings come from an optional TOML file; command-line flags are applied
//! on top in `main`. Every section falls back to its defaults, so a file may
//! set a single key.

use crate::app::BUILTIN_APPS;
use crate::canvas::Color;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest accepted pixel multiplier
pub const MAX_MULTIPLIER: u32 = 64;

/// Largest accepted on-screen window side, in physical pixels
pub const MAX_WINDOW_SIDE: u32 = 16384;

/// Main configuration struct containing all bench settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BenchConfig {
    /// Window geometry and behaviour
    #[serde(default)]
    pub window: WindowConfig,

    /// Pixel colours
    #[serde(default)]
    pub colors: ColorConfig,

    /// App selection and lifecycle
    #[serde(default)]
    pub app: AppConfig,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Logical width (pixels)
    pub width: u32,

    /// Logical height (pixels)
    pub height: u32,

    /// On-screen pixels per logical pixel, along each axis
    pub multiplier: u32,

    /// Window title
    pub title: String,

    /// Wipe the mirror whenever the window system asks for a repaint.
    /// Set to `false` to keep the picture across exposes.
    pub clear_on_expose: bool,
}

/// Colours used to paint the mirror
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    /// Colour of lit pixels (hex: #RRGGBB)
    pub foreground: String,

    /// Colour of unlit pixels (hex: #RRGGBB)
    pub background: String,
}

/// App configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Built-in app to run
    pub name: String,

    /// Pause after the app returns before the window closes (milliseconds)
    pub linger_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 192,
            height: 192,
            multiplier: 1,
            title: String::from("GUI Bench"),
            clear_on_expose: true,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            foreground: String::from("#000000"),
            background: String::from("#FFFFFF"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: String::from("cross"),
            linger_ms: 3000,
        }
    }
}

impl WindowConfig {
    /// On-screen window size in physical pixels
    pub fn physical_size(&self) -> (u32, u32) {
        (
            self.width.saturating_mul(self.multiplier),
            self.height.saturating_mul(self.multiplier),
        )
    }
}

impl ColorConfig {
    pub fn foreground(&self) -> Result<Color> {
        self.foreground
            .parse()
            .context("Invalid foreground colour")
    }

    pub fn background(&self) -> Result<Color> {
        self.background
            .parse()
            .context("Invalid background colour")
    }
}

impl AppConfig {
    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.linger_ms)
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.to_string_lossy().starts_with('~') {
        let home = std::env::var("HOME").context("Failed to get HOME environment variable")?;
        let rest = path.strip_prefix("~").unwrap_or(path);
        Ok(Path::new(&home).join(rest))
    } else {
        Ok(path.to_path_buf())
    }
}

impl BenchConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let expanded_path = expand_path(path)?;

        let contents = fs::read_to_string(&expanded_path)
            .with_context(|| format!("Failed to read config file: {}", expanded_path.display()))?;

        let config: BenchConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", expanded_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let window = &self.window;

        if window.width == 0 || window.height == 0 {
            anyhow::bail!(
                "Invalid window size {}x{}: both sides must be at least 1",
                window.width,
                window.height
            );
        }

        if window.multiplier == 0 || window.multiplier > MAX_MULTIPLIER {
            anyhow::bail!(
                "Invalid multiplier {}: must be between 1 and {}",
                window.multiplier,
                MAX_MULTIPLIER
            );
        }

        let (phys_w, phys_h) = window.physical_size();
        if phys_w > MAX_WINDOW_SIDE || phys_h > MAX_WINDOW_SIDE {
            anyhow::bail!(
                "Window of {}x{} pixels is too large (limit {} per side)",
                phys_w,
                phys_h,
                MAX_WINDOW_SIDE
            );
        }

        self.colors.foreground()?;
        self.colors.background()?;

        if !BUILTIN_APPS.contains(&self.app.name.as_str()) {
            anyhow::bail!(
                "Unknown app '{}' (available: {})",
                self.app.name,
                BUILTIN_APPS.join(", ")
            );
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, contents).context("Failed to write configuration file")?;

        Ok(())
    }
}
