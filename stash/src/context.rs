//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Environment variables
//! 3. CLI flags
//!
//! Storage settings are only resolved when a command opens the store, so
//! `version` and `completion` work without a readable configuration.

use crate::format::ColorChoice;
use libstash::{Stash, StashBuilder};
use std::env;
use std::path::PathBuf;

/// Verbosity of user-facing diagnostics, from repeated `-v` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    Normal,
    Verbose,
    VeryVerbose,
    Trace,
}

impl VerbosityLevel {
    /// Map a `-v` count to a level; counts past three saturate at `Trace`
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Normal,
            1 => VerbosityLevel::Verbose,
            2 => VerbosityLevel::VeryVerbose,
            _ => VerbosityLevel::Trace,
        }
    }

    /// Default `tracing` filter directive for this level
    pub fn log_directive(self) -> &'static str {
        match self {
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "info",
            VerbosityLevel::VeryVerbose => "debug",
            VerbosityLevel::Trace => "trace",
        }
    }
}

/// Storage flags given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageOverrides {
    /// Explicit configuration file (`--config`)
    pub config: Option<PathBuf>,
    /// Storage root (`--root`)
    pub root: Option<PathBuf>,
    /// Storage driver (`--storage-driver`)
    pub driver: Option<String>,
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved color choice
    pub color: ColorChoice,
    /// Resolved verbosity
    pub verbosity: VerbosityLevel,
    /// Storage settings, applied when the store is opened
    pub storage: StorageOverrides,
}

impl AppContext {
    /// Build context with precedence: defaults > env vars > CLI flags
    pub fn build(
        cli_color: Option<ColorChoice>,
        verbosity: VerbosityLevel,
        storage: StorageOverrides,
    ) -> Self {
        // 1. Start with defaults
        let mut color = ColorChoice::Auto;

        // 2. Apply environment variable overrides
        if let Ok(value) = env::var("STASH_COLOR") {
            color = ColorChoice::from(value.as_str());
        }

        // 3. Apply CLI flag overrides (highest priority)
        if let Some(cli_color) = cli_color {
            color = cli_color;
        }

        Self {
            color,
            verbosity,
            storage,
        }
    }

    /// Configuration file to load, if any
    ///
    /// `--config` wins over `STASH_CONFIG`. The default location is only
    /// used when the file exists.
    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.storage.config {
            return Some(path.clone());
        }
        if let Ok(path) = env::var("STASH_CONFIG") {
            return Some(PathBuf::from(path));
        }
        default_config_path().filter(|p| p.is_file())
    }

    /// Open the image store described by the resolved settings
    pub fn open_stash(&self) -> libstash::Result<Stash> {
        let mut builder = StashBuilder::new();
        if let Some(path) = self.config_path() {
            builder = builder.config_file(path);
        }
        if let Some(root) = &self.storage.root {
            builder = builder.root(root);
        }
        if let Some(driver) = &self.storage.driver {
            builder = builder.driver(driver.as_str());
        }
        builder.build()
    }
}

/// Default configuration location, `~/.config/stash/storage.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stash").join("storage.toml"))
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
