//! Storage configuration.
//!
//! This module resolves where the local image store lives. Values are layered
//! with the `config` crate: built-in defaults, then an optional TOML file,
//! then `STASH_`-prefixed environment variables.

use crate::error::{Result, StashError};
use config::{Config as ConfigRs, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};


/// Environment variable prefix, e.g. `STASH_STORAGE__ROOT`.
const ENV_PREFIX: &str = "STASH";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub storage: Storage,
}

impl StoreConfig {
    /// Parses a `StoreConfig` from a TOML string, on top of the defaults.
    ///
    /// Environment overrides are not applied. This is primarily used for testing.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder()
            .add_source(ConfigRs::try_from(&StoreConfig::default())?)
            .add_source(File::from_str(s, FileFormat::Toml));

        Self::from_builder(builder, None)
    }

    /// Loads a `StoreConfig` from an optional file path plus environment overrides.
    ///
    /// When a path is given the file must exist and parse as TOML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigRs::builder()
            .add_source(ConfigRs::try_from(&StoreConfig::default())?);

        if let Some(p) = path {
            builder = builder.add_source(File::from(p).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        Self::from_builder(builder, path)
    }

    /// Creates a `StoreConfig` from a `config::ConfigBuilder` and validates it.
    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<&Path>,
    ) -> Result<Self> {
        let display_path = path.map(|p| p.display().to_string());
        let cfg: StoreConfig = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                StashError::config_with_source(
                    "Failed to load storage configuration".to_string(),
                    display_path.clone(),
                    e,
                )
            })?;

        cfg.validate(display_path)?;
        Ok(cfg)
    }

    fn validate(&self, path: Option<String>) -> Result<()> {
        if self.storage.driver.trim().is_empty() {
            return Err(StashError::config(
                "storage driver must not be empty".to_string(),
                path,
            ));
        }
        if self.storage.root.as_os_str().is_empty() {
            return Err(StashError::config(
                "storage root must not be empty".to_string(),
                path,
            ));
        }
        Ok(())
    }

    /// Directory holding `images.json` and per-image big-data items.
    ///
    /// # Examples
    ///
    /// ```
    /// use libstash::StoreConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(
    ///     config.images_dir(),
    ///     PathBuf::from("/var/lib/containers/storage/overlay-images")
    /// );
    /// ```
    pub fn images_dir(&self) -> PathBuf {
        self.storage
            .root
            .join(format!("{}-images", self.storage.driver))
    }
}

/// Storage location settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Storage {
    /// Graph driver name; selects the `<driver>-images` directory
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Storage root directory
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            root: default_root(),
        }
    }
}

fn default_driver() -> String {
    "overlay".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from("/var/lib/containers/storage")
}
