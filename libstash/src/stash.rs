//! High-level API for the Stash library.
//!
//! This module ties the listing pipeline together: compile the filter, ask
//! the store for matching images, build display rows, pick a format and
//! render it.
//!
//! # Examples
//!
//! ```no_run
//! use libstash::{RenderOptions, Stash};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stash = Stash::builder().root("/var/lib/containers/storage").build()?;
//!
//!     let output = stash.images(&RenderOptions::default())?;
//!     print!("{}", String::from_utf8_lossy(&output));
//!     Ok(())
//! }
//! ```

use crate::config::StoreConfig;
use crate::error::{Result, StashError};
use crate::filter;
use crate::render::{Render, RenderOptions, Renderer, resolve_format};
use crate::report::{DisplayRow, build_rows};
use crate::store::{ImageStore, LocalStore};
use std::path::PathBuf;

#[cfg(test)]
#[path = "stash_tests.rs"]
mod tests;

/// Read-only view over an image store.
///
/// `Stash` owns a store handle and runs listings against it. Any
/// [`ImageStore`] can back it; [`Stash::open`] and [`StashBuilder`] use the
/// on-disk [`LocalStore`].
pub struct Stash<S: ImageStore = LocalStore> {
    store: S,
}

impl Stash<LocalStore> {
    /// Opens the local store described by `config`.
    pub fn open(config: &StoreConfig) -> Self {
        tracing::debug!(images_dir = %config.images_dir().display(), "opening image store");
        Self {
            store: LocalStore::open(config),
        }
    }

    /// Creates a builder for custom configuration.
    pub fn builder() -> StashBuilder {
        StashBuilder::new()
    }
}

impl<S: ImageStore> Stash<S> {
    /// Wraps an existing store.
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists the images selected by `opts` as display rows.
    ///
    /// # Errors
    ///
    /// Returns a filter syntax error for a malformed `opts.filter`, or a
    /// store error when the image index cannot be read. Per-image metadata
    /// failures only degrade the affected row.
    pub fn rows(&self, opts: &RenderOptions) -> Result<Vec<DisplayRow>> {
        let params = filter::compile(&self.store, opts.filter.as_deref())?;
        if let Some(expr) = opts.filter.as_deref() {
            tracing::debug!(filter = expr, "compiled filter");
        }

        let images = self
            .store
            .list_images(params.as_ref(), opts.name.as_deref())?;
        tracing::debug!(count = images.len(), "images matched");

        Ok(build_rows(&self.store, &images, opts.quiet))
    }

    /// Runs the full listing and returns the rendered output.
    ///
    /// The format is parsed before the store is read, so a malformed
    /// template fails without touching storage.
    pub fn images(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let renderer = Renderer::from_format(&resolve_format(opts))?;
        let rows = self.rows(opts)?;
        renderer.render(&rows, opts)
    }
}

/// Returns the single optional image name from positional arguments.
///
/// # Errors
///
/// More than one argument is an argument error.
///
/// # Examples
///
/// ```
/// use libstash::name_argument;
///
/// assert_eq!(name_argument(&[]).unwrap(), None);
/// assert_eq!(name_argument(&["alpine".to_string()]).unwrap(), Some("alpine"));
/// assert!(name_argument(&["a".to_string(), "b".to_string()]).is_err());
/// ```
pub fn name_argument(args: &[String]) -> Result<Option<&str>> {
    match args {
        [] => Ok(None),
        [name] => Ok(Some(name.as_str())),
        _ => Err(StashError::argument(
            "'stash images' requires at most 1 argument",
        )),
    }
}

/// Builder for creating a [`Stash`] over a local store.
///
/// # Examples
///
/// ```
/// use libstash::Stash;
///
/// let stash = Stash::builder()
///     .root("/srv/containers")
///     .driver("vfs")
///     .build()
///     .unwrap();
/// assert!(stash.store().images_dir().ends_with("vfs-images"));
/// ```
#[derive(Debug, Default)]
pub struct StashBuilder {
    config_path: Option<PathBuf>,
    root: Option<PathBuf>,
    driver: Option<String>,
}

impl StashBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads storage settings from a TOML file.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Overrides the storage root directory.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Overrides the storage driver name.
    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    /// Resolves the configuration and opens the store.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the config file cannot be loaded
    /// or an override is empty.
    pub fn build(self) -> Result<Stash> {
        let config = self.resolve_config()?;
        Ok(Stash::open(&config))
    }

    /// Resolves the configuration without opening the store.
    pub fn resolve_config(self) -> Result<StoreConfig> {
        let mut config = StoreConfig::load(self.config_path.as_deref())?;

        if let Some(root) = self.root {
            if root.as_os_str().is_empty() {
                return Err(StashError::config("--root must not be empty", None::<&str>));
            }
            config.storage.root = root;
        }
        if let Some(driver) = self.driver {
            if driver.trim().is_empty() {
                return Err(StashError::config(
                    "--storage-driver must not be empty",
                    None::<&str>,
                ));
            }
            config.storage.driver = driver;
        }

        Ok(config)
    }
}
