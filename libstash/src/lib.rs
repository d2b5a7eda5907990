//! Stash - Local Container Image Listing Library
//!
//! Stash reads a local containers-storage image store and renders image
//! listings as aligned tables, custom templates or JSON.
//!
//! # Quick Start
//!
//! ```no_run
//! use libstash::{RenderOptions, Stash, StoreConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open the store described by the default configuration
//!     let stash = Stash::open(&StoreConfig::default());
//!
//!     // Only named images, digest column included
//!     let opts = RenderOptions {
//!         digests: true,
//!         filter: Some("dangling=false".to_string()),
//!         ..Default::default()
//!     };
//!     let output = stash.images(&opts)?;
//!     print!("{}", String::from_utf8_lossy(&output));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - **Filtering**: `dangling`, `label`, `before` and `since` clauses
//! - **Templates**: column templates with `printf` padding and truncation
//! - **JSON**: machine-readable output with stable keys
//! - **Pluggable storage**: any [`ImageStore`] can back a [`Stash`]
//!
//! # Main Types
//!
//! - [`Stash`] - Main entry point for listings
//! - [`StashBuilder`] - Builder resolving storage configuration
//! - [`RenderOptions`] - Listing and display options
//! - [`DisplayRow`] - One rendered line of a listing
//! - [`ImageStore`] - Read-only storage contract

#![warn(clippy::all)]

/// Returns the libstash crate version.
///
/// # Examples
///
/// ```
/// let version = libstash::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// High-level public API (main entry point)
mod stash;
pub use stash::{Stash, StashBuilder, name_argument};

// Re-export commonly used types for convenience
pub use config::StoreConfig;
pub use digest::Digest;
pub use error::{Result, StashError};
pub use filter::FilterParams;
pub use render::{Render, RenderOptions, Renderer};
pub use report::DisplayRow;
pub use store::{ImageMetadata, ImageRecord, ImageStore, LocalStore};

// Low-level modules, public for callers that need fine-grained control
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod digest;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod filter;
#[doc(hidden)]
pub mod format;
#[doc(hidden)]
pub mod render;
#[doc(hidden)]
pub mod report;
#[doc(hidden)]
pub mod store;

#[cfg(test)]
mod testing;
