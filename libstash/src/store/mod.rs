//! Image store access.
//!
//! The listing pipeline only ever reads from storage through the
//! [`ImageStore`] trait. [`LocalStore`] implements it over an on-disk
//! containers-storage layout.

use crate::error::{Result, StashError};
use crate::filter::FilterParams;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

mod local;
pub use local::LocalStore;


/// Big-data key under which an image's manifest is stored.
pub const MANIFEST_KEY: &str = "manifest";

/// A stored image as recorded in the store's image index.
///
/// Records are immutable snapshots; nothing in this crate writes them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Content identifier, unique per record
    pub id: String,

    /// Human-assigned names, in the order the store keeps them
    #[serde(default)]
    pub names: Vec<String>,

    /// Creation time recorded by the store
    #[serde(default)]
    pub created: DateTime<Utc>,

    /// Manifest digest, when the store recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    /// Top layer identifier
    #[serde(default, rename = "layer", skip_serializing_if = "Option::is_none")]
    pub top_layer: Option<String>,

    /// Sizes of the image's big-data items, by key
    #[serde(default, rename = "big-data-sizes")]
    pub big_data_sizes: HashMap<String, u64>,

    /// Digests of the image's big-data items, by key
    #[serde(default, rename = "big-data-digests")]
    pub big_data_digests: HashMap<String, String>,
}

impl ImageRecord {
    /// Creates a record with the given identifier, names and creation time.
    pub fn new(id: impl Into<String>, names: Vec<String>, created: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            names,
            created,
            digest: None,
            top_layer: None,
            big_data_sizes: HashMap::new(),
            big_data_digests: HashMap::new(),
        }
    }

    /// First name of the image, if it has any.
    pub fn display_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Whether any of the image's names equals `name` exactly.
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// Richer per-image information resolved on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Creation time from the image configuration
    pub created: Option<DateTime<Utc>>,
    /// Manifest digest
    pub digest: Option<String>,
    /// Total size of the config and layer blobs, in bytes
    pub size: u64,
    /// Labels from the image configuration
    pub labels: HashMap<String, String>,
}

/// Read-only access to stored images.
pub trait ImageStore {
    /// Returns every image record, in store order.
    fn images(&self) -> Result<Vec<ImageRecord>>;

    /// Resolves metadata for one image.
    fn describe(&self, image: &ImageRecord) -> Result<ImageMetadata>;

    /// Finds one image by exact id, exact name, or unique id prefix.
    fn lookup(&self, reference: &str) -> Result<ImageRecord> {
        let images = self.images()?;

        if let Some(img) = images
            .iter()
            .find(|img| img.id == reference || img.has_name(reference))
        {
            return Ok(img.clone());
        }

        let mut candidates = images.iter().filter(|img| img.id.starts_with(reference));
        match (candidates.next(), candidates.next()) {
            (Some(img), None) if !reference.is_empty() => Ok(img.clone()),
            (Some(_), Some(_)) => Err(StashError::store(format!(
                "image reference '{}' is ambiguous",
                reference
            ))),
            _ => Err(StashError::store(format!("image '{}' not found", reference))),
        }
    }

    /// Returns the images carrying `name` (when given) that match `filter` (when given).
    ///
    /// Store order is preserved.
    fn list_images(
        &self,
        filter: Option<&FilterParams>,
        name: Option<&str>,
    ) -> Result<Vec<ImageRecord>> {
        let images = self.images()?;
        Ok(images
            .into_iter()
            .filter(|img| name.is_none_or(|n| img.has_name(n)))
            .filter(|img| filter.is_none_or(|f| f.matches(self, img)))
            .collect())
    }
}
