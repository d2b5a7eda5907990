//! On-disk image store in the containers-storage layout.
//!
//! ```text
//! <root>/<driver>-images/images.json
//! <root>/<driver>-images/<id>/=<base64(key)>
//! ```
//!
//! `images.json` is the image index. Each image directory holds big-data
//! items (manifest, config) under base64-encoded key names.

use super::{ImageMetadata, ImageRecord, ImageStore, MANIFEST_KEY};
use crate::config::StoreConfig;
use crate::digest::Digest;
use crate::error::{Result, StashError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use oci_spec::image::{ImageConfiguration, ImageManifest};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name of the image index inside the images directory.
const INDEX_FILE: &str = "images.json";

/// Read-only store over a containers-storage images directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    images_dir: PathBuf,
}

impl LocalStore {
    /// Opens the store described by `config`.
    ///
    /// The directory does not have to exist; a missing index reads as an
    /// empty store.
    pub fn open(config: &StoreConfig) -> Self {
        Self::new(config.images_dir())
    }

    /// Opens a store rooted at an images directory.
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    /// The images directory this store reads from.
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Path of a big-data item for an image.
    pub fn big_data_path(&self, id: &str, key: &str) -> PathBuf {
        self.images_dir
            .join(id)
            .join(format!("={}", STANDARD.encode(key)))
    }

    fn read_big_data(&self, id: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.big_data_path(id, key);
        fs::read(&path).map_err(|e| {
            StashError::store_with_source(
                format!("failed to read {} of image {}", key, id),
                e,
            )
        })
    }

    fn read_config(&self, id: &str, key: &str) -> Result<ImageConfiguration> {
        let bytes = self.read_big_data(id, key)?;
        ImageConfiguration::from_reader(bytes.as_slice()).map_err(|e| {
            StashError::store_with_source(format!("failed to parse config of image {}", id), e)
        })
    }
}

impl ImageStore for LocalStore {
    fn images(&self) -> Result<Vec<ImageRecord>> {
        let index = self.images_dir.join(INDEX_FILE);
        let data = match fs::read(&index) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %index.display(), "no image index, store is empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StashError::store_with_source(
                    format!("failed to read {}", index.display()),
                    e,
                ));
            }
        };

        let images: Vec<ImageRecord> = serde_json::from_slice(&data).map_err(|e| {
            StashError::store_with_source(format!("failed to parse {}", index.display()), e)
        })?;
        tracing::debug!(count = images.len(), path = %index.display(), "loaded image index");
        Ok(images)
    }

    fn describe(&self, image: &ImageRecord) -> Result<ImageMetadata> {
        let manifest_bytes = self.read_big_data(&image.id, MANIFEST_KEY)?;
        let manifest = ImageManifest::from_reader(manifest_bytes.as_slice()).map_err(|e| {
            StashError::store_with_source(
                format!("failed to parse manifest of image {}", image.id),
                e,
            )
        })?;

        let recorded = image
            .digest
            .as_deref()
            .or_else(|| image.big_data_digests.get(MANIFEST_KEY).map(String::as_str))
            .and_then(|d| Digest::from_str(d).ok());
        let digest = match recorded {
            Some(d) => d,
            None => Digest::sha256_of(&manifest_bytes)?,
        };

        let config_descriptor = manifest.config();
        let size = manifest
            .layers()
            .iter()
            .try_fold(config_descriptor.size(), |total, layer| {
                total.checked_add(layer.size())
            })
            .ok_or_else(|| {
                StashError::store(format!("blob sizes of image {} overflow", image.id))
            })?;

        let mut metadata = ImageMetadata {
            created: None,
            digest: Some(digest.to_string()),
            size,
            labels: Default::default(),
        };

        // The config blob is optional for listing; a missing one only loses
        // the authoritative creation time and labels.
        match self.read_config(&image.id, &config_descriptor.digest().to_string()) {
            Ok(config) => {
                metadata.created = config
                    .created()
                    .as_deref()
                    .and_then(|c| DateTime::parse_from_rfc3339(c).ok())
                    .map(|c| c.with_timezone(&Utc));
                if let Some(labels) = config.config().as_ref().and_then(|c| c.labels().clone()) {
                    metadata.labels = labels;
                }
            }
            Err(e) => {
                tracing::debug!(image = %image.id, error = %e, "image config unavailable");
            }
        }

        Ok(metadata)
    }
}
