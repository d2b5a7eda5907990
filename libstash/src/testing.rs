//! Shared helpers for unit tests.

use crate::error::{Result, StashError};
use crate::store::{ImageMetadata, ImageRecord, ImageStore, LocalStore};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

/// Fixed creation time with a minute offset, so records order predictably.
pub fn ts(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 7, 4, 15, minute, 0).unwrap()
}

pub fn record(id: &str, names: &[&str], minute: u32) -> ImageRecord {
    ImageRecord::new(
        id,
        names.iter().map(|n| n.to_string()).collect(),
        ts(minute),
    )
}

/// In-memory store; images without an entry in `metadata` fail to describe.
#[derive(Default)]
pub struct FakeStore {
    pub records: Vec<ImageRecord>,
    pub metadata: HashMap<String, ImageMetadata>,
}

impl FakeStore {
    pub fn new(records: Vec<ImageRecord>) -> Self {
        Self {
            records,
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, id: &str, metadata: ImageMetadata) -> Self {
        self.metadata.insert(id.to_string(), metadata);
        self
    }
}

impl ImageStore for FakeStore {
    fn images(&self) -> Result<Vec<ImageRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self, image: &ImageRecord) -> Result<ImageMetadata> {
        self.metadata
            .get(&image.id)
            .cloned()
            .ok_or_else(|| StashError::store(format!("no metadata for {}", image.id)))
    }
}

/// containers-storage layout on disk.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("overlay-images")).unwrap();
        Self { dir }
    }

    pub fn store(&self) -> LocalStore {
        LocalStore::new(self.dir.path().join("overlay-images"))
    }

    pub fn write_index(&self, json: &str) {
        fs::write(self.dir.path().join("overlay-images/images.json"), json).unwrap();
    }

    pub fn write_big_data(&self, id: &str, key: &str, data: &[u8]) {
        let image_dir = self.dir.path().join("overlay-images").join(id);
        fs::create_dir_all(&image_dir).unwrap();
        fs::write(image_dir.join(format!("={}", STANDARD.encode(key))), data).unwrap();
    }
}

pub const CONFIG_DIGEST: &str =
    "sha256:b5b2b2c507a0944348e0303114d8d93aaaa081732b86451d9bce1f432a537bc7";
pub const LAYER_DIGEST: &str =
    "sha256:e692418e4cbaf90ca69d05a66403747baa33ee08806650b51fab815ad7fc331f";

pub fn manifest_json(config_size: u64, layer_size: u64) -> String {
    format!(
        r#"{{
  "schemaVersion": 2,
  "mediaType": "application/vnd.oci.image.manifest.v1+json",
  "config": {{
    "mediaType": "application/vnd.oci.image.config.v1+json",
    "digest": "{CONFIG_DIGEST}",
    "size": {config_size}
  }},
  "layers": [
    {{
      "mediaType": "application/vnd.oci.image.layer.v1.tar+gzip",
      "digest": "{LAYER_DIGEST}",
      "size": {layer_size}
    }}
  ]
}}"#
    )
}

pub fn config_json(created: &str, labels: &[(&str, &str)]) -> String {
    let labels: serde_json::Map<String, serde_json::Value> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();
    serde_json::json!({
        "created": created,
        "architecture": "amd64",
        "os": "linux",
        "config": { "Labels": labels },
        "rootfs": { "type": "layers", "diff_ids": [LAYER_DIGEST] }
    })
    .to_string()
}
