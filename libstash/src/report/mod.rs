//! Display rows for image listings.
//!
//! [`build_rows`] projects store records into render-ready [`DisplayRow`]s.
//! Metadata is resolved per record; a record whose metadata cannot be
//! resolved still produces a row, with an empty digest and zero size.

use crate::format::{format_created, format_size};
use crate::store::{ImageRecord, ImageStore};
use chrono::Local;
use serde::{Deserialize, Serialize};


/// One line of an image listing.
///
/// The serialized field names are the keys of the JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Image identifier
    pub id: String,
    /// First name of the image, or empty
    #[serde(rename = "names")]
    pub name: String,
    /// Manifest digest, or empty
    pub digest: String,
    /// Creation time, formatted for display
    #[serde(rename = "created")]
    pub created_at: String,
    /// Total size, formatted for display
    pub size: String,
}

impl DisplayRow {
    /// Builds the row for one record, resolving its metadata from `store`.
    pub fn from_record<S: ImageStore + ?Sized>(store: &S, image: &ImageRecord) -> Self {
        let (created, digest, size) = match store.describe(image) {
            Ok(metadata) => (
                metadata.created.unwrap_or(image.created),
                metadata.digest.or_else(|| image.digest.clone()),
                metadata.size,
            ),
            Err(e) => {
                tracing::debug!(image = %image.id, error = %e, "metadata unavailable, degrading row");
                (image.created, None, 0)
            }
        };

        Self {
            id: image.id.clone(),
            name: image.display_name().unwrap_or_default().to_string(),
            digest: digest.unwrap_or_default(),
            created_at: format_created(&created.with_timezone(&Local)),
            size: format_size(size),
        }
    }
}

/// Builds display rows in record order.
///
/// In quiet mode a record is skipped when its identifier equals the one of
/// the row emitted just before it. Only adjacent repeats collapse; the same
/// identifier further down the list gets its own row again.
pub fn build_rows<S: ImageStore + ?Sized>(
    store: &S,
    images: &[ImageRecord],
    quiet: bool,
) -> Vec<DisplayRow> {
    let mut rows: Vec<DisplayRow> = Vec::with_capacity(images.len());

    for image in images {
        if quiet && rows.last().is_some_and(|last| last.id == image.id) {
            continue;
        }
        rows.push(DisplayRow::from_record(store, image));
    }

    rows
}
