//! Filter expression parsing and evaluation.
//!
//! A filter expression is a comma-separated list of `key=value` clauses:
//!
//! - `dangling=true|false` - image has no names / has at least one name
//! - `label=<key>` or `label=<key>=<value>` - image config carries the label
//! - `before=<image>` - created strictly before the referenced image
//! - `since=<image>` - created strictly after the referenced image
//!
//! Clauses are compiled once against the store into [`FilterParams`]; the
//! store then applies [`FilterParams::matches`] to each record.

use crate::error::{Result, StashError};
use crate::store::{ImageRecord, ImageStore};
use chrono::{DateTime, Utc};

#[cfg(test)]
mod tests;

/// A required image label, optionally with a required value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFilter {
    pub key: String,
    pub value: Option<String>,
}

/// Compiled filter predicate. The default value matches every image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub dangling: Option<bool>,
    pub labels: Vec<LabelFilter>,
    pub before: Option<DateTime<Utc>>,
    pub since: Option<DateTime<Utc>>,
}

/// Compiles an optional filter expression.
///
/// `None` means no filtering at all.
pub fn compile<S: ImageStore + ?Sized>(
    store: &S,
    expression: Option<&str>,
) -> Result<Option<FilterParams>> {
    expression.map(|expr| parse_filter(store, expr)).transpose()
}

/// Parses a filter expression, resolving image references against `store`.
pub fn parse_filter<S: ImageStore + ?Sized>(store: &S, expression: &str) -> Result<FilterParams> {
    let mut params = FilterParams::default();

    for clause in expression.split(',').map(str::trim) {
        if clause.is_empty() {
            continue;
        }
        let (key, value) = clause
            .split_once('=')
            .ok_or_else(|| StashError::filter_syntax(clause, "expected key=value"))?;
        if value.is_empty() {
            return Err(StashError::filter_syntax(clause, "missing value"));
        }

        match key {
            "dangling" => {
                let dangling = value.parse::<bool>().map_err(|_| {
                    StashError::filter_syntax(clause, "dangling must be true or false")
                })?;
                params.dangling = Some(dangling);
            }
            "label" => {
                let label = match value.split_once('=') {
                    Some((k, v)) => LabelFilter {
                        key: k.to_string(),
                        value: Some(v.to_string()),
                    },
                    None => LabelFilter {
                        key: value.to_string(),
                        value: None,
                    },
                };
                if label.key.is_empty() {
                    return Err(StashError::filter_syntax(clause, "missing label key"));
                }
                params.labels.push(label);
            }
            "before" => params.before = Some(reference_time(store, clause, value)?),
            "since" => params.since = Some(reference_time(store, clause, value)?),
            other => {
                return Err(StashError::filter_syntax(
                    clause,
                    format!("unknown filter key '{}'", other),
                ));
            }
        }
    }

    Ok(params)
}

/// Creation time of the image a `before`/`since` clause points at.
fn reference_time<S: ImageStore + ?Sized>(
    store: &S,
    clause: &str,
    reference: &str,
) -> Result<DateTime<Utc>> {
    let image = store
        .lookup(reference)
        .map_err(|e| StashError::filter_syntax(clause, e.to_string()))?;
    Ok(created_at(store, &image))
}

/// Authoritative creation time, falling back to the store record.
fn created_at<S: ImageStore + ?Sized>(store: &S, image: &ImageRecord) -> DateTime<Utc> {
    store
        .describe(image)
        .ok()
        .and_then(|m| m.created)
        .unwrap_or(image.created)
}

impl FilterParams {
    /// Whether the filter constrains anything.
    pub fn is_empty(&self) -> bool {
        self == &FilterParams::default()
    }

    /// Evaluates the filter against one image.
    ///
    /// Label clauses never match an image whose metadata cannot be resolved.
    pub fn matches<S: ImageStore + ?Sized>(&self, store: &S, image: &ImageRecord) -> bool {
        if self
            .dangling
            .is_some_and(|dangling| dangling != image.names.is_empty())
        {
            return false;
        }

        if self.labels.is_empty() && self.before.is_none() && self.since.is_none() {
            return true;
        }

        let metadata = store.describe(image).ok();
        let created = metadata
            .as_ref()
            .and_then(|m| m.created)
            .unwrap_or(image.created);

        if self.before.is_some_and(|before| created >= before) {
            return false;
        }
        if self.since.is_some_and(|since| created <= since) {
            return false;
        }

        self.labels.iter().all(|label| {
            metadata
                .as_ref()
                .and_then(|m| m.labels.get(&label.key))
                .is_some_and(|v| label.value.as_ref().is_none_or(|want| want == v))
        })
    }
}
