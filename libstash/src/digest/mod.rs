//! OCI content digest validation and computation.
//!
//! This module wraps `oci_spec::image::Digest` so that digests read from the
//! store are validated with Stash's error handling, and provides SHA-256
//! computation for manifests whose digest was never recorded.

use crate::error::{Result, StashError};
use oci_spec::image::Digest as OciDigest;
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::str::FromStr;


/// Represents a content digest, wrapping the `oci_spec::image::Digest` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest(OciDigest);

impl Digest {
    /// Computes the `sha256:` digest of a byte slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use libstash::Digest;
    ///
    /// let digest = Digest::sha256_of(b"").unwrap();
    /// assert_eq!(
    ///     digest.to_string(),
    ///     "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    /// );
    /// ```
    pub fn sha256_of(bytes: &[u8]) -> Result<Self> {
        let hex: String = Sha256::digest(bytes)
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Digest::from_str(&format!("sha256:{}", hex))
    }
}

impl FromStr for Digest {
    type Err = StashError;

    fn from_str(s: &str) -> Result<Self> {
        let oci_digest = OciDigest::from_str(s).map_err(|e| StashError::Validation {
            message: format!("Invalid digest format: {}", e),
            source: Some(Box::new(e)),
        })?;
        Ok(Digest(oci_digest))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
