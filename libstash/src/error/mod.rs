//! Error types for Stash
//!
//! Every stage of the listing pipeline reports failures through [`StashError`].
//! Each variant names the stage that failed so the CLI can print a
//! contextual message without inspecting the source chain.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for Stash operations
#[derive(Error, Debug)]
pub enum StashError {
    /// Runtime configuration or store handle could not be resolved
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The image store could not be read
    #[error("Store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed filter expression
    #[error("Invalid filter '{clause}': {message}")]
    FilterSyntax { clause: String, message: String },

    /// Bad command-line arguments
    #[error("{message}")]
    Argument { message: String },

    /// Malformed output template
    #[error("Invalid template: {message}")]
    TemplateSyntax { message: String },

    /// Output could not be produced or written
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Content digest validation failed
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for Stash operations
pub type Result<T> = std::result::Result<T, StashError>;

impl StashError {
    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libstash::error::StashError;
    ///
    /// let err = StashError::config("invalid storage root", Some("/etc/stash/storage.toml"));
    /// assert!(matches!(err, StashError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new store error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libstash::error::StashError;
    ///
    /// let err = StashError::store("image not found");
    /// assert!(matches!(err, StashError::Store { .. }));
    /// ```
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new store error with a source error.
    pub fn store_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new filter syntax error for the offending clause.
    ///
    /// # Examples
    ///
    /// ```
    /// use libstash::error::StashError;
    ///
    /// let err = StashError::filter_syntax("dangling=maybe", "expected true or false");
    /// assert_eq!(err.to_string(), "Invalid filter 'dangling=maybe': expected true or false");
    /// ```
    pub fn filter_syntax<C: Into<String>, S: Into<String>>(clause: C, message: S) -> Self {
        Self::FilterSyntax {
            clause: clause.into(),
            message: message.into(),
        }
    }

    /// Creates a new argument error.
    pub fn argument<S: Into<String>>(message: S) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Creates a new template syntax error.
    pub fn template_syntax<S: Into<String>>(message: S) -> Self {
        Self::TemplateSyntax {
            message: message.into(),
        }
    }

    /// Creates a new I/O error with a source error.
    pub fn io_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<config::ConfigError> for StashError {
    fn from(err: config::ConfigError) -> Self {
        StashError::config_with_source("Failed to build configuration", None::<&str>, err)
    }
}
