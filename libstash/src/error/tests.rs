use super::*;
use std::error::Error;

#[test]
fn test_config_error_with_path() {
    let err = StashError::config("storage root is empty", Some("/etc/stash/storage.toml"));

    assert!(matches!(err, StashError::Config { .. }));
    assert!(err.to_string().contains("storage root is empty"));
    if let StashError::Config { path, .. } = err {
        assert_eq!(path, Some("/etc/stash/storage.toml".to_string()));
    }
}

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err = StashError::config_with_source("failed to read config", None, io_err);

    assert!(err.source().is_some());
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_store_error_message() {
    let err = StashError::store("images.json is corrupt");
    assert_eq!(err.to_string(), "Store error: images.json is corrupt");
    assert!(err.source().is_none());
}

#[test]
fn test_store_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = StashError::store_with_source("failed to read images.json", io_err);

    let source = err.source().unwrap();
    assert!(source.to_string().contains("denied"));
}

#[test]
fn test_filter_syntax_names_clause() {
    let err = StashError::filter_syntax("colour=red", "unknown filter key 'colour'");
    assert!(matches!(err, StashError::FilterSyntax { .. }));
    assert!(err.to_string().contains("colour=red"));
    assert!(err.to_string().contains("unknown filter key"));
}

#[test]
fn test_argument_error_is_bare_message() {
    let err = StashError::argument("'stash images' requires at most 1 argument");
    assert_eq!(err.to_string(), "'stash images' requires at most 1 argument");
}

#[test]
fn test_template_syntax_error() {
    let err = StashError::template_syntax("unclosed action");
    assert_eq!(err.to_string(), "Invalid template: unclosed action");
}

#[test]
fn test_io_error_keeps_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
    let err = StashError::io_with_source("failed to write output", io_err);

    assert!(matches!(err, StashError::Io { .. }));
    assert!(err.source().unwrap().to_string().contains("broken pipe"));
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StashError>();
}
