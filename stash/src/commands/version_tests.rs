use super::*;

#[test]
fn test_version_string_contains_package_name() {
    let output = get_version_string();
    assert!(output.starts_with("stash "));
}

#[test]
fn test_version_string_contains_version_number() {
    let output = get_version_string();
    assert!(output.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_string_contains_libstash_version() {
    let output = get_version_string();
    assert!(output.contains(&format!("libstash {}", libstash::version())));
}

#[test]
fn test_version_string_has_two_lines() {
    assert_eq!(get_version_string().lines().count(), 2);
}
