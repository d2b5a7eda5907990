/// Get the version string for stash and libstash
pub fn get_version_string() -> String {
    format!(
        "stash {}\nlibstash {}",
        env!("CARGO_PKG_VERSION"),
        libstash::version()
    )
}

/// Print version information to stdout
pub fn print_version() {
    println!("{}", get_version_string());
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
