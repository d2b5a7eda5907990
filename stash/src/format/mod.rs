use crate::context::{AppContext, VerbosityLevel};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// When to color diagnostics on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl From<&str> for ColorChoice {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// Check if we should use colors in diagnostics
///
/// `auto` colors only when stderr is a terminal and `NO_COLOR` is unset.
pub fn should_color(ctx: &AppContext) -> bool {
    match ctx.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Colorize an X mark for errors if colors are enabled
pub fn error_mark(ctx: &AppContext) -> String {
    if should_color(ctx) {
        format!("{}", "✗".red().bold())
    } else {
        "✗".to_string()
    }
}

/// Format an error line, without printing it
pub fn error_line(ctx: &AppContext, err: &dyn std::error::Error) -> String {
    format!("{} {}", error_mark(ctx), err)
}

/// Print an error to stderr
pub fn error(ctx: &AppContext, err: &dyn std::error::Error) {
    eprintln!("{}", error_line(ctx, err));
}

/// Print a diagnostic message to stderr when the context is at least as verbose as `level`
///
/// Stdout is reserved for listings, so messages never go there.
pub fn print(ctx: &AppContext, level: VerbosityLevel, message: &str) {
    if level > VerbosityLevel::Normal && ctx.verbosity >= level {
        if should_color(ctx) {
            eprintln!("{}", message.dimmed());
        } else {
            eprintln!("{}", message);
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
