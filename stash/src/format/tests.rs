use super::*;
use crate::context::StorageOverrides;
use libstash::StashError;

fn ctx(color: ColorChoice, verbosity: VerbosityLevel) -> AppContext {
    AppContext::build(Some(color), verbosity, StorageOverrides::default())
}

#[test]
fn test_color_choice_from_string() {
    assert_eq!(ColorChoice::from("always"), ColorChoice::Always);
    assert_eq!(ColorChoice::from("NEVER"), ColorChoice::Never);
    assert_eq!(ColorChoice::from("auto"), ColorChoice::Auto);
    assert_eq!(ColorChoice::from("invalid"), ColorChoice::Auto);
}

#[test]
fn test_should_color_follows_explicit_choice() {
    assert!(should_color(&ctx(ColorChoice::Always, VerbosityLevel::Normal)));
    assert!(!should_color(&ctx(ColorChoice::Never, VerbosityLevel::Normal)));
}

#[test]
fn test_error_mark_plain_when_never() {
    let ctx = ctx(ColorChoice::Never, VerbosityLevel::Normal);
    assert_eq!(error_mark(&ctx), "✗");
}

#[test]
fn test_error_mark_colored_when_always() {
    let ctx = ctx(ColorChoice::Always, VerbosityLevel::Normal);
    let mark = error_mark(&ctx);
    assert!(mark.contains("✗"));
    assert!(mark.contains("\u{1b}["));
}

#[test]
fn test_error_line_includes_message() {
    let ctx = ctx(ColorChoice::Never, VerbosityLevel::Normal);
    let err = StashError::argument("'stash images' requires at most 1 argument");
    assert_eq!(
        error_line(&ctx, &err),
        "✗ 'stash images' requires at most 1 argument"
    );
}

#[test]
fn test_print_at_every_level_does_not_panic() {
    let levels = [
        VerbosityLevel::Normal,
        VerbosityLevel::Verbose,
        VerbosityLevel::VeryVerbose,
        VerbosityLevel::Trace,
    ];
    for current in levels {
        let ctx = ctx(ColorChoice::Never, current);
        for level in levels {
            print(&ctx, level, "message");
        }
    }
}
