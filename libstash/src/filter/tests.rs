use super::*;
use crate::store::ImageMetadata;
use crate::testing::{FakeStore, record, ts};
use std::collections::HashMap;

fn labelled(labels: &[(&str, &str)]) -> ImageMetadata {
    ImageMetadata {
        labels: labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
        ..Default::default()
    }
}

fn store() -> FakeStore {
    FakeStore::new(vec![
        record("old", &["app:1"], 1),
        record("mid", &[], 5),
        record("new", &["app:2"], 9),
    ])
    .with_metadata("old", labelled(&[("tier", "web")]))
    .with_metadata("new", labelled(&[("tier", "db"), ("team", "core")]))
}

fn ids(store: &FakeStore, params: &FilterParams) -> Vec<String> {
    store
        .list_images(Some(params), None)
        .unwrap()
        .into_iter()
        .map(|img| img.id)
        .collect()
}

#[test]
fn test_compile_absent_expression_is_no_filter() {
    let result = compile(&store(), None).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_empty_expression_matches_all() {
    let store = store();
    let params = parse_filter(&store, "").unwrap();
    assert!(params.is_empty());
    assert_eq!(ids(&store, &params), vec!["old", "mid", "new"]);
}

#[test]
fn test_dangling_true_selects_unnamed() {
    let store = store();
    let params = parse_filter(&store, "dangling=true").unwrap();
    assert_eq!(params.dangling, Some(true));
    assert_eq!(ids(&store, &params), vec!["mid"]);
}

#[test]
fn test_dangling_false_selects_named() {
    let store = store();
    let params = parse_filter(&store, "dangling=false").unwrap();
    assert_eq!(ids(&store, &params), vec!["old", "new"]);
}

#[test]
fn test_dangling_rejects_non_boolean() {
    let err = parse_filter(&store(), "dangling=maybe").unwrap_err();
    match err {
        StashError::FilterSyntax { clause, .. } => assert_eq!(clause, "dangling=maybe"),
        other => panic!("expected filter syntax error, got {:?}", other),
    }
}

#[test]
fn test_label_key_only() {
    let store = store();
    let params = parse_filter(&store, "label=tier").unwrap();
    assert_eq!(
        params.labels,
        vec![LabelFilter {
            key: "tier".to_string(),
            value: None
        }]
    );
    // "mid" has no metadata, so label clauses cannot match it.
    assert_eq!(ids(&store, &params), vec!["old", "new"]);
}

#[test]
fn test_label_key_and_value() {
    let store = store();
    let params = parse_filter(&store, "label=tier=db").unwrap();
    assert_eq!(ids(&store, &params), vec!["new"]);
}

#[test]
fn test_multiple_labels_must_all_match() {
    let store = store();
    let params = parse_filter(&store, "label=tier, label=team=core").unwrap();
    assert_eq!(params.labels.len(), 2);
    assert_eq!(ids(&store, &params), vec!["new"]);
}

#[test]
fn test_before_and_since_use_reference_creation_time() {
    let store = store();

    let before = parse_filter(&store, "before=mid").unwrap();
    assert_eq!(before.before, Some(ts(5)));
    assert_eq!(ids(&store, &before), vec!["old"]);

    let since = parse_filter(&store, "since=app:1").unwrap();
    assert_eq!(ids(&store, &since), vec!["mid", "new"]);
}

#[test]
fn test_before_prefers_metadata_creation_time() {
    let mut meta = labelled(&[]);
    meta.created = Some(ts(0));
    let store = FakeStore::new(vec![record("x", &[], 30), record("y", &[], 20)])
        .with_metadata("x", meta);

    let params = parse_filter(&store, "since=y").unwrap();
    // "x" was recorded at :30 but its config says :00, so it is not newer than "y".
    assert!(ids(&store, &params).is_empty());
}

#[test]
fn test_unknown_reference_is_syntax_error() {
    let err = parse_filter(&store(), "before=ghost").unwrap_err();
    assert!(matches!(err, StashError::FilterSyntax { .. }));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn test_unknown_key_is_rejected() {
    let err = parse_filter(&store(), "dangling=true,colour=red").unwrap_err();
    assert!(err.to_string().contains("colour=red"));
    assert!(err.to_string().contains("unknown filter key"));
}

#[test]
fn test_missing_equals_or_value_is_rejected() {
    assert!(matches!(
        parse_filter(&store(), "dangling"),
        Err(StashError::FilterSyntax { .. })
    ));
    assert!(matches!(
        parse_filter(&store(), "label="),
        Err(StashError::FilterSyntax { .. })
    ));
    assert!(matches!(
        parse_filter(&store(), "label==web"),
        Err(StashError::FilterSyntax { .. })
    ));
}

#[test]
fn test_combined_clauses() {
    let store = store();
    let params = parse_filter(&store, "dangling=false,since=old").unwrap();
    assert_eq!(ids(&store, &params), vec!["new"]);
}
