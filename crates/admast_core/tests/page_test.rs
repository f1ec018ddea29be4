//! Tests for pagination envelope parsing.

use admast_core::Page;
use serde::Deserialize;
use serde_json::{Value, json};

#[test]
fn forward_cursor_round_trip() {
    let envelope = json!({
        "data": [{"id": "c1"}, {"id": "c2"}],
        "paging": {"cursors": {"after": "X"}}
    });
    let page: Page<Value> = Page::from_value(envelope).unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.cursor_after.as_deref(), Some("X"));
    assert_eq!(page.cursor_before, None);
    assert!(page.has_next_page);
    assert!(!page.has_previous_page);
}

#[test]
fn missing_paging_defaults_to_single_page() {
    let envelope = json!({"data": [{"id": "c1"}]});
    let page: Page<Value> = Page::from_value(envelope).unwrap();
    assert_eq!(page.data.len(), 1);
    assert!(!page.has_next_page);
    assert!(!page.has_previous_page);
    assert_eq!(page.cursor_after, None);
    assert_eq!(page.cursor_before, None);
}

#[test]
fn empty_string_cursors_count_as_absent() {
    let envelope = json!({
        "data": [],
        "paging": {"cursors": {"before": "", "after": ""}}
    });
    let page: Page<Value> = Page::from_value(envelope).unwrap();
    assert!(!page.has_next_page);
    assert!(!page.has_previous_page);
}

#[test]
fn zero_rows_with_cursor_is_not_an_error() {
    let envelope = json!({
        "data": [],
        "paging": {"cursors": {"after": "tail"}}
    });
    let page: Page<Value> = Page::from_value(envelope).unwrap();
    assert!(page.data.is_empty());
    assert!(page.has_next_page);
}

#[test]
fn row_order_is_preserved() {
    let envelope = json!({
        "data": [{"id": "z"}, {"id": "a"}, {"id": "m"}]
    });
    let page: Page<Value> = Page::from_value(envelope).unwrap();
    let ids: Vec<&str> = page
        .data
        .iter()
        .map(|row| row["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["z", "a", "m"]);
}

#[test]
fn typed_rows_deserialize() {
    #[derive(Debug, Deserialize)]
    struct Campaign {
        id: String,
        name: String,
    }

    let envelope = json!({
        "data": [{"id": "123", "name": "Spring Sale"}],
        "paging": {"cursors": {"before": "B", "after": "A"}}
    });
    let page: Page<Campaign> = Page::from_value(envelope).unwrap();
    assert_eq!(page.data[0].id, "123");
    assert_eq!(page.data[0].name, "Spring Sale");
    assert!(page.has_previous_page);
}

#[test]
fn non_envelope_payload_is_rejected() {
    let result: Result<Page<Value>, _> = Page::from_value(json!({"data": "not-an-array"}));
    assert!(result.is_err());
}
