//! Integration tests for the attribute reader.

use hubscan_html::attributes::{attributes, class_list_contains, read_attribute};

/// Helper to collect every parsed pair
fn pairs(raw: &str) -> Vec<(&str, Option<&str>)> {
    attributes(raw).collect()
}

#[test]
fn test_quoted_and_unquoted_values() {
    let raw = r#"href="/p/1" data-id=42 title='a b'"#;
    assert_eq!(read_attribute(raw, "href"), Some("/p/1"));
    assert_eq!(read_attribute(raw, "data-id"), Some("42"));
    assert_eq!(read_attribute(raw, "title"), Some("a b"));
}

#[test]
fn test_name_match_is_case_insensitive() {
    assert_eq!(read_attribute(r#"HREF="/x""#, "href"), Some("/x"));
    assert_eq!(read_attribute(r#"href="/x""#, "HRef"), Some("/x"));
}

#[test]
fn test_missing_attribute() {
    assert_eq!(read_attribute(r#"class="a""#, "href"), None);
    assert_eq!(read_attribute("", "href"), None);
}

#[test]
fn test_first_match_wins() {
    assert_eq!(read_attribute("id=a id=b", "id"), Some("a"));
}

#[test]
fn test_quoted_value_keeps_gt_and_spaces() {
    assert_eq!(read_attribute(r#"title="x > y""#, "title"), Some("x > y"));
}

#[test]
fn test_unquoted_value_ends_at_gt() {
    assert_eq!(read_attribute("href=/x>junk", "href"), Some("/x"));
}

#[test]
fn test_bare_attribute() {
    let raw = r#"hidden class="c""#;
    assert_eq!(read_attribute(raw, "hidden"), Some(""));
    assert_eq!(read_attribute(raw, "class"), Some("c"));
    assert_eq!(pairs(raw), vec![("hidden", None), ("class", Some("c"))]);
}

#[test]
fn test_spaces_around_equals() {
    assert_eq!(read_attribute(r#"href = "/x""#, "href"), Some("/x"));
}

#[test]
fn test_unterminated_quote_runs_to_end() {
    assert_eq!(read_attribute(r#"title="abc"#, "title"), Some("abc"));
}

#[test]
fn test_class_substring_match() {
    let raw = r#"class="tm-title tm-title__link-extra""#;
    assert!(class_list_contains(raw, "tm-title__link"));
    assert!(class_list_contains(raw, "title"));
    assert!(!class_list_contains(raw, "tm-user-info"));
}

#[test]
fn test_class_missing() {
    assert!(!class_list_contains(r#"id="tm-title__link""#, "tm-title__link"));
}
