//! Integration tests for character reference decoding.

use hubscan_html::entities::decode;

#[test]
fn test_named_and_numeric_references() {
    assert_eq!(
        decode("Caf&amp;eacute;... &lt;x&gt; &#65; &#x41;"),
        "Caf&eacute;... <x> A A"
    );
}

#[test]
fn test_nbsp_becomes_space() {
    assert_eq!(decode("a&nbsp;b"), "a b");
}

#[test]
fn test_unknown_reference_passes_through() {
    assert_eq!(decode("&eacute; &copy;"), "&eacute; &copy;");
}

#[test]
fn test_decoding_is_single_pass() {
    assert_eq!(decode("&amp;lt;"), "&lt;");
    assert_eq!(decode("&amp;amp;"), "&amp;");
}

#[test]
fn test_semicolon_must_be_close() {
    assert_eq!(decode("&verylongname;"), "&verylongname;");
    assert_eq!(decode("&#00000000065;"), "&#00000000065;");
    assert_eq!(decode("&#0000065;"), "A");
}

#[test]
fn test_bare_ampersands() {
    assert_eq!(decode("R & D"), "R & D");
    assert_eq!(decode("&;"), "&;");
    assert_eq!(decode("a&"), "a&");
}

#[test]
fn test_zero_is_dropped() {
    assert_eq!(decode("a&#0;b"), "ab");
    assert_eq!(decode("a&#x0;b"), "ab");
}

#[test]
fn test_uppercase_hex_prefix() {
    assert_eq!(decode("&#X41;&#x3b1;"), "A\u{3b1}");
}

#[test]
fn test_multibyte_results() {
    assert_eq!(decode("&#1105;&#x20AC;"), "ё€");
}

#[test]
fn test_outside_basic_plane_is_replaced() {
    assert_eq!(decode("&#x1F600;"), "?");
    assert_eq!(decode("&#65536;"), "?");
}

#[test]
fn test_surrogate_is_replaced() {
    assert_eq!(decode("&#xD800;"), "?");
}

#[test]
fn test_trailing_junk_after_digits_is_ignored() {
    assert_eq!(decode("&#65xyz;"), "A");
}

#[test]
fn test_non_ascii_text_is_preserved() {
    assert_eq!(decode("Привет &amp; мир"), "Привет & мир");
}
