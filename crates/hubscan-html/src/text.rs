//! Text normalization applied to captured field text.
//!
//! Fields are normalized once, when the region that captured them closes:
//! newlines become spaces, whitespace runs collapse to one space and the ends
//! are trimmed, then character references are decoded.

use crate::entities;

/// Whitespace as the tokenizer and attribute reader understand it:
/// space, tab, LF, VT, FF, CR.
#[must_use]
pub const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// Replace every CR and LF with a space.
#[must_use]
pub fn replace_newlines(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

/// Collapse each whitespace run into a single space and trim both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if u8::try_from(c).is_ok_and(is_space) {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}

/// The full field pipeline: newlines, whitespace, then character references.
#[must_use]
pub fn normalize_field(raw: &str) -> String {
    entities::decode(&collapse_whitespace(&replace_newlines(raw)))
}
