//! Reading attributes out of a tag's raw attribute text.
//!
//! The tokenizer hands over attribute text unparsed (`class="a b" href=/x`).
//! Lookups scan it on demand; most tags never have an attribute queried.
//!
//! Grammar, as scanned:
//! - pairs are separated by whitespace
//! - a name runs until whitespace, `=` or `>`
//! - a value is either quoted (`"…"` or `'…'`, may contain whitespace and `>`)
//!   or unquoted (ends at whitespace or `>`)
//! - a name without `=` is a bare attribute with no value

use crate::text::is_space;

/// Iterator over `(name, value)` pairs of raw attribute text.
///
/// Bare attributes yield `None` as their value. An unterminated quoted value
/// runs to the end of the text.
#[derive(Debug, Clone)]
pub struct Attributes<'a> {
    rest: &'a str,
}

/// Iterate over the attributes in `raw`, in source order.
#[must_use]
pub const fn attributes(raw: &str) -> Attributes<'_> {
    Attributes { rest: raw }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest;
        let bytes = rest.as_bytes();
        let skip_spaces = |mut p: usize| {
            while p < bytes.len() && is_space(bytes[p]) {
                p += 1;
            }
            p
        };

        let mut p = skip_spaces(0);
        if p >= bytes.len() || bytes[p] == b'>' {
            self.rest = "";
            return None;
        }

        let name_start = p;
        while p < bytes.len() && !is_space(bytes[p]) && bytes[p] != b'=' && bytes[p] != b'>' {
            p += 1;
        }
        let name = &rest[name_start..p];
        let after_name = p;

        p = skip_spaces(p);
        if p >= bytes.len() || bytes[p] != b'=' {
            self.rest = &rest[after_name..];
            return Some((name, None));
        }

        p = skip_spaces(p + 1);
        let quote = match bytes.get(p) {
            Some(&q @ (b'"' | b'\'')) => {
                p += 1;
                Some(q)
            }
            _ => None,
        };

        let value_start = p;
        while p < bytes.len() {
            let byte = bytes[p];
            let ends_value = match quote {
                Some(q) => byte == q,
                None => is_space(byte) || byte == b'>',
            };
            if ends_value {
                break;
            }
            p += 1;
        }
        let value = &rest[value_start..p];
        if quote.is_some() && p < bytes.len() {
            p += 1;
        }

        self.rest = &rest[p..];
        Some((name, Some(value)))
    }
}

/// Value of the first attribute called `name` (ASCII case-insensitive).
///
/// A bare attribute matches with an empty value. Returns `None` when the
/// attribute is absent; that is an ordinary outcome, not an error.
#[must_use]
pub fn read_attribute<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    attributes(raw)
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.unwrap_or_default())
}

/// Whether the `class` attribute contains `token` as a substring.
///
/// This is a raw substring test, not a class-token comparison: a marker
/// `tm-title__link` also matches `tm-title__link-extra`.
#[must_use]
pub fn class_list_contains(raw: &str, token: &str) -> bool {
    read_attribute(raw, "class").is_some_and(|class| class.contains(token))
}
