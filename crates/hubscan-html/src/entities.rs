//! Character reference decoding for extracted text.
//!
//! This is deliberately not the full HTML named reference table. Recognized:
//! - `&amp;`, `&lt;`, `&gt;`, `&nbsp;` (the last becomes a plain space)
//! - decimal `&#DDD;` and hexadecimal `&#xHHH;` / `&#XHHH;`
//!
//! A reference only counts if its `;` is at most [`MAX_REFERENCE_LEN`] bytes
//! after the `&`. Unknown references pass through verbatim, `&` and `;`
//! included. Decoding is a single pass: `&amp;lt;` becomes `&lt;`, not `<`.

/// Largest distance from `&` to the terminating `;` of a recognized reference.
pub const MAX_REFERENCE_LEN: usize = 10;

/// Code points at or above this value decode to [`REPLACEMENT`].
const MAX_DECODED_CODE_POINT: u32 = 0xFFFF;

/// Stand-in for code points outside the decoded range.
pub const REPLACEMENT: char = '?';

/// What a reference starting at an `&` turns into.
enum Reference<'a> {
    /// A single decoded character.
    Char(char),
    /// An unknown reference, copied as-is.
    Verbatim(&'a str),
    /// A numeric reference to a non-positive value: consumed, nothing emitted.
    Dropped,
}

/// Decode character references in `text`.
#[must_use]
pub fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match resolve(candidate) {
            Some((reference, consumed)) => {
                match reference {
                    Reference::Char(c) => out.push(c),
                    Reference::Verbatim(raw) => out.push_str(raw),
                    Reference::Dropped => {}
                }
                rest = &candidate[consumed..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Resolve the reference at the start of `candidate` (which begins with `&`).
///
/// Returns the reference and the number of bytes it spans, or `None` if the
/// `&` is a literal ampersand.
fn resolve(candidate: &str) -> Option<(Reference<'_>, usize)> {
    let semi = candidate.find(';')?;
    if semi > MAX_REFERENCE_LEN || semi == 1 {
        return None;
    }
    let consumed = semi + 1;
    let reference = match &candidate[1..semi] {
        "amp" => Reference::Char('&'),
        "lt" => Reference::Char('<'),
        "gt" => Reference::Char('>'),
        "nbsp" => Reference::Char(' '),
        body => match body.strip_prefix('#') {
            Some(number) => decode_numeric(number),
            None => Reference::Verbatim(&candidate[..consumed]),
        },
    };
    Some((reference, consumed))
}

/// `number` is everything between `&#` and `;`. Leading digits are read;
/// anything after them is ignored.
fn decode_numeric(number: &str) -> Reference<'static> {
    let (radix, digits) = match number.strip_prefix(['x', 'X']) {
        Some(hex) => (16, hex),
        None => (10, number),
    };
    let value = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0u32, |acc, digit| acc.saturating_mul(radix).saturating_add(digit));

    if value == 0 {
        return Reference::Dropped;
    }
    if value > MAX_DECODED_CODE_POINT {
        return Reference::Char(REPLACEMENT);
    }
    // Surrogates are not characters
    Reference::Char(char::from_u32(value).unwrap_or(REPLACEMENT))
}
