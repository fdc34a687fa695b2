//! Scalar JSON Extractor.
//!
//! Finds `"name": <int>` by text search. This is not a JSON parser:
//! - the first literal occurrence of `"name"` wins, at any nesting depth,
//!   including inside a string value (`{"note": "\"value\": 1"}` matches);
//! - duplicate keys resolve to the first occurrence;
//! - the rest of the document is never validated.
//!
//! The digit run must fit in an `i32` (the storage column type). A run that
//! overflows is reported as not found rather than wrapped.

/// Integer value of the field `name` in `body`, or `None` when the key is
/// absent, no `:` follows it, no digit follows the colon, or the value does
/// not fit in an `i32`.
pub fn extract_int_field(body: &[u8], name: &str) -> Option<i32> {
    let needle = format!("\"{name}\"");
    let start = find(body, needle.as_bytes())? + needle.len();

    let mut rest = skip_whitespace(&body[start..]);
    rest = rest.strip_prefix(b":")?;
    rest = skip_whitespace(rest);

    let negative = rest.first() == Some(&b'-');
    if negative {
        rest = &rest[1..];
    }

    let digits = rest.iter().take_while(|b| b.is_ascii_digit());
    let mut magnitude: i64 = 0;
    let mut seen = false;
    for &digit in digits {
        seen = true;
        magnitude = magnitude
            .checked_mul(10)?
            .checked_add(i64::from(digit - b'0'))?;
        if magnitude > i64::from(i32::MAX) + 1 {
            return None;
        }
    }
    if !seen {
        return None;
    }

    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn skip_whitespace(bytes: &[u8]) -> &[u8] {
    let skip = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
    &bytes[skip..]
}
