//! Helpers shared by request and response parsing.

use std::collections::HashMap;

use crate::parser::error::Error;

/// Find the offset just past the blank line that ends a message head.
///
/// Both `\r\n\r\n` and bare `\n\n` terminators are accepted; the earliest
/// one wins.
pub fn find_head_end(input: &[u8]) -> Option<usize> {
    let crlf = find(input, b"\r\n\r\n").map(|i| i + 4);
    let lf = find(input, b"\n\n").map(|i| i + 2);

    match (crlf, lf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// The `Content-Length` a raw message head declares, or `0` when it is
/// absent or unreadable.
///
/// Used to decide how much body to wait for before parsing; malformed
/// heads are reported by the parser proper.
pub fn declared_body_length(head: &[u8]) -> usize {
    let Ok(head) = std::str::from_utf8(head) else {
        return 0;
    };

    head.lines()
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case("Content-Length"))
        .filter_map(|(_, value)| value.trim().parse().ok())
        .last()
        .unwrap_or(0)
}

/// Split a message into its head and whatever follows the blank line.
///
/// A message without a blank line is treated as head only.
pub(crate) fn split_head(input: &[u8]) -> (&[u8], &[u8]) {
    match find_head_end(input) {
        Some(end) => (&input[..end], &input[end..]),
        None => (input, &[]),
    }
}

/// Parse header lines until the first empty one.
///
/// Names and values are trimmed; a repeated header replaces the earlier value.
pub(crate) fn parse_headers<'a>(
    lines: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, String>, Error> {
    let mut headers = HashMap::new();
    for line in lines {
        // Empty line indicates the end of headers
        if line.is_empty() {
            break;
        }

        let (name, value) = line.split_once(':').ok_or(Error::InvalidHeaderFormat)?;
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }
    Ok(headers)
}

/// Case-insensitive header lookup.
pub(crate) fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a String> {
    headers
        .iter()
        .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
