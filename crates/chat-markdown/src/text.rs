//! Text helpers: whitespace normalization and character reference decoding.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities;

static MULTIPLE_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static WHITESPACE_BEFORE_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\n").expect("valid regex"));

/// Collapse runs of three or more newlines into a single blank line.
pub(crate) fn collapse_blank_lines(text: &str) -> Cow<'_, str> {
    MULTIPLE_NEWLINES.replace_all(text, "\n\n")
}

/// Whitespace cleanup applied to the inner text of paragraph-like blocks.
///
/// Any whitespace run that ends in a newline becomes a single newline, then
/// leftover blank-line runs are capped at one blank line.
pub(crate) fn collapse_inner(text: &str) -> String {
    let single = WHITESPACE_BEFORE_NEWLINE.replace_all(text, "\n");
    collapse_blank_lines(single.as_ref()).into_owned()
}

/// Spaces, tabs and carriage returns.
const HORIZONTAL_WHITESPACE: [char; 3] = [' ', '\t', '\r'];

/// Remove trailing horizontal whitespace from every line while preserving newlines.
pub(crate) fn trim_line_end_whitespace(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            cleaned.push('\n');
        }
        cleaned.push_str(line.trim_end_matches(HORIZONTAL_WHITESPACE));
    }
    cleaned
}

/// Final pass over the joined document output.
///
/// Edges lose horizontal whitespace and newlines, but other whitespace such as
/// a leading non-breaking space is kept.
pub(crate) fn normalize_output(text: &str) -> String {
    let trimmed_lines = trim_line_end_whitespace(text);
    collapse_blank_lines(&trimmed_lines)
        .trim_matches(|c: char| c == '\n' || HORIZONTAL_WHITESPACE.contains(&c))
        .to_string()
}

/// Decode HTML character references, borrowing when there is nothing to decode.
///
/// Numeric references and the HTML 4 named references are recognised. Anything
/// else, including a bare `&`, is left as written.
pub(crate) fn decode_html_entities_cow(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let candidate = &rest[amp + 1..];
        match candidate
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_REFERENCE_LEN)
            .and_then(|end| decode_reference(&candidate[..end]).map(|ch| (ch, end)))
        {
            Some((ch, end)) => {
                decoded.push(ch);
                rest = &candidate[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = candidate;
            }
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

const MAX_REFERENCE_LEN: usize = 10;

fn decode_reference(reference: &str) -> Option<char> {
    if let Some(numeric) = reference.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return Some(if code == 0 {
            char::REPLACEMENT_CHARACTER
        } else {
            char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
        });
    }

    entities::lookup(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_inner_whitespace_before_newline() {
        assert_eq!(collapse_inner("a   \nb"), "a\nb");
        assert_eq!(collapse_inner("a\n\n\n\nb"), "a\nb");
        assert_eq!(collapse_inner("a \t\n  b"), "a\n  b");
    }

    #[test]
    fn test_collapse_inner_keeps_leading_newline() {
        assert_eq!(collapse_inner("\nText"), "\nText");
    }

    #[test]
    fn test_trim_line_end_whitespace() {
        assert_eq!(trim_line_end_whitespace("a \t\nb  \n c"), "a\nb\n c");
        assert_eq!(trim_line_end_whitespace("cell\t\t"), "cell");
        assert_eq!(trim_line_end_whitespace("a \r\nb"), "a\nb");
    }

    #[test]
    fn test_normalize_output() {
        assert_eq!(normalize_output("  A\n\n\n\nB\n\n"), "A\n\nB");
        assert_eq!(normalize_output("\n---\nAfter"), "---\nAfter");
        assert_eq!(normalize_output("x\t\n\n\n\t\ny"), "x\n\ny");
        assert_eq!(normalize_output("\r\n A \r\n"), "A");
    }

    #[test]
    fn test_normalize_output_keeps_non_breaking_space() {
        assert_eq!(normalize_output("\u{a0}Hello\u{a0}"), "\u{a0}Hello\u{a0}");
    }

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_html_entities_cow("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_html_entities_cow("&lt;b&gt;"), "<b>");
        assert_eq!(decode_html_entities_cow("a&nbsp;b"), "a\u{a0}b");
        assert_eq!(decode_html_entities_cow("caf&eacute; &hearts;"), "caf\u{e9} \u{2665}");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_html_entities_cow("it&#39;s"), "it's");
        assert_eq!(decode_html_entities_cow("it&#x27;s"), "it's");
        assert_eq!(decode_html_entities_cow("&#0;"), "\u{fffd}");
    }

    #[test]
    fn test_decode_leaves_unknown_references() {
        assert_eq!(decode_html_entities_cow("AT&T"), "AT&T");
        assert_eq!(decode_html_entities_cow("&bogus; & more"), "&bogus; & more");
        assert_eq!(decode_html_entities_cow("a && b;"), "a && b;");
    }

    #[test]
    fn test_decode_borrows_plain_text() {
        assert!(matches!(decode_html_entities_cow("plain"), Cow::Borrowed("plain")));
    }
}
