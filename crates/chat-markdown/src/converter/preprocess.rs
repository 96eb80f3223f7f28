//! Source rewrites applied before the HTML reaches `tl`.
//!
//! `tl` tokenizes the body of `<script>`/`<style>` as markup and reads
//! `<br/>` as a tag named `br/`, so both are fixed up on the raw text.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::options::ConversionOptions;

static SCRIPT_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").expect("valid regex")
});
static SCRIPT_STYLE_ANY_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").expect("valid regex")
});
static SELF_CLOSING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([A-Za-z][A-Za-z0-9:-]*)((?:\s[^<>]*?)??)\s*/>").expect("valid regex"));

/// Elements that never have content.
pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta" | "param" | "source"
            | "track" | "wbr"
    )
}

/// Remove closed `<script>` and `<style>` elements together with their bodies.
///
/// Tag names match case-insensitively only when the options lowercase tags, so
/// `<SCRIPT>` stays an unknown tag otherwise. An unclosed element is left for the
/// parser, which drops it along with everything after it.
pub(crate) fn strip_script_and_style_tags<'a>(html: &'a str, options: &ConversionOptions) -> Cow<'a, str> {
    if options.lowercase_tags {
        SCRIPT_STYLE_ANY_CASE.replace_all(html, "")
    } else {
        SCRIPT_STYLE.replace_all(html, "")
    }
}

/// Rewrite self-closing tags into forms `tl` understands.
///
/// Void elements lose the slash (`<br/>` becomes `<br>`); any other element gets
/// an explicit end tag (`<span/>` becomes `<span></span>`).
pub(crate) fn preprocess_html(html: &str) -> Cow<'_, str> {
    if !html.contains("/>") {
        return Cow::Borrowed(html);
    }
    SELF_CLOSING_TAG.replace_all(html, |caps: &Captures<'_>| {
        let name = &caps[1];
        let attributes = &caps[2];
        if is_void_element(name) {
            format!("<{name}{attributes}>")
        } else {
            format!("<{name}{attributes}></{name}>")
        }
    })
}
