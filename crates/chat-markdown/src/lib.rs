//! Convert HTML into the lightweight markdown dialect used by chat clients.
//!
//! The output uses `*bold*`, `_italic_`, `~strike~`, `` `code` `` and fenced code
//! blocks, `> ` quotes, `- ` and `1. ` lists, `---` rules, and tab separated table
//! cells. Attributes are discarded, so links keep only their text.
//!
//! ```
//! use chat_markdown::to_chat_markdown;
//!
//! assert_eq!(to_chat_markdown("<p>Hello <strong>world</strong></p>"), "Hello *world*");
//! ```
//!
//! The `to_chat_markdown*` functions never fail: malformed markup is converted on a
//! best-effort basis and a parser error is logged and turned into an empty string.
//! [`convert_html`] exposes the error instead.

pub mod converter;
mod entities;
pub mod error;
pub mod options;
pub mod rules;
mod text;

pub use converter::convert_html;
pub use error::{ConversionError, Result};
pub use options::ConversionOptions;
pub use rules::{ListKind, Rule};

/// Convert HTML to chat markdown with default options.
///
/// Never fails; see [`to_chat_markdown_with_options`].
#[must_use]
pub fn to_chat_markdown(html: &str) -> String {
    to_chat_markdown_with_options(html, &ConversionOptions::default())
}

/// Convert optional HTML to chat markdown. `None` yields an empty string.
#[must_use]
pub fn to_chat_markdown_opt(html: Option<&str>) -> String {
    html.map(to_chat_markdown).unwrap_or_default()
}

/// Convert HTML to chat markdown, returning an empty string on failure.
///
/// A conversion error is logged through `tracing` at warn level and never
/// propagated to the caller.
#[must_use]
pub fn to_chat_markdown_with_options(html: &str, options: &ConversionOptions) -> String {
    match convert_html(html, options) {
        Ok(markdown) => {
            tracing::trace!(input = html.len(), output = markdown.len(), "converted HTML to chat markdown");
            markdown
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to convert HTML to chat markdown");
            String::new()
        }
    }
}
