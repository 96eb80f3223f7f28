//! Main conversion pipeline for HTML to chat markdown.

use crate::converter::preprocess::{preprocess_html, strip_script_and_style_tags};
use crate::converter::repair::{has_implicitly_closed_blocks, repair_with_html5ever};
use crate::converter::walker::format_node;
use crate::error::{ConversionError, Result};
use crate::options::ConversionOptions;
use crate::text::normalize_output;

/// Converts HTML to chat markdown using the provided options.
///
/// Empty or whitespace-only input yields an empty string without invoking the
/// parser. Parser failures are returned as [`ConversionError::ParseError`].
///
/// Before parsing, `<script>`/`<style>` elements are removed and self-closing
/// tags rewritten. Blocks left open by omitted end tags (`<li>a<li>b`) are
/// closed by a repair pass through html5ever.
pub fn convert_html(html: &str, options: &ConversionOptions) -> Result<String> {
    let trimmed = html.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    // Strip script and style bodies first so markup-like content inside them
    // cannot confuse the parser.
    let stripped = strip_script_and_style_tags(trimmed, options);
    let mut preprocessed = preprocess_html(&stripped).into_owned();

    let needs_repair = {
        let dom = tl::parse(&preprocessed, tl::ParserOptions::default()).map_err(|_| parse_error())?;
        has_implicitly_closed_blocks(&dom, dom.parser())
    };
    if needs_repair {
        if let Some(repaired_html) = repair_with_html5ever(&preprocessed) {
            preprocessed = preprocess_html(&repaired_html).into_owned();
        }
    }

    let dom = tl::parse(&preprocessed, tl::ParserOptions::default()).map_err(|_| parse_error())?;
    let parser = dom.parser();

    let mut output = String::with_capacity(preprocessed.len());
    for child_handle in dom.children() {
        let fragment = format_node(*child_handle, parser, options);
        if !fragment.is_empty() {
            output.push_str(&fragment);
        }
    }

    if output.is_empty() {
        return Ok(output);
    }

    Ok(normalize_output(&output))
}

fn parse_error() -> ConversionError {
    ConversionError::ParseError("Failed to parse HTML".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_skips_parser() {
        let options = ConversionOptions::default();
        assert_eq!(convert_html("", &options).unwrap(), "");
        assert_eq!(convert_html(" \n\t ", &options).unwrap(), "");
    }

    #[test]
    fn test_only_dropped_content() {
        let options = ConversionOptions::default();
        assert_eq!(convert_html("<script>alert(1)</script>", &options).unwrap(), "");
    }

    #[test]
    fn test_script_with_markup_keeps_siblings() {
        let options = ConversionOptions::default();
        assert_eq!(
            convert_html("<script>if (a < b) { x = \"<b>\"; }</script>text", &options).unwrap(),
            "text"
        );
        assert_eq!(convert_html("<script>a<b</script>text", &options).unwrap(), "text");
    }

    #[test]
    fn test_repair_closes_implicit_list_items() {
        let options = ConversionOptions::default();
        assert_eq!(convert_html("<ul><li>a<li>b</ul>", &options).unwrap(), "- a\n- b");
        assert_eq!(convert_html("<p>a<p>b", &options).unwrap(), "a\n\nb");
    }

    #[test]
    fn test_top_level_fragments_join_without_separator() {
        let options = ConversionOptions::default();
        assert_eq!(
            convert_html("<b>one</b><i>two</i> three", &options).unwrap(),
            "*one*_two_ three"
        );
    }
}
