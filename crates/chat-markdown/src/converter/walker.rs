//! Node formatter.
//!
//! The walk keeps its own stack of open elements instead of recursing, so the
//! nesting depth of the input is limited by memory rather than by the thread
//! stack. Each element's text is produced only after all of its children have
//! been formatted, exactly as a post-order recursive walk would produce it.

use std::borrow::Cow;

use crate::options::ConversionOptions;
use crate::rules::{Rule, rule_for};
use crate::text::decode_html_entities_cow;

/// Tag name of an element, lowercased when the options ask for it.
pub(crate) fn tag_name<'t>(tag: &'t tl::HTMLTag, options: &ConversionOptions) -> Cow<'t, str> {
    let name = tag.name().as_utf8_str();
    if options.lowercase_tags && name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        name
    }
}

/// An element whose children are still being formatted.
struct Frame {
    rule: Rule,
    children: Vec<tl::NodeHandle>,
    next: usize,
    /// Concatenated text of the children formatted so far.
    inner: String,
    /// Formatted `li` children, for list rules.
    items: Vec<String>,
}

impl Frame {
    fn next_child(&mut self) -> Option<tl::NodeHandle> {
        let child = self.children.get(self.next).copied()?;
        self.next += 1;
        Some(child)
    }

    fn accept(&mut self, text: String) {
        if matches!(self.rule, Rule::List(_)) {
            self.items.push(text);
        } else {
            self.inner.push_str(&text);
        }
    }

    fn finish(self) -> String {
        match self.rule {
            Rule::List(kind) => Rule::apply_list(kind, &self.items),
            rule => rule.apply(&self.inner),
        }
    }
}

enum Step {
    /// The node's text is known without looking at any children.
    Done(String),
    /// The node's children must be formatted first.
    Descend(Frame),
}

fn visit(handle: tl::NodeHandle, parser: &tl::Parser, options: &ConversionOptions) -> Step {
    let Some(node) = handle.get(parser) else {
        return Step::Done(String::new());
    };

    match node {
        tl::Node::Raw(bytes) => {
            let raw = bytes.as_utf8_str();
            let text = if options.decode_entities {
                decode_html_entities_cow(raw.as_ref()).into_owned()
            } else {
                raw.into_owned()
            };
            Step::Done(text)
        }
        tl::Node::Comment(_) => Step::Done(String::new()),
        tl::Node::Tag(tag) => {
            let rule = rule_for(&tag_name(tag, options));
            let children = tag.children();
            let mut handles: Vec<tl::NodeHandle> = children.top().iter().copied().collect();
            if handles.is_empty() {
                return Step::Done(rule.apply_void());
            }

            match rule {
                Rule::Drop | Rule::Void(_) => return Step::Done(rule.apply("")),
                // Lists only ever look at their direct `li` children.
                Rule::List(_) => handles.retain(|child| is_list_item(*child, parser, options)),
                _ => {}
            }

            Step::Descend(Frame {
                rule,
                children: handles,
                next: 0,
                inner: String::new(),
                items: Vec::new(),
            })
        }
    }
}

fn is_list_item(handle: tl::NodeHandle, parser: &tl::Parser, options: &ConversionOptions) -> bool {
    match handle.get(parser) {
        Some(tl::Node::Tag(tag)) => tag_name(tag, options) == "li",
        _ => false,
    }
}

/// Format one parsed node, and all of its descendants, as chat markdown.
///
/// The result is the node's raw contribution; document-level whitespace cleanup
/// happens after all top-level nodes are joined.
pub(crate) fn format_node(root: tl::NodeHandle, parser: &tl::Parser, options: &ConversionOptions) -> String {
    let mut stack: Vec<Frame> = Vec::new();
    let mut step = visit(root, parser, options);

    loop {
        match step {
            Step::Descend(frame) => stack.push(frame),
            Step::Done(text) => match stack.last_mut() {
                Some(parent) => parent.accept(text),
                None => return text,
            },
        }

        // Close every element whose children are exhausted, then descend into
        // the next pending child.
        loop {
            let Some(top) = stack.last_mut() else {
                return String::new();
            };
            if let Some(child) = top.next_child() {
                step = visit(child, parser, options);
                break;
            }

            let Some(frame) = stack.pop() else {
                return String::new();
            };
            let text = frame.finish();
            match stack.last_mut() {
                Some(parent) => parent.accept(text),
                None => return text,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_first(html: &str, options: &ConversionOptions) -> String {
        let dom = tl::parse(html, tl::ParserOptions::default()).unwrap();
        let parser = dom.parser();
        let first = dom.children()[0];
        format_node(first, parser, options)
    }

    #[test]
    fn test_text_node_is_literal() {
        assert_eq!(format_first("plain *text*", &ConversionOptions::default()), "plain *text*");
    }

    #[test]
    fn test_entities_follow_options() {
        let html = "<b>Tom &amp; Jerry</b>";
        assert_eq!(format_first(html, &ConversionOptions::default()), "*Tom & Jerry*");
        let raw = ConversionOptions::default().with_decode_entities(false);
        assert_eq!(format_first(html, &raw), "*Tom &amp; Jerry*");
    }

    #[test]
    fn test_block_output_is_not_normalized() {
        assert_eq!(format_first("<p>Para</p>", &ConversionOptions::default()), "Para\n\n");
        assert_eq!(format_first("<h1>Title</h1>", &ConversionOptions::default()), "*Title*\n\n");
    }

    #[test]
    fn test_tag_case_is_preserved_by_default() {
        let html = "<STRONG>loud</STRONG>";
        assert_eq!(format_first(html, &ConversionOptions::default()), "loud");
        let lower = ConversionOptions::default().with_lowercase_tags(true);
        assert_eq!(format_first(html, &lower), "*loud*");
    }

    #[test]
    fn test_list_ignores_non_item_children() {
        let html = "<ul>stray<li>One</li><span>also stray</span><li>Two</li></ul>";
        assert_eq!(format_first(html, &ConversionOptions::default()), "- One\n- Two");
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(format_first("<b>a<!-- note -->b</b>", &ConversionOptions::default()), "*ab*");
    }

    #[test]
    fn test_drop_ignores_children() {
        assert_eq!(format_first("<style>body { color: red }</style>", &ConversionOptions::default()), "");
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 2_000;
        let html = format!("{}deep{}", "<span>".repeat(depth), "</span>".repeat(depth));
        assert_eq!(format_first(&html, &ConversionOptions::default()), "deep");
    }
}
