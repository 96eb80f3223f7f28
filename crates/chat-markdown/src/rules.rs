//! Tag formatting rules.
//!
//! Every tag the converter knows maps to one [`Rule`]. A rule receives the
//! already-formatted text of the element's children and decides what the element
//! contributes to the output. Tags missing from the table pass their children
//! through untouched.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::text::collapse_inner;

/// Which bullet style a list rule emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `- item`
    Unordered,
    /// `1. item`, numbered over the items that survive trimming.
    Ordered,
}

/// How a tag turns its children's text into output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Surround non-empty text with `marker` on both sides.
    Inline(&'static str),
    /// Put `marker` in front of the text and nothing after it.
    Prefix(&'static str),
    /// Non-empty text wrapped as `open` + text + `close`, followed by `suffix`.
    Block {
        /// Emitted before the text.
        open: &'static str,
        /// Emitted right after the text.
        close: &'static str,
        /// Spacing emitted after the block.
        suffix: &'static str,
    },
    /// Paragraph-like block: whitespace collapsed, trimmed, then a blank line.
    Paragraph,
    /// Triple-backtick code fence.
    Fence,
    /// Every line prefixed with `> `.
    Quote,
    /// Bulleted or numbered list built from direct `li` children.
    List(ListKind),
    /// Table: text surrounded by newlines.
    Table,
    /// Table row terminated by a newline.
    Row,
    /// Table cell terminated by a tab, optionally wrapped in an inline marker.
    Cell(Option<&'static str>),
    /// Fixed output regardless of content.
    Void(&'static str),
    /// Contributes nothing, children included.
    Drop,
    /// Children's text unchanged.
    PassThrough,
}

const BOLD: &str = "*";
const ITALIC: &str = "_";
const STRIKE: &str = "~";
const CODE: &str = "`";

const HEADING: Rule = Rule::Block {
    open: BOLD,
    close: BOLD,
    suffix: "\n\n",
};

static RULES: Lazy<HashMap<&'static str, Rule>> = Lazy::new(|| {
    let entries: &[(&[&'static str], Rule)] = &[
        (&["strong", "b", "mark"], Rule::Inline(BOLD)),
        (&["em", "i", "u", "ins"], Rule::Inline(ITALIC)),
        (&["s", "strike", "del"], Rule::Inline(STRIKE)),
        (&["code", "kbd", "samp", "var", "tt"], Rule::Inline(CODE)),
        (&["pre"], Rule::Fence),
        (&["sup"], Rule::Prefix("^")),
        (&["sub"], Rule::Prefix("_")),
        (&["blockquote", "q", "cite"], Rule::Quote),
        (&["ul"], Rule::List(ListKind::Unordered)),
        (&["ol"], Rule::List(ListKind::Ordered)),
        (
            &["dl"],
            Rule::Block {
                open: "",
                close: "",
                suffix: "\n",
            },
        ),
        (
            &["dt"],
            Rule::Block {
                open: BOLD,
                close: BOLD,
                suffix: "\n",
            },
        ),
        (
            &["dd"],
            Rule::Block {
                open: "- ",
                close: "",
                suffix: "\n",
            },
        ),
        (&["br"], Rule::Void("\n")),
        (&["hr"], Rule::Void("\n---\n")),
        (&["p", "div", "section", "article"], Rule::Paragraph),
        (&["h1", "h2", "h3", "h4", "h5", "h6"], HEADING),
        (
            &["address"],
            Rule::Block {
                open: "",
                close: "",
                suffix: "\n\n",
            },
        ),
        (&["table"], Rule::Table),
        (&["tr"], Rule::Row),
        (&["th"], Rule::Cell(Some(BOLD))),
        (&["td"], Rule::Cell(None)),
        (
            &["script", "style", "meta", "link", "head", "title", "img"],
            Rule::Drop,
        ),
        (
            &["li", "thead", "tbody", "tfoot", "abbr", "small", "time", "a"],
            Rule::PassThrough,
        ),
    ];

    entries
        .iter()
        .flat_map(|(tags, rule)| tags.iter().map(move |tag| (*tag, *rule)))
        .collect()
});

/// Look up the rule for a tag name. Unknown tags pass through.
///
/// The lookup is exact: callers decide whether tag names are lowercased first.
pub fn rule_for(tag_name: &str) -> Rule {
    RULES.get(tag_name).copied().unwrap_or(Rule::PassThrough)
}

fn wrap(marker: &str, inner: &str) -> String {
    if inner.is_empty() {
        String::new()
    } else {
        format!("{marker}{inner}{marker}")
    }
}

impl Rule {
    /// Output for an element that has no children at all.
    pub fn apply_void(self) -> String {
        match self {
            Self::Void(literal) => literal.to_string(),
            _ => String::new(),
        }
    }

    /// Combine the formatted text of an element's children.
    ///
    /// List rules ignore `inner` and need their items; use [`Rule::apply_list`].
    pub fn apply(self, inner: &str) -> String {
        match self {
            Self::Inline(marker) => wrap(marker, inner),
            Self::Prefix(marker) => format!("{marker}{inner}"),
            Self::Block { open, close, suffix } => {
                if inner.is_empty() {
                    String::new()
                } else {
                    format!("{open}{inner}{close}{suffix}")
                }
            }
            Self::Paragraph => {
                let collapsed = collapse_inner(inner);
                let trimmed = collapsed.trim();
                if trimmed.is_empty() {
                    String::new()
                } else {
                    format!("{trimmed}\n\n")
                }
            }
            Self::Fence => {
                if inner.is_empty() {
                    String::new()
                } else {
                    format!("```\n{}\n```", inner.trim_matches('\n'))
                }
            }
            Self::Quote => quote(inner),
            Self::List(_) => String::new(),
            Self::Table => format!("\n{inner}\n"),
            Self::Row => format!("{inner}\n"),
            Self::Cell(marker) => {
                let mut cell = marker.map_or_else(|| inner.to_string(), |marker| wrap(marker, inner));
                cell.push('\t');
                cell
            }
            Self::Void(literal) => literal.to_string(),
            Self::Drop => String::new(),
            Self::PassThrough => inner.to_string(),
        }
    }

    /// Build a list from the formatted text of each direct `li` child.
    ///
    /// Items that are blank after trimming are dropped before numbering.
    pub fn apply_list<S: AsRef<str>>(kind: ListKind, items: &[S]) -> String {
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let text = item.as_ref().trim();
            if text.is_empty() {
                continue;
            }
            match kind {
                ListKind::Unordered => lines.push(format!("- {text}")),
                ListKind::Ordered => lines.push(format!("{}. {text}", lines.len() + 1)),
            }
        }
        lines.join("\n")
    }
}

fn quote(inner: &str) -> String {
    if inner.is_empty() {
        return String::new();
    }
    inner
        .split('\n')
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
