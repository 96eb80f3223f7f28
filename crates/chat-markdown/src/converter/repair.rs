//! Repair of blocks whose end tags were left implicit.
//!
//! HTML lets `</li>`, `</p>`, `</dt>`, `</dd>`, `</tr>` and `</td>` be omitted;
//! the next sibling start tag closes them. `tl` does not know this and nests
//! the sibling inside instead. When such nesting shows up, the document is
//! re-serialized through html5ever, whose tree builder applies the closing
//! rules, and parsed again.

/// Whether a `child` start tag would implicitly close an open `parent`.
fn closes_parent(parent: &str, child: &str) -> bool {
    match parent {
        "li" => child == "li",
        "dt" | "dd" => matches!(child, "dt" | "dd"),
        "tr" => child == "tr",
        "td" | "th" => matches!(child, "td" | "th" | "tr"),
        "p" => matches!(
            child,
            "address"
                | "article"
                | "aside"
                | "blockquote"
                | "div"
                | "dl"
                | "fieldset"
                | "footer"
                | "form"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "header"
                | "hr"
                | "menu"
                | "nav"
                | "ol"
                | "p"
                | "pre"
                | "section"
                | "table"
                | "ul"
        ),
        _ => false,
    }
}

fn lowercase_name(tag: &tl::HTMLTag) -> String {
    tag.name().as_utf8_str().to_ascii_lowercase()
}

/// Detect an element nested directly inside one it should have closed.
pub(crate) fn has_implicitly_closed_blocks(dom: &tl::VDom, parser: &tl::Parser) -> bool {
    let mut pending: Vec<tl::NodeHandle> = dom.children().to_vec();

    while let Some(handle) = pending.pop() {
        let Some(tl::Node::Tag(tag)) = handle.get(parser) else {
            continue;
        };
        let parent = lowercase_name(tag);
        let children = tag.children();
        for child_handle in children.top().iter() {
            if let Some(tl::Node::Tag(child)) = child_handle.get(parser) {
                if closes_parent(&parent, &lowercase_name(child)) {
                    return true;
                }
                pending.push(*child_handle);
            }
        }
    }

    false
}

/// Try to repair HTML using html5ever parser.
///
/// Returns Some(repaired_html) if repair was successful, None otherwise.
pub(crate) fn repair_with_html5ever(input: &str) -> Option<String> {
    use html5ever::serialize::{SerializeOpts, serialize};
    use html5ever::tendril::TendrilSink;
    use markup5ever_rcdom::{RcDom, SerializableHandle};

    let dom = html5ever::parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut input.as_bytes())
        .ok()?;

    let mut buf = Vec::with_capacity(input.len());
    let handle = SerializableHandle::from(dom.document);
    serialize(&mut buf, &handle, SerializeOpts::default()).ok()?;
    String::from_utf8(buf).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn needs_repair(html: &str) -> bool {
        let dom = tl::parse(html, tl::ParserOptions::default()).unwrap();
        has_implicitly_closed_blocks(&dom, dom.parser())
    }

    #[test]
    fn test_detects_unclosed_list_items() {
        assert!(needs_repair("<ul><li>a<li>b</ul>"));
        assert!(!needs_repair("<ul><li>a</li><li>b</li></ul>"));
    }

    #[test]
    fn test_nested_list_is_not_misnested() {
        assert!(!needs_repair("<ul><li>a<ul><li>b</li></ul></li></ul>"));
    }

    #[test]
    fn test_detects_unclosed_paragraphs() {
        assert!(needs_repair("<p>a<p>b"));
        assert!(needs_repair("<div><p>a<ul><li>b</li></ul></div>"));
        assert!(!needs_repair("<p>a <b>bold</b></p><p>b</p>"));
    }

    #[test]
    fn test_closes_parent_rules() {
        assert!(closes_parent("dt", "dd"));
        assert!(closes_parent("td", "tr"));
        assert!(!closes_parent("li", "ul"));
        assert!(!closes_parent("span", "p"));
    }

    #[test]
    fn test_repair_closes_list_items() {
        let repaired = repair_with_html5ever("<ul><li>a<li>b</ul>").unwrap();
        assert!(repaired.contains("<li>a</li><li>b</li>"));
    }
}
