//! Syntax tree → HTML.
//!
//! The tree is replayed as pulldown-cmark events and handed to its HTML
//! writer. `html` nodes are written verbatim; text is escaped.

use pulldown_cmark::{
    Alignment as CmarkAlignment, CodeBlockKind, CowStr, Event, HeadingLevel, LinkType, Tag,
    TagEnd, html,
};
use vaultpress_core::{Node, TableAlignment};

/// Render a tree to an HTML fragment
pub fn render_html(root: &Node) -> String {
    let mut events = Vec::new();
    push_events(root, &mut events);

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

fn heading_level(level: u8) -> HeadingLevel {
    HeadingLevel::try_from(usize::from(level.clamp(1, 6))).unwrap_or(HeadingLevel::H6)
}

fn alignment(align: TableAlignment) -> CmarkAlignment {
    match align {
        TableAlignment::Left => CmarkAlignment::Left,
        TableAlignment::Center => CmarkAlignment::Center,
        TableAlignment::Right => CmarkAlignment::Right,
        TableAlignment::None => CmarkAlignment::None,
    }
}

fn push_children<'a>(children: &'a [Node], events: &mut Vec<Event<'a>>) {
    for child in children {
        push_events(child, events);
    }
}

fn wrap<'a>(tag: Tag<'a>, children: &'a [Node], events: &mut Vec<Event<'a>>) {
    let end = tag.to_end();
    events.push(Event::Start(tag));
    push_children(children, events);
    events.push(Event::End(end));
}

fn push_events<'a>(node: &'a Node, events: &mut Vec<Event<'a>>) {
    match node {
        Node::Root { children } => push_children(children, events),
        Node::Paragraph { children } => wrap(Tag::Paragraph, children, events),
        Node::Heading { level, children } => wrap(
            Tag::Heading {
                level: heading_level(*level),
                id: None,
                classes: Vec::new(),
                attrs: Vec::new(),
            },
            children,
            events,
        ),
        Node::Blockquote { children } => wrap(Tag::BlockQuote(None), children, events),
        Node::List {
            ordered,
            start,
            children,
        } => {
            let start = ordered.then(|| start.unwrap_or(1));
            wrap(Tag::List(start), children, events);
        }
        Node::ListItem { checked, children } => {
            events.push(Event::Start(Tag::Item));
            if let Some(done) = checked {
                events.push(Event::TaskListMarker(*done));
            }
            push_children(children, events);
            events.push(Event::End(TagEnd::Item));
        }
        Node::Table {
            alignments,
            children,
        } => wrap(
            Tag::Table(alignments.iter().copied().map(alignment).collect()),
            children,
            events,
        ),
        Node::TableHead { children } => wrap(Tag::TableHead, children, events),
        Node::TableRow { children } => wrap(Tag::TableRow, children, events),
        Node::TableCell { children } => wrap(Tag::TableCell, children, events),
        Node::Emphasis { children } => wrap(Tag::Emphasis, children, events),
        Node::Strong { children } => wrap(Tag::Strong, children, events),
        Node::Delete { children } => wrap(Tag::Strikethrough, children, events),
        Node::Link {
            url,
            title,
            children,
        } => wrap(
            Tag::Link {
                link_type: LinkType::Inline,
                dest_url: CowStr::Borrowed(url),
                title: CowStr::Borrowed(title.as_deref().unwrap_or_default()),
                id: CowStr::Borrowed(""),
            },
            children,
            events,
        ),
        Node::Image { url, title, alt } => {
            events.push(Event::Start(Tag::Image {
                link_type: LinkType::Inline,
                dest_url: CowStr::Borrowed(url),
                title: CowStr::Borrowed(title.as_deref().unwrap_or_default()),
                id: CowStr::Borrowed(""),
            }));
            events.push(Event::Text(CowStr::Borrowed(alt)));
            events.push(Event::End(TagEnd::Image));
        }
        Node::Code { lang, value } => {
            let kind = match lang {
                Some(lang) => CodeBlockKind::Fenced(CowStr::Borrowed(lang)),
                None => CodeBlockKind::Indented,
            };
            events.push(Event::Start(Tag::CodeBlock(kind)));
            events.push(Event::Text(CowStr::Borrowed(value)));
            events.push(Event::End(TagEnd::CodeBlock));
        }
        Node::InlineCode { value } => events.push(Event::Code(CowStr::Borrowed(value))),
        Node::Html { value } => events.push(Event::Html(CowStr::Borrowed(value))),
        Node::Text { value } => events.push(Event::Text(CowStr::Borrowed(value))),
        Node::Break => events.push(Event::HardBreak),
        Node::ThematicBreak => events.push(Event::Rule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_markdown;

    #[test]
    fn test_html_nodes_are_raw_and_text_is_escaped() {
        let root = Node::root(vec![Node::paragraph(vec![
            Node::text("a < b "),
            Node::html(r#"<a href="/x">x</a>"#),
        ])]);
        assert_eq!(
            render_html(&root),
            "<p>a &lt; b <a href=\"/x\">x</a></p>\n"
        );
    }

    #[test]
    fn test_heading_and_list() {
        let root = parse_markdown("# Title\n\n- one\n- two\n");
        assert_eq!(
            render_html(&root),
            "<h1>Title</h1>\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_code_block_escaped() {
        let root = parse_markdown("```\n<b>\n```\n");
        assert_eq!(render_html(&root), "<pre><code>&lt;b&gt;\n</code></pre>\n");
    }

    #[test]
    fn test_fenced_code_language_class() {
        let root = parse_markdown("```rust\nfn main() {}\n```\n");
        assert_eq!(
            render_html(&root),
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn test_soft_break_newline_preserved() {
        let root = parse_markdown("line one\nline two");
        assert_eq!(render_html(&root), "<p>line one\nline two</p>\n");
    }

    #[test]
    fn test_link_and_emphasis() {
        let root = parse_markdown("[*x*](https://example.com \"t\")");
        assert_eq!(
            render_html(&root),
            "<p><a href=\"https://example.com\" title=\"t\"><em>x</em></a></p>\n"
        );
    }
}
