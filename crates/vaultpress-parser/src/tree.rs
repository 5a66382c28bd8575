//! Markdown → syntax tree using pulldown-cmark.
//!
//! The event stream is folded into a [`Node`] tree with a stack of open
//! containers. Adjacent text events are coalesced and soft line breaks are
//! kept as `\n`, so a `[[...]]` or `%%...%%` span inside one paragraph ends up
//! in a single `text` node no matter how pulldown-cmark chunks it.

use pulldown_cmark::{
    Alignment as CmarkAlignment, CodeBlockKind, Event, MetadataBlockKind, Options, Parser, Tag,
};
use std::collections::HashMap;
use vaultpress_core::{Document, Frontmatter, Node, TableAlignment};

/// Extensions enabled for vault documents
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Parse a markdown document into frontmatter and a syntax tree
pub fn parse_document(markdown: &str) -> Document {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(markdown, markdown_options()) {
        builder.push_event(event);
    }
    builder.finish()
}

/// Parse markdown, discarding frontmatter
pub fn parse_markdown(markdown: &str) -> Node {
    parse_document(markdown).root
}

/// Parse a YAML frontmatter block. Invalid YAML yields `None`.
pub fn parse_frontmatter(yaml: &str) -> Option<Frontmatter> {
    if yaml.trim().is_empty() {
        return Some(Frontmatter::default());
    }
    match serde_yaml::from_str::<HashMap<String, serde_json::Value>>(yaml) {
        Ok(data) => Some(Frontmatter { data }),
        Err(e) => {
            log::warn!("Ignoring invalid frontmatter: {}", e);
            None
        }
    }
}

/// Container waiting for its end event
enum Frame {
    Root,
    Paragraph,
    Heading(u8),
    Blockquote,
    List { ordered: bool, start: Option<u64> },
    ListItem { checked: Option<bool> },
    Table(Vec<TableAlignment>),
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Delete,
    Link { url: String, title: Option<String> },
    Image { url: String, title: Option<String> },
    CodeBlock { lang: Option<String> },
    HtmlBlock,
    Metadata,
    /// Tags without a node kind; children are hoisted into the parent
    Passthrough,
}

struct Open {
    frame: Frame,
    children: Vec<Node>,
}

struct TreeBuilder {
    stack: Vec<Open>,
    frontmatter: Option<Frontmatter>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Open {
                frame: Frame::Root,
                children: Vec::new(),
            }],
            frontmatter: None,
        }
    }

    fn top(&mut self) -> &mut Open {
        // the root frame is never popped before `finish`
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn open(&mut self, frame: Frame) {
        self.stack.push(Open {
            frame,
            children: Vec::new(),
        });
    }

    fn push_node(&mut self, node: Node) {
        self.top().children.push(node);
    }

    /// Append to the trailing text node, or start a new one
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let children = &mut self.top().children;
        if let Some(Node::Text { value }) = children.last_mut() {
            value.push_str(text);
        } else {
            children.push(Node::text(text));
        }
    }

    fn push_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_node(Node::InlineCode {
                value: code.to_string(),
            }),
            Event::Html(html) | Event::InlineHtml(html) => {
                if matches!(self.top().frame, Frame::HtmlBlock) {
                    self.push_text(&html);
                } else {
                    self.push_node(Node::html(html.to_string()));
                }
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => self.push_text(&math),
            Event::FootnoteReference(label) => self.push_text(&format!("[^{}]", label)),
            Event::SoftBreak => self.push_text("\n"),
            Event::HardBreak => self.push_node(Node::Break),
            Event::Rule => self.push_node(Node::ThematicBreak),
            Event::TaskListMarker(done) => {
                if let Frame::ListItem { checked } = &mut self.top().frame {
                    *checked = Some(done);
                }
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph,
            Tag::Heading { level, .. } => Frame::Heading(level as u8),
            Tag::BlockQuote(_) => Frame::Blockquote,
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                lang: match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                },
            },
            Tag::HtmlBlock => Frame::HtmlBlock,
            Tag::List(start) => Frame::List {
                ordered: start.is_some(),
                start,
            },
            Tag::Item => Frame::ListItem { checked: None },
            Tag::Table(alignments) => Frame::Table(
                alignments
                    .iter()
                    .map(|a| match a {
                        CmarkAlignment::Left => TableAlignment::Left,
                        CmarkAlignment::Center => TableAlignment::Center,
                        CmarkAlignment::Right => TableAlignment::Right,
                        CmarkAlignment::None => TableAlignment::None,
                    })
                    .collect(),
            ),
            Tag::TableHead => Frame::TableHead,
            Tag::TableRow => Frame::TableRow,
            Tag::TableCell => Frame::TableCell,
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Strikethrough => Frame::Delete,
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                url: dest_url.to_string(),
                title: (!title.is_empty()).then(|| title.to_string()),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                url: dest_url.to_string(),
                title: (!title.is_empty()).then(|| title.to_string()),
            },
            Tag::MetadataBlock(MetadataBlockKind::YamlStyle) => Frame::Metadata,
            _ => Frame::Passthrough,
        };
        self.open(frame);
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            log::warn!("Unbalanced end event in markdown stream");
            return;
        }
        let Some(Open { frame, children }) = self.stack.pop() else {
            return;
        };

        let node = match frame {
            Frame::Root => Node::root(children),
            Frame::Paragraph => Node::paragraph(children),
            Frame::Heading(level) => Node::Heading { level, children },
            Frame::Blockquote => Node::Blockquote { children },
            Frame::List { ordered, start } => Node::List {
                ordered,
                start,
                children,
            },
            Frame::ListItem { checked } => Node::ListItem { checked, children },
            Frame::Table(alignments) => Node::Table {
                alignments,
                children,
            },
            Frame::TableHead => Node::TableHead { children },
            Frame::TableRow => Node::TableRow { children },
            Frame::TableCell => Node::TableCell { children },
            Frame::Emphasis => Node::Emphasis { children },
            Frame::Strong => Node::Strong { children },
            Frame::Delete => Node::Delete { children },
            Frame::Link { url, title } => Node::Link {
                url,
                title,
                children,
            },
            Frame::Image { url, title } => Node::Image {
                url,
                title,
                alt: Node::root(children).text_content(),
            },
            Frame::CodeBlock { lang } => Node::Code {
                lang,
                value: Node::root(children).text_content(),
            },
            Frame::HtmlBlock => Node::html(Node::root(children).text_content()),
            Frame::Metadata => {
                self.frontmatter = parse_frontmatter(&Node::root(children).text_content());
                return;
            }
            Frame::Passthrough => {
                self.top().children.extend(children);
                return;
            }
        };
        self.push_node(node);
    }

    fn finish(mut self) -> Document {
        while self.stack.len() > 1 {
            self.close();
        }
        let children = self
            .stack
            .pop()
            .map(|open| open.children)
            .unwrap_or_default();
        Document {
            frontmatter: self.frontmatter,
            root: Node::root(children),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str) -> Node {
        Node::paragraph(vec![Node::text(text)])
    }

    #[test]
    fn test_wikilink_stays_in_one_text_node() {
        let root = parse_markdown("See [[Some Note|the note]] and ![[diagram.png | 300]].");
        assert_eq!(
            root,
            Node::root(vec![para(
                "See [[Some Note|the note]] and ![[diagram.png | 300]]."
            )])
        );
    }

    #[test]
    fn test_soft_breaks_joined_into_text() {
        let root = parse_markdown("before %%line one\nline two%% after");
        assert_eq!(
            root,
            Node::root(vec![para("before %%line one\nline two%% after")])
        );
    }

    #[test]
    fn test_hard_break_is_node() {
        let root = parse_markdown("one  \ntwo");
        assert_eq!(
            root,
            Node::root(vec![Node::paragraph(vec![
                Node::text("one"),
                Node::Break,
                Node::text("two"),
            ])])
        );
    }

    #[test]
    fn test_inline_code_is_separate_kind() {
        let root = parse_markdown("Use `[[Note]]` for links");
        assert_eq!(
            root,
            Node::root(vec![Node::paragraph(vec![
                Node::text("Use "),
                Node::InlineCode {
                    value: "[[Note]]".to_string()
                },
                Node::text(" for links"),
            ])])
        );
    }

    #[test]
    fn test_code_block() {
        let root = parse_markdown("```rust\nlet x = 1;\n```\n");
        assert_eq!(
            root,
            Node::root(vec![Node::Code {
                lang: Some("rust".to_string()),
                value: "let x = 1;\n".to_string(),
            }])
        );
    }

    #[test]
    fn test_heading_and_emphasis() {
        let root = parse_markdown("## Title *here*");
        assert_eq!(
            root,
            Node::root(vec![Node::Heading {
                level: 2,
                children: vec![
                    Node::text("Title "),
                    Node::Emphasis {
                        children: vec![Node::text("here")]
                    },
                ],
            }])
        );
    }

    #[test]
    fn test_task_list() {
        let root = parse_markdown("- [x] done\n- todo\n");
        assert_eq!(
            root,
            Node::root(vec![Node::List {
                ordered: false,
                start: None,
                children: vec![
                    Node::ListItem {
                        checked: Some(true),
                        children: vec![Node::text("done")],
                    },
                    Node::ListItem {
                        checked: None,
                        children: vec![Node::text("todo")],
                    },
                ],
            }])
        );
    }

    #[test]
    fn test_image_alt_collected() {
        let root = parse_markdown("![a *b*](/x.png \"T\")");
        assert_eq!(
            root,
            Node::root(vec![Node::paragraph(vec![Node::Image {
                url: "/x.png".to_string(),
                title: Some("T".to_string()),
                alt: "a b".to_string(),
            }])])
        );
    }

    #[test]
    fn test_table() {
        let root = parse_markdown("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
        let Node::Root { children } = &root else {
            panic!("expected root");
        };
        let Node::Table {
            alignments,
            children: rows,
        } = &children[0]
        else {
            panic!("expected table, got {:?}", children[0]);
        };
        assert_eq!(alignments, &vec![TableAlignment::Left, TableAlignment::Right]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind(), "tableHead");
        assert_eq!(rows[1].text_content(), "12");
    }

    #[test]
    fn test_frontmatter_extracted() {
        let doc = parse_document("---\ntitle: Hello\npublished: true\n---\n\nBody\n");
        let fm = doc.frontmatter.unwrap();
        assert_eq!(fm.title(), Some("Hello"));
        assert!(fm.is_published());
        assert_eq!(doc.root, Node::root(vec![para("Body")]));
    }

    #[test]
    fn test_invalid_frontmatter_is_none() {
        let doc = parse_document("---\ntitle: [unclosed\n---\n\nBody\n");
        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.root, Node::root(vec![para("Body")]));
    }

    #[test]
    fn test_no_frontmatter() {
        let doc = parse_document("Just text\n");
        assert!(doc.frontmatter.is_none());
    }

    #[test]
    fn test_html_block() {
        let root = parse_markdown("<div>\nhi\n</div>\n");
        assert_eq!(root, Node::root(vec![Node::html("<div>\nhi\n</div>\n")]));
    }
}
