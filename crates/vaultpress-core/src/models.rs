//! Syntax tree and document models.
//!
//! [`Node`] is a tagged union over markdown node kinds, modelled after the
//! mdast vocabulary. Transforms inspect only a few kinds (`text`,
//! `paragraph`) and pass every other kind through untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column alignment of a table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TableAlignment {
    Left,
    Center,
    Right,
    None,
}

/// A node of a markdown syntax tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// Document root
    Root { children: Vec<Node> },
    /// A paragraph of inline content
    Paragraph { children: Vec<Node> },
    /// A heading (# H1, ## H2, etc.)
    Heading { level: u8, children: Vec<Node> },
    /// A blockquote (> text)
    Blockquote { children: Vec<Node> },
    /// An ordered or unordered list
    List {
        ordered: bool,
        start: Option<u64>,
        children: Vec<Node>,
    },
    /// A list item; `checked` is set for task list items
    ListItem {
        checked: Option<bool>,
        children: Vec<Node>,
    },
    /// A table; children are one `TableHead` followed by `TableRow`s
    Table {
        alignments: Vec<TableAlignment>,
        children: Vec<Node>,
    },
    /// Header row of a table
    TableHead { children: Vec<Node> },
    /// Body row of a table
    TableRow { children: Vec<Node> },
    /// A table cell
    TableCell { children: Vec<Node> },
    /// Italic text (*text* or _text_)
    Emphasis { children: Vec<Node> },
    /// Bold text (**text** or __text__)
    Strong { children: Vec<Node> },
    /// Strikethrough text (~~text~~)
    Delete { children: Vec<Node> },
    /// A link [text](url)
    Link {
        url: String,
        title: Option<String>,
        children: Vec<Node>,
    },
    /// An image ![alt](url)
    Image {
        url: String,
        title: Option<String>,
        alt: String,
    },
    /// A fenced or indented code block
    Code { lang: Option<String>, value: String },
    /// Inline code (`code`)
    InlineCode { value: String },
    /// Raw HTML, emitted verbatim by the renderer
    Html { value: String },
    /// Plain text
    Text { value: String },
    /// Hard line break
    Break,
    /// Horizontal rule (---, ***, ___)
    ThematicBreak,
}

impl Node {
    pub fn root(children: Vec<Node>) -> Self {
        Self::Root { children }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::Paragraph { children }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn html(value: impl Into<String>) -> Self {
        Self::Html {
            value: value.into(),
        }
    }

    /// Kind tag as it appears in serialized form
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Root { .. } => "root",
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::Blockquote { .. } => "blockquote",
            Self::List { .. } => "list",
            Self::ListItem { .. } => "listItem",
            Self::Table { .. } => "table",
            Self::TableHead { .. } => "tableHead",
            Self::TableRow { .. } => "tableRow",
            Self::TableCell { .. } => "tableCell",
            Self::Emphasis { .. } => "emphasis",
            Self::Strong { .. } => "strong",
            Self::Delete { .. } => "delete",
            Self::Link { .. } => "link",
            Self::Image { .. } => "image",
            Self::Code { .. } => "code",
            Self::InlineCode { .. } => "inlineCode",
            Self::Html { .. } => "html",
            Self::Text { .. } => "text",
            Self::Break => "break",
            Self::ThematicBreak => "thematicBreak",
        }
    }

    /// Child nodes of container kinds; `None` for leaves
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Self::Root { children }
            | Self::Paragraph { children }
            | Self::Heading { children, .. }
            | Self::Blockquote { children }
            | Self::List { children, .. }
            | Self::ListItem { children, .. }
            | Self::Table { children, .. }
            | Self::TableHead { children }
            | Self::TableRow { children }
            | Self::TableCell { children }
            | Self::Emphasis { children }
            | Self::Strong { children }
            | Self::Delete { children }
            | Self::Link { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Mutable child list of container kinds; `None` for leaves
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Root { children }
            | Self::Paragraph { children }
            | Self::Heading { children, .. }
            | Self::Blockquote { children }
            | Self::List { children, .. }
            | Self::ListItem { children, .. }
            | Self::Table { children, .. }
            | Self::TableHead { children }
            | Self::TableRow { children }
            | Self::TableCell { children }
            | Self::Emphasis { children }
            | Self::Strong { children }
            | Self::Delete { children }
            | Self::Link { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Concatenated textual content of this node and all its descendants.
    ///
    /// Leaf values (`text`, `inlineCode`, `code`, `html`) and image alt text
    /// contribute; structural nodes only contribute through their children.
    ///
    /// # Example
    /// ```
    /// use vaultpress_core::Node;
    ///
    /// let para = Node::paragraph(vec![
    ///     Node::text("See "),
    ///     Node::Emphasis { children: vec![Node::text("this")] },
    /// ]);
    /// assert_eq!(para.text_content(), "See this");
    /// ```
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { value }
            | Self::InlineCode { value }
            | Self::Code { value, .. }
            | Self::Html { value } => out.push_str(value),
            Self::Image { alt, .. } => out.push_str(alt),
            _ => {
                if let Some(children) = self.children() {
                    for child in children {
                        child.collect_text(out);
                    }
                }
            }
        }
    }

    /// Whether this node or any descendant is an image
    pub fn contains_image(&self) -> bool {
        match self {
            Self::Image { .. } => true,
            _ => self
                .children()
                .is_some_and(|children| children.iter().any(Node::contains_image)),
        }
    }
}

/// Parsed YAML frontmatter
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Frontmatter {
    pub data: HashMap<String, serde_json::Value>,
}

impl Frontmatter {
    fn string(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// Document title
    pub fn title(&self) -> Option<&str> {
        self.string("title")
    }

    /// Publish slug
    pub fn slug(&self) -> Option<&str> {
        self.string("slug")
    }

    /// Whether the note is flagged as published (defaults to false)
    pub fn is_published(&self) -> bool {
        self.data
            .get("published")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// A parsed markdown document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub frontmatter: Option<Frontmatter>,
    /// Always a [`Node::Root`]
    pub root: Node,
}
