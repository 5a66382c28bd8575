//! # Vaultpress Parser
//!
//! Markdown front end and Obsidian syntax resolvers built on `pulldown-cmark`.
//!
//! This crate provides:
//! - Markdown → [`Node`](vaultpress_core::Node) tree with YAML frontmatter extraction
//! - Tree → HTML rendering
//! - Resolvers for Obsidian-only syntax: `%%comments%%`, `![[embeds]]`, `[[wiki-links]]`
//!
//! ## Architecture
//!
//! Parsing is a single pulldown-cmark pass folded into a syntax tree. Text
//! events are coalesced, so each run of inline text is one `text` node.
//!
//! Resolvers then rewrite `text` nodes with regex passes. Code blocks and
//! inline code are separate node kinds and are never touched. Matches become
//! raw `html` nodes, which the renderer writes verbatim.
//!
//! Resolver order matters: comments are stripped first so commented-out
//! syntax is never resolved, and embeds are resolved before wiki-links.
//!
//! ## Quick Start
//!
//! ```
//! use vaultpress_parser::prelude::*;
//!
//! let config = PublishConfig::default();
//! let notes: NoteIndex = [("Some Note", "Foo/Some+Note")].into_iter().collect();
//! let media = MediaIndex::new();
//! let slugs = SlugMap::new();
//!
//! let mut doc = parse_document("See [[Some Note#Intro]] %%draft%%");
//!
//! CommentStripper::new().apply(&mut doc.root);
//! ImageEmbedResolver::new(&media, &config).apply(&mut doc.root);
//! WikiLinkResolver::new(&notes, &slugs, &config).apply(&mut doc.root);
//!
//! let html = render_html(&doc.root);
//! assert!(html.contains(r#"<a href="https://brain.ryanlynch.me/Foo/Some+Note#intro">Some Note</a>"#));
//! assert!(!html.contains("draft"));
//! ```

pub mod render;
pub mod resolvers;
pub mod tree;

pub use render::render_html;
pub use resolvers::{
    CommentStripper, ImageEmbedResolver, LinkKind, ResolvedLink, Transform, TransformStats,
    WikiLinkResolver, rewrite_text_nodes,
};
pub use tree::{markdown_options, parse_document, parse_frontmatter, parse_markdown};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::render::render_html;
    pub use crate::resolvers::{
        CommentStripper, ImageEmbedResolver, LinkKind, ResolvedLink, Transform, TransformStats,
        WikiLinkResolver,
    };
    pub use crate::tree::{parse_document, parse_markdown};
    pub use vaultpress_core::prelude::*;
}
