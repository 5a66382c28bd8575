//! Tree rewriters for Obsidian-only syntax.
//!
//! Each resolver walks a [`Node`] tree and rewrites `text` nodes in place:
//!
//! 1. [`CommentStripper`] removes `%%...%%` spans and prunes emptied paragraphs
//! 2. [`ImageEmbedResolver`] turns `![[image.png]]` into `<img>`/`<figure>` markup
//! 3. [`WikiLinkResolver`] turns `[[Note]]` into `<a>` markup
//!
//! Rewrites never reorder or alter text outside a matched span. A rewritten
//! text node is replaced by an ordered list of `text`/`html` siblings, and the
//! walk resumes after the inserted nodes so nothing is visited twice.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use vaultpress_core::Node;

mod comments;
mod embeds;
pub mod link_utils;
mod wikilinks;

pub use comments::CommentStripper;
pub use embeds::ImageEmbedResolver;
pub use wikilinks::{LinkKind, ResolvedLink, WikiLinkResolver};

/// A single pass over a syntax tree
pub trait Transform {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Rewrite `root` in place and report what changed
    fn apply(&self, root: &mut Node) -> TransformStats;
}

/// Counters reported by the resolvers
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformStats {
    pub comments_removed: usize,
    pub paragraphs_pruned: usize,
    pub embeds_resolved: usize,
    /// `![[...]]` without an image extension, left as text
    pub embeds_passed_through: usize,
    pub anchor_links: usize,
    pub cross_post_links: usize,
    pub note_links: usize,
    /// Links to notes missing from both the slug map and the note index
    pub fallback_links: usize,
}

impl TransformStats {
    /// Total wiki-links rewritten
    pub fn links_resolved(&self) -> usize {
        self.anchor_links + self.cross_post_links + self.note_links + self.fallback_links
    }
}

impl AddAssign for TransformStats {
    fn add_assign(&mut self, other: Self) {
        self.comments_removed += other.comments_removed;
        self.paragraphs_pruned += other.paragraphs_pruned;
        self.embeds_resolved += other.embeds_resolved;
        self.embeds_passed_through += other.embeds_passed_through;
        self.anchor_links += other.anchor_links;
        self.cross_post_links += other.cross_post_links;
        self.note_links += other.note_links;
        self.fallback_links += other.fallback_links;
    }
}

/// Walk `node` and replace each `text` descendant for which `rewrite`
/// returns replacement nodes.
///
/// Replacements are spliced into the parent's child list in one step, and
/// the walk continues at the index just past them. Returns the number of
/// text nodes replaced.
pub fn rewrite_text_nodes<F>(node: &mut Node, rewrite: &mut F) -> usize
where
    F: FnMut(&str) -> Option<Vec<Node>>,
{
    let Some(children) = node.children_mut() else {
        return 0;
    };

    let mut replaced = 0;
    let mut index = 0;
    while index < children.len() {
        let replacement = match &children[index] {
            Node::Text { value } => Some(rewrite(value)),
            _ => None,
        };

        index = match replacement {
            Some(Some(parts)) => {
                replaced += 1;
                splice(children, index, parts)
            }
            Some(None) => index + 1,
            None => {
                replaced += rewrite_text_nodes(&mut children[index], rewrite);
                index + 1
            }
        };
    }
    replaced
}

/// Replace `children[index]` with `parts` and return the index just past them
pub fn splice(children: &mut Vec<Node>, index: usize, parts: Vec<Node>) -> usize {
    let inserted = parts.len();
    children.splice(index..=index, parts);
    index + inserted
}

/// Split `text` around the matches of `pattern`.
///
/// `resolve` receives each match together with the character immediately
/// before it in `text`, and returns the node to substitute or `None` to keep
/// the raw match as text. After a rejected match the search restarts one
/// character later, so a shorter match nested inside it is still found.
/// Unchanged text is coalesced into `text` nodes. Returns `None` when no
/// match was substituted.
pub(crate) fn replace_matches<F>(text: &str, pattern: &Regex, mut resolve: F) -> Option<Vec<Node>>
where
    F: FnMut(&Captures<'_>, Option<char>) -> Option<Node>,
{
    let mut parts = Vec::new();
    let mut last = 0;
    let mut search = 0;

    while let Some(caps) = pattern.captures_at(text, search) {
        let Some(full) = caps.get(0) else {
            break;
        };

        let preceding = text[..full.start()].chars().next_back();
        match resolve(&caps, preceding) {
            Some(node) => {
                if last < full.start() {
                    parts.push(Node::text(&text[last..full.start()]));
                }
                parts.push(node);
                last = full.end();
                search = full.end().max(full.start() + 1);
            }
            None => {
                let step = text[full.start()..].chars().next().map_or(1, char::len_utf8);
                search = full.start() + step;
            }
        }
        if search > text.len() {
            break;
        }
    }

    if parts.is_empty() {
        return None;
    }

    if last < text.len() {
        parts.push(Node::text(&text[last..]));
    }
    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

    fn tag_digits(text: &str) -> Option<Vec<Node>> {
        replace_matches(text, &DIGITS, |caps, _| {
            Some(Node::html(format!("<b>{}</b>", &caps[0])))
        })
    }

    #[test]
    fn test_replace_matches_preserves_surrounding_text() {
        let parts = tag_digits("a1b22c").unwrap();
        assert_eq!(
            parts,
            vec![
                Node::text("a"),
                Node::html("<b>1</b>"),
                Node::text("b"),
                Node::html("<b>22</b>"),
                Node::text("c"),
            ]
        );
    }

    #[test]
    fn test_replace_matches_no_match_is_none() {
        assert!(tag_digits("no digits here").is_none());
    }

    #[test]
    fn test_replace_matches_keeps_rejected_match_in_text() {
        let parts = replace_matches("x1 y2", &DIGITS, |caps, preceding| {
            (preceding != Some('x')).then(|| Node::html(caps[0].to_string()))
        })
        .unwrap();
        assert_eq!(parts, vec![Node::text("x1 y"), Node::html("2")]);
    }

    #[test]
    fn test_replace_matches_retries_inside_rejected_match() {
        // "12" is rejected after 'x'; the "2" inside it follows '1' and is kept
        let parts = replace_matches("x12", &DIGITS, |caps, preceding| {
            (preceding != Some('x')).then(|| Node::html(caps[0].to_string()))
        })
        .unwrap();
        assert_eq!(parts, vec![Node::text("x1"), Node::html("2")]);
    }

    #[test]
    fn test_rewrite_resumes_after_splice() {
        let mut root = Node::root(vec![Node::paragraph(vec![
            Node::text("1 and 2"),
            Node::Emphasis {
                children: vec![Node::text("3")],
            },
            Node::text("done"),
        ])]);

        let mut visited = Vec::new();
        let replaced = rewrite_text_nodes(&mut root, &mut |text: &str| {
            visited.push(text.to_string());
            tag_digits(text)
        });

        assert_eq!(replaced, 2);
        // inserted nodes are not revisited
        assert_eq!(visited, vec!["1 and 2", "3", "done"]);
        assert_eq!(
            root.text_content(),
            "<b>1</b> and <b>2</b><b>3</b>done"
        );
    }

    #[test]
    fn test_rewrite_skips_code() {
        let mut root = Node::root(vec![Node::InlineCode {
            value: "42".to_string(),
        }]);
        let replaced = rewrite_text_nodes(&mut root, &mut tag_digits);
        assert_eq!(replaced, 0);
    }

    #[test]
    fn test_stats_add_assign() {
        let mut total = TransformStats {
            note_links: 1,
            ..Default::default()
        };
        total += TransformStats {
            note_links: 2,
            anchor_links: 1,
            ..Default::default()
        };
        assert_eq!(total.note_links, 3);
        assert_eq!(total.links_resolved(), 4);
    }
}
