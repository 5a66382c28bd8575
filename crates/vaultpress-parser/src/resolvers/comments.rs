//! Obsidian comment stripping: `%% editor-only note %%`

use super::{Transform, TransformStats, rewrite_text_nodes};
use regex::Regex;
use std::sync::LazyLock;
use vaultpress_core::Node;

/// Shortest `%%...%%` span, may cross line breaks
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)%%.*?%%").unwrap());

#[inline]
fn has_comment(text: &str) -> bool {
    text.contains("%%")
}

/// Removes `%%...%%` spans from text nodes, then drops paragraphs left without
/// any content.
///
/// A paragraph counts as empty when the text of all its descendants is
/// whitespace and it holds no image. An unterminated `%%` is left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommentStripper;

impl CommentStripper {
    pub fn new() -> Self {
        Self
    }

    /// Text with every comment span removed, or `None` if there was none
    pub fn strip(&self, text: &str) -> Option<(String, usize)> {
        if !has_comment(text) {
            return None;
        }
        let removed = COMMENT.find_iter(text).count();
        if removed == 0 {
            return None;
        }
        Some((COMMENT.replace_all(text, "").into_owned(), removed))
    }
}

impl Transform for CommentStripper {
    fn name(&self) -> &'static str {
        "strip-comments"
    }

    fn apply(&self, root: &mut Node) -> TransformStats {
        let mut stats = TransformStats::default();

        rewrite_text_nodes(root, &mut |text: &str| {
            let (stripped, removed) = self.strip(text)?;
            stats.comments_removed += removed;
            if stripped.is_empty() {
                Some(Vec::new())
            } else {
                Some(vec![Node::text(stripped)])
            }
        });

        stats.paragraphs_pruned = prune_empty_paragraphs(root);

        if stats.comments_removed > 0 {
            log::debug!(
                "Removed {} comments, pruned {} empty paragraphs",
                stats.comments_removed,
                stats.paragraphs_pruned
            );
        }
        stats
    }
}

fn is_blank(paragraph: &Node) -> bool {
    paragraph.text_content().trim().is_empty() && !paragraph.contains_image()
}

/// Remove blank paragraphs anywhere below `node`. Returns how many were removed.
fn prune_empty_paragraphs(node: &mut Node) -> usize {
    let Some(children) = node.children_mut() else {
        return 0;
    };

    let mut pruned = 0;
    let mut index = 0;
    while index < children.len() {
        if matches!(children[index], Node::Paragraph { .. }) && is_blank(&children[index]) {
            // the next sibling shifts into `index`
            children.remove(index);
            pruned += 1;
            continue;
        }
        pruned += prune_empty_paragraphs(&mut children[index]);
        index += 1;
    }
    pruned
}
