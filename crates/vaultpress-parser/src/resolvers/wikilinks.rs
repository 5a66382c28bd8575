//! Wiki-link resolution: `[[Note]]`, `[[Note|Label]]`, `[[#Heading]]`,
//! `[[Note#Heading]]`

use super::link_utils::{parse_wikilink, slugify_anchor};
use super::{Transform, TransformStats, replace_matches, rewrite_text_nodes};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use vaultpress_core::{Node, NoteIndex, PublishConfig, SlugMap, escape_html};

/// Matches [[...]]; the embed form is rejected by looking at the preceding char
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

#[inline]
fn has_wikilink(text: &str) -> bool {
    text.contains("[[")
}

/// Which rule produced a link's href
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `[[#Heading]]` within the same document
    Anchor,
    /// Title found in the slug map
    CrossPost,
    /// Title found in the note index
    Note,
    /// Unknown title, href guessed from the name
    Fallback,
}

/// A resolved wiki-link, before HTML escaping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub href: String,
    pub label: String,
    pub kind: LinkKind,
}

impl ResolvedLink {
    pub fn to_html(&self) -> String {
        format!(
            r#"<a href="{}">{}</a>"#,
            escape_html(&self.href),
            escape_html(&self.label)
        )
    }
}

/// Rewrites wiki-links using the slug map and note index
pub struct WikiLinkResolver<'a> {
    notes: &'a NoteIndex,
    slugs: &'a SlugMap,
    config: &'a PublishConfig,
}

impl<'a> WikiLinkResolver<'a> {
    pub fn new(notes: &'a NoteIndex, slugs: &'a SlugMap, config: &'a PublishConfig) -> Self {
        Self {
            notes,
            slugs,
            config,
        }
    }

    /// Resolve the inside of `[[...]]`.
    ///
    /// Precedence: same-document anchor, then slug map, then note index, then
    /// a best-effort fallback. An empty anchor (`[[#|Back to top]]`) links to
    /// the top of the page. Returns `None` only when there is neither a page
    /// nor an anchor (`[[|label]]`).
    pub fn resolve_link(&self, inner: &str) -> Option<ResolvedLink> {
        let target = parse_wikilink(inner.trim());
        let fragment = target
            .anchor
            .filter(|a| !a.is_empty())
            .map(|a| format!("#{}", slugify_anchor(a)))
            .unwrap_or_default();

        let Some(page) = target.page else {
            let anchor = target.anchor?;
            return Some(ResolvedLink {
                href: format!("#{}", slugify_anchor(anchor)),
                label: target.display.unwrap_or(anchor).to_string(),
                kind: LinkKind::Anchor,
            });
        };

        let label = target.display.unwrap_or(page).to_string();
        let base = self.config.publish_base.trim_end_matches('/');

        let (href, kind) = if let Some(slug) = self.slugs.get(page) {
            (
                format!("{}{}{}", self.config.blog_prefix, slug, fragment),
                LinkKind::CrossPost,
            )
        } else if let Some(path) = self.notes.get(page) {
            (format!("{}/{}{}", base, path, fragment), LinkKind::Note)
        } else {
            log::debug!("Wiki-link target not in vault, using fallback: {}", page);
            (
                format!("{}/{}{}", base, page.replace(' ', "+"), fragment),
                LinkKind::Fallback,
            )
        };

        Some(ResolvedLink { href, label, kind })
    }

    /// Replacement nodes for one text value, or `None` if nothing was resolved
    pub fn rewrite(&self, text: &str, stats: &mut TransformStats) -> Option<Vec<Node>> {
        if !has_wikilink(text) {
            return None;
        }

        replace_matches(text, &WIKILINK_PATTERN, |caps, preceding| {
            if preceding == Some('!') {
                return None;
            }
            let inner = caps.get(1).map_or("", |m| m.as_str());
            let link = self.resolve_link(inner)?;
            match link.kind {
                LinkKind::Anchor => stats.anchor_links += 1,
                LinkKind::CrossPost => stats.cross_post_links += 1,
                LinkKind::Note => stats.note_links += 1,
                LinkKind::Fallback => stats.fallback_links += 1,
            }
            Some(Node::html(link.to_html()))
        })
    }
}

impl Transform for WikiLinkResolver<'_> {
    fn name(&self) -> &'static str {
        "wiki-links"
    }

    fn apply(&self, root: &mut Node) -> TransformStats {
        let mut stats = TransformStats::default();
        rewrite_text_nodes(root, &mut |text: &str| self.rewrite(text, &mut stats));
        stats
    }
}
