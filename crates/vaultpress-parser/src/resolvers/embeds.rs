//! Image embed resolution: `![[image.png]]`, `![[image.png | 300]]`,
//! `![[image.png | caption]]`
//!
//! Output is raw HTML rather than markdown image syntax so that file names
//! with spaces or punctuation are not URL-encoded by the renderer.

use super::link_utils::{is_digits, split_pipe};
use super::{Transform, TransformStats, replace_matches, rewrite_text_nodes};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use vaultpress_core::{MediaIndex, Node, PublishConfig, escape_html};

/// Matches ![[...]]
static EMBED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\]]+)\]\]").unwrap());

#[inline]
fn has_embed(text: &str) -> bool {
    text.contains("![[")
}

/// Rewrites image embeds using the media index
pub struct ImageEmbedResolver<'a> {
    media: &'a MediaIndex,
    config: &'a PublishConfig,
}

impl<'a> ImageEmbedResolver<'a> {
    pub fn new(media: &'a MediaIndex, config: &'a PublishConfig) -> Self {
        Self { media, config }
    }

    /// HTML for the inside of `![[...]]`, or `None` when the target is not an
    /// image (note transclusions are passed through untouched).
    pub fn resolve_embed(&self, inner: &str) -> Option<String> {
        let (file_name, extra) = split_pipe(inner.trim());

        // `photo.png#crop` is still an image; the fragment is ignored for the test
        let base = file_name.split('#').next().unwrap_or(file_name);
        let is_image = Path::new(base)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.is_image_extension(ext));
        if !is_image {
            return None;
        }

        let source = self.source_for(file_name);
        let src = escape_html(&source);
        let alt = escape_html(file_name);

        let markup = match extra {
            Some(width) if is_digits(width) => {
                format!(r#"<img src="{}" alt="{}" width="{}">"#, src, alt, width)
            }
            Some(caption) => format!(
                r#"<figure><img src="{}" alt="{}"><figcaption>{}</figcaption></figure>"#,
                src,
                alt,
                escape_html(caption)
            ),
            None => format!(r#"<img src="{}" alt="{}">"#, src, alt),
        };
        Some(markup)
    }

    /// Indexed web path, or the media prefix joined with the raw name
    fn source_for(&self, file_name: &str) -> String {
        match self.media.get(file_name) {
            Some(path) => path.to_string(),
            None => {
                log::debug!("Media file not indexed, using fallback path: {}", file_name);
                format!(
                    "{}/{}",
                    self.config.media_prefix.trim_end_matches('/'),
                    file_name
                )
            }
        }
    }

    /// Replacement nodes for one text value, or `None` if nothing was resolved
    pub fn rewrite(&self, text: &str, stats: &mut TransformStats) -> Option<Vec<Node>> {
        if !has_embed(text) {
            return None;
        }

        replace_matches(text, &EMBED_PATTERN, |caps, _| {
            let inner = caps.get(1).map_or("", |m| m.as_str());
            match self.resolve_embed(inner) {
                Some(markup) => {
                    stats.embeds_resolved += 1;
                    Some(Node::html(markup))
                }
                None => {
                    stats.embeds_passed_through += 1;
                    None
                }
            }
        })
    }
}

impl Transform for ImageEmbedResolver<'_> {
    fn name(&self) -> &'static str {
        "image-embeds"
    }

    fn apply(&self, root: &mut Node) -> TransformStats {
        let mut stats = TransformStats::default();
        rewrite_text_nodes(root, &mut |text: &str| self.rewrite(text, &mut stats));
        stats
    }
}
