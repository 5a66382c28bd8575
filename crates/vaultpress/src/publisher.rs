//! Wires configuration, indices and resolvers into one pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::instrument;
use vaultpress_core::prelude::*;
use vaultpress_parser::{
    CommentStripper, ImageEmbedResolver, Transform, TransformStats, WikiLinkResolver,
    parse_document, render_html,
};
use vaultpress_vault::VaultIndex;

/// A rendered markdown document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub frontmatter: Option<Frontmatter>,
    pub html: String,
    pub stats: TransformStats,
}

/// Resolves documents against one vault.
///
/// The indices are built once at construction and are not refreshed when
/// the vault changes; call [`Publisher::rebuild_index`] to pick up changes.
#[derive(Debug, Clone)]
pub struct Publisher {
    config: PublishConfig,
    index: VaultIndex,
    slugs: SlugMap,
}

impl Publisher {
    /// Validate `config` and index its vault
    #[instrument(skip_all, name = "publisher_new")]
    pub fn new(config: PublishConfig, slugs: SlugMap) -> Result<Self> {
        config.validate()?;
        let index = VaultIndex::build(&config)?;
        Ok(Self {
            config,
            index,
            slugs,
        })
    }

    /// Like [`Publisher::new`], loading the slug map from `config.slug_map_path` if set
    pub fn from_config(config: PublishConfig) -> Result<Self> {
        let slugs = match &config.slug_map_path {
            Some(path) => SlugMap::load(path)?,
            None => SlugMap::new(),
        };
        Self::new(config, slugs)
    }

    /// Use a pre-built index instead of scanning
    pub fn from_parts(config: PublishConfig, index: VaultIndex, slugs: SlugMap) -> Self {
        Self {
            config,
            index,
            slugs,
        }
    }

    /// Rescan the vault and replace both indices
    #[instrument(skip(self), name = "publisher_rebuild_index")]
    pub fn rebuild_index(&mut self) -> Result<()> {
        self.index = VaultIndex::build(&self.config)?;
        Ok(())
    }

    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    pub fn index(&self) -> &VaultIndex {
        &self.index
    }

    pub fn slugs(&self) -> &SlugMap {
        &self.slugs
    }

    /// Run comment stripping, embed resolution and wiki-link resolution, in
    /// that order, over `root`.
    #[instrument(skip_all, name = "publisher_transform")]
    pub fn transform(&self, root: &mut Node) -> TransformStats {
        let comments = CommentStripper::new();
        let embeds = ImageEmbedResolver::new(&self.index.media, &self.config);
        let links = WikiLinkResolver::new(&self.index.notes, &self.slugs, &self.config);
        let passes: [&dyn Transform; 3] = [&comments, &embeds, &links];

        let mut total = TransformStats::default();
        for pass in passes {
            let stats = pass.apply(root);
            log::trace!("{}: {:?}", pass.name(), stats);
            total += stats;
        }

        log::debug!(
            "Transformed tree: {} comments, {} embeds, {} links",
            total.comments_removed,
            total.embeds_resolved,
            total.links_resolved()
        );
        total
    }

    /// Parse, transform and render a markdown document
    pub fn render_markdown(&self, markdown: &str) -> RenderedDocument {
        let mut doc = parse_document(markdown);
        let stats = self.transform(&mut doc.root);
        RenderedDocument {
            frontmatter: doc.frontmatter,
            html: render_html(&doc.root),
            stats,
        }
    }

    /// Read and render a markdown file
    #[instrument(skip(self), fields(file = ?path), name = "publisher_render_file")]
    pub fn render_file(&self, path: &Path) -> Result<RenderedDocument> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let markdown = std::fs::read_to_string(path)?;
        Ok(self.render_markdown(&markdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher() -> Publisher {
        let index = VaultIndex {
            notes: [("Some Note", "Foo/Some+Note")].into_iter().collect(),
            media: [("diagram.png", "/media/Assets/diagram.png")]
                .into_iter()
                .collect(),
        };
        let slugs: SlugMap = [("Smart Garage with Shelly 1", "smart-garage-shelly-1")]
            .into_iter()
            .collect();
        Publisher::from_parts(PublishConfig::default(), index, slugs)
    }

    #[test]
    fn test_render_all_three_resolvers() {
        let doc = publisher().render_markdown(
            "Intro %%private%% text\n\n![[diagram.png]]\n\nRead [[Some Note#Intro|this]].\n",
        );
        assert_eq!(
            doc.html,
            "<p>Intro  text</p>\n\
             <p><img src=\"/media/Assets/diagram.png\" alt=\"diagram.png\"></p>\n\
             <p>Read <a href=\"https://brain.ryanlynch.me/Foo/Some+Note#intro\">this</a>.</p>\n"
        );
        assert_eq!(doc.stats.comments_removed, 1);
        assert_eq!(doc.stats.embeds_resolved, 1);
        assert_eq!(doc.stats.note_links, 1);
    }

    #[test]
    fn test_commented_out_link_not_resolved() {
        let doc = publisher().render_markdown("%%[[Some Note]]%%\n\nKept\n");
        assert_eq!(doc.html, "<p>Kept</p>\n");
        assert_eq!(doc.stats.links_resolved(), 0);
        assert_eq!(doc.stats.paragraphs_pruned, 1);
    }

    #[test]
    fn test_embed_not_rewritten_as_link() {
        let doc = publisher().render_markdown("![[Some Note]]");
        assert_eq!(doc.html, "<p>![[Some Note]]</p>\n");
        assert_eq!(doc.stats.embeds_passed_through, 1);
        assert_eq!(doc.stats.links_resolved(), 0);
    }

    #[test]
    fn test_code_untouched() {
        let doc = publisher().render_markdown("`[[Some Note]]`\n\n```\n![[diagram.png]]\n```\n");
        assert_eq!(
            doc.html,
            "<p><code>[[Some Note]]</code></p>\n<pre><code>![[diagram.png]]\n</code></pre>\n"
        );
        assert_eq!(doc.stats, TransformStats::default());
    }

    #[test]
    fn test_cross_post_in_pipeline() {
        let doc = publisher().render_markdown("[[Smart Garage with Shelly 1]]");
        assert_eq!(
            doc.html,
            "<p><a href=\"/blog/smart-garage-shelly-1\">Smart Garage with Shelly 1</a></p>\n"
        );
    }

    #[test]
    fn test_frontmatter_returned() {
        let doc = publisher().render_markdown("---\ntitle: Post\n---\n\nBody\n");
        assert_eq!(doc.frontmatter.unwrap().title(), Some("Post"));
        assert_eq!(doc.html, "<p>Body</p>\n");
    }

    #[test]
    fn test_render_missing_file() {
        let err = publisher()
            .render_file(Path::new("/nonexistent/vaultpress/note.md"))
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
