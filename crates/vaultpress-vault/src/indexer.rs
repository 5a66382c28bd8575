//! Note and media index construction.

use crate::scanner::{ScannedFile, scan};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::instrument;
use vaultpress_core::prelude::*;

/// Both lookup tables for one vault, built once and read-only afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultIndex {
    pub notes: NoteIndex,
    pub media: MediaIndex,
}

impl VaultIndex {
    /// Scan the configured vault and media roots
    pub fn build(config: &PublishConfig) -> Result<Self> {
        VaultIndexer::new(config).build()
    }
}

/// Builds [`NoteIndex`] and [`MediaIndex`] from a directory tree
pub struct VaultIndexer<'a> {
    config: &'a PublishConfig,
}

impl<'a> VaultIndexer<'a> {
    pub fn new(config: &'a PublishConfig) -> Self {
        Self { config }
    }

    /// Build both indices for the configured vault.
    ///
    /// Only path resolution can fail; missing directories produce empty indices.
    #[instrument(skip(self), name = "vault_index_build")]
    pub fn build(&self) -> Result<VaultIndex> {
        let vault_root = self.config.resolved_vault_path()?;
        let media_root = self.config.media_root()?;

        let notes = self.build_note_index(&vault_root);
        let media = self.build_media_index(&media_root);

        log::info!(
            "Indexed vault {}: {} notes, {} media files",
            vault_root.display(),
            notes.len(),
            media.len()
        );

        Ok(VaultIndex { notes, media })
    }

    /// Index every `.md` file under `vault_root` by its bare name.
    ///
    /// Hidden and excluded directories are skipped, as are files ending in
    /// the excluded note suffix. Paths have spaces replaced by `+`.
    pub fn build_note_index(&self, vault_root: &Path) -> NoteIndex {
        let mut index = NoteIndex::new();

        let files = scan(vault_root, self.config.scan_order, |name| {
            self.config.is_excluded_dir(name)
        });

        for file in files {
            let Some(note_name) = self.note_name(&file) else {
                continue;
            };

            let vault_path = file.relative_path_with(note_name).replace(' ', "+");
            if !index.insert_first(note_name, &vault_path) {
                log::debug!(
                    "Duplicate note name '{}' at {} ignored, keeping {}",
                    note_name,
                    vault_path,
                    index.get(note_name).unwrap_or_default()
                );
            }
        }

        log::debug!("Note index built: {} entries", index.len());
        index
    }

    /// Index every image under `media_root` by file name.
    ///
    /// The web path is the media prefix joined with the file's path relative
    /// to `media_root`.
    pub fn build_media_index(&self, media_root: &Path) -> MediaIndex {
        let mut index = MediaIndex::new();
        let prefix = self.config.media_prefix.trim_end_matches('/');

        for file in scan(media_root, self.config.scan_order, |_| false) {
            if !self.is_image(&file.file_name) {
                continue;
            }

            let web_path = format!("{}/{}", prefix, file.relative_path_with(&file.file_name));
            if !index.insert_first(file.file_name.as_str(), &web_path) {
                log::debug!(
                    "Duplicate media file '{}' at {} ignored, keeping {}",
                    file.file_name,
                    web_path,
                    index.get(&file.file_name).unwrap_or_default()
                );
            }
        }

        log::debug!("Media index built: {} entries", index.len());
        index
    }

    fn note_name<'f>(&self, file: &'f ScannedFile) -> Option<&'f str> {
        if file.file_name.ends_with(&self.config.excluded_note_suffix) {
            return None;
        }
        file.file_name.strip_suffix(".md")
    }

    fn is_image(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.is_image_extension(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> PublishConfig {
        PublishConfig::builder(root).build().unwrap()
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_note_index_paths_use_plus() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Foo/Some Note.md");
        touch(temp.path(), "Top.md");

        let config = config_for(temp.path());
        let index = VaultIndexer::new(&config).build_note_index(temp.path());

        assert_eq!(index.get("Some Note"), Some("Foo/Some+Note"));
        assert_eq!(index.get("Top"), Some("Top"));
    }

    #[test]
    fn test_note_index_exclusions() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".obsidian/workspace.md");
        touch(temp.path(), "node_modules/pkg/README.md");
        touch(temp.path(), "Drawings/Flow.excalidraw.md");
        touch(temp.path(), "Drawings/Flow.md");
        touch(temp.path(), "Notes/readme.txt");

        let config = config_for(temp.path());
        let index = VaultIndexer::new(&config).build_note_index(temp.path());

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("Flow"), Some("Drawings/Flow"));
        assert!(!index.contains("workspace"));
        assert!(!index.contains("README"));
    }

    #[test]
    fn test_note_index_collision_sorted_first_wins() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "B Folder/Dup.md");
        touch(temp.path(), "A Folder/Dup.md");

        let config = config_for(temp.path());
        let index = VaultIndexer::new(&config).build_note_index(temp.path());

        assert_eq!(index.get("Dup"), Some("A+Folder/Dup"));
    }

    #[test]
    fn test_media_index_web_paths() {
        let temp = TempDir::new().unwrap();
        let media = temp.path().join("_Organization/_Media");
        touch(&media, "Assets/diagram.png");
        touch(&media, "top.JPG");
        touch(&media, "notes.pdf");

        let config = config_for(temp.path());
        let index = VaultIndexer::new(&config).build_media_index(&media);

        assert_eq!(index.get("diagram.png"), Some("/media/Assets/diagram.png"));
        assert_eq!(index.get("top.JPG"), Some("/media/top.JPG"));
        assert!(!index.contains("notes.pdf"));
    }

    #[test]
    fn test_media_index_collision_sorted_first_wins() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "2024/shot.png");
        touch(temp.path(), "2023/shot.png");

        let config = config_for(temp.path());
        let index = VaultIndexer::new(&config).build_media_index(temp.path());

        assert_eq!(index.get("shot.png"), Some("/media/2023/shot.png"));
    }

    #[test]
    fn test_build_uses_configured_media_dir() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Attachments/pic.png");
        touch(temp.path(), "_Organization/_Media/ignored.png");

        let config = PublishConfig::builder(temp.path())
            .media_dir("Attachments")
            .build()
            .unwrap();
        let index = VaultIndex::build(&config).unwrap();

        assert_eq!(index.media.get("pic.png"), Some("/media/pic.png"));
        assert!(!index.media.contains("ignored.png"));
    }

    #[test]
    fn test_missing_media_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let config = config_for(temp.path());
        let index = VaultIndex::build(&config).unwrap();
        assert!(index.media.is_empty());
        assert!(index.notes.is_empty());
    }
}
