//! Depth-first directory traversal shared by both indices.

use std::path::{Path, PathBuf};
use vaultpress_core::ScanOrder;
use walkdir::WalkDir;

/// A non-directory entry found under a scan root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Full path on disk
    pub path: PathBuf,
    /// Directory relative to the scan root, `/`-separated, empty at the root
    pub relative_dir: String,
    /// File name including extension
    pub file_name: String,
}

impl ScannedFile {
    /// `relative_dir` and `name` joined with `/`
    pub fn relative_path_with(&self, name: &str) -> String {
        if self.relative_dir.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.relative_dir, name)
        }
    }
}

/// Walk `root` depth-first in pre-order and collect every non-directory entry.
///
/// Directories for which `skip_dir` returns true are not descended into. The
/// root itself is never skipped. A missing root yields nothing; unreadable
/// entries are logged and skipped. Symlinks are not followed.
pub fn scan(root: &Path, order: ScanOrder, skip_dir: impl Fn(&str) -> bool) -> Vec<ScannedFile> {
    if !root.is_dir() {
        log::debug!("Scan root does not exist, indexing nothing: {}", root.display());
        return Vec::new();
    }

    let walker = WalkDir::new(root).min_depth(1);
    let walker = match order {
        ScanOrder::Sorted => walker.sort_by_file_name(),
        ScanOrder::Filesystem => walker,
    };

    let mut files = Vec::new();
    let entries = walker.into_iter().filter_entry(|entry| {
        !(entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| skip_dir(name)))
    });

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            log::debug!("Skipping non UTF-8 file name: {:?}", entry.path());
            continue;
        };

        let relative_dir = entry
            .path()
            .parent()
            .and_then(|parent| parent.strip_prefix(root).ok())
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();

        files.push(ScannedFile {
            path: entry.path().to_path_buf(),
            relative_dir,
            file_name: file_name.to_string(),
        });
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_is_empty() {
        let files = scan(Path::new("/no/such/vault/root"), ScanOrder::Sorted, |_| false);
        assert!(files.is_empty());
    }

    #[test]
    fn test_sorted_preorder() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("b/inner")).unwrap();
        fs::write(temp.path().join("a.md"), "").unwrap();
        fs::write(temp.path().join("b/inner/c.md"), "").unwrap();
        fs::write(temp.path().join("b/z.md"), "").unwrap();
        fs::write(temp.path().join("c.md"), "").unwrap();

        let files = scan(temp.path(), ScanOrder::Sorted, |_| false);
        let names: Vec<String> = files
            .iter()
            .map(|f| f.relative_path_with(&f.file_name))
            .collect();
        assert_eq!(names, vec!["a.md", "b/inner/c.md", "b/z.md", "c.md"]);
    }

    #[test]
    fn test_skip_dir_prunes_subtree() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("node_modules/pkg")).unwrap();
        fs::write(temp.path().join("node_modules/pkg/readme.md"), "").unwrap();
        fs::write(temp.path().join("keep.md"), "").unwrap();

        let files = scan(temp.path(), ScanOrder::Sorted, |name| name == "node_modules");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "keep.md");
        assert_eq!(files[0].relative_dir, "");
    }
}
