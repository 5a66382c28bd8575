//! Publishing configuration.
//!
//! Follows a builder pattern for programmatic construction, and can be loaded
//! from a YAML file. The vault root honours the `VAULT_PATH` environment
//! variable.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the vault root
pub const VAULT_PATH_ENV: &str = "VAULT_PATH";

/// Vault root used when nothing else is configured
pub const DEFAULT_VAULT_PATH: &str = "../MyHub";

/// Media directory, relative to the vault root
pub const DEFAULT_MEDIA_DIR: &str = "_Organization/_Media";

/// Web prefix under which media files are served
pub const DEFAULT_MEDIA_PREFIX: &str = "/media";

/// External site publishing the whole vault
pub const DEFAULT_PUBLISH_BASE: &str = "https://brain.ryanlynch.me";

/// Namespace for cross-posted notes
pub const DEFAULT_BLOG_PREFIX: &str = "/blog/";

/// Diagram exports that are never indexed as notes
pub const DEFAULT_EXCLUDED_NOTE_SUFFIX: &str = ".excalidraw.md";

/// Order in which directory entries are visited while indexing.
///
/// Index collisions are resolved first-discovered-wins, so the order decides
/// which of two same-named files is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOrder {
    /// Entries sorted by file name within each directory (reproducible)
    #[default]
    Sorted,
    /// Raw enumeration order as returned by the filesystem
    Filesystem,
}

/// Configuration for resolving a vault into publishable HTML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Root directory of the vault
    pub vault_path: PathBuf,
    /// Media directory relative to `vault_path`
    pub media_dir: PathBuf,
    /// Web prefix for media paths (no trailing slash)
    pub media_prefix: String,
    /// Base URL for notes that are not cross-posted
    pub publish_base: String,
    /// Prefix for cross-posted notes, joined directly with the slug
    pub blog_prefix: String,
    /// Directory names skipped while indexing notes (hidden dirs are always skipped)
    pub excluded_dirs: Vec<String>,
    /// File-name suffix of markdown files that are not notes
    pub excluded_note_suffix: String,
    /// Extensions (without dot) treated as images, compared case-insensitively
    pub image_extensions: Vec<String>,
    /// Directory traversal order for index construction
    pub scan_order: ScanOrder,
    /// Optional YAML file with `title: slug` cross-post mappings
    pub slug_map_path: Option<PathBuf>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            vault_path: PathBuf::from(DEFAULT_VAULT_PATH),
            media_dir: PathBuf::from(DEFAULT_MEDIA_DIR),
            media_prefix: DEFAULT_MEDIA_PREFIX.to_string(),
            publish_base: DEFAULT_PUBLISH_BASE.to_string(),
            blog_prefix: DEFAULT_BLOG_PREFIX.to_string(),
            excluded_dirs: vec!["node_modules".to_string()],
            excluded_note_suffix: DEFAULT_EXCLUDED_NOTE_SUFFIX.to_string(),
            image_extensions: ["png", "jpg", "jpeg", "gif", "svg", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            scan_order: ScanOrder::default(),
            slug_map_path: None,
        }
    }
}

impl PublishConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new config with builder
    pub fn builder(vault_path: impl Into<PathBuf>) -> PublishConfigBuilder {
        PublishConfigBuilder::new(vault_path)
    }

    /// Defaults, with the vault root taken from `VAULT_PATH` when set
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of this configuration
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var(VAULT_PATH_ENV)
            && !path.trim().is_empty()
        {
            log::debug!("Using vault path from {}: {}", VAULT_PATH_ENV, path);
            self.vault_path = PathBuf::from(path);
        }
        self
    }

    /// Load configuration from a YAML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!(
                "Failed to load config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.publish_base.trim().is_empty() {
            return Err(Error::config_error("publish_base cannot be empty"));
        }

        if self.media_prefix.trim().is_empty() {
            return Err(Error::config_error("media_prefix cannot be empty"));
        }

        if self.media_dir.is_absolute() {
            return Err(Error::config_error(format!(
                "media_dir must be relative to the vault: {}",
                self.media_dir.display()
            )));
        }

        if self.image_extensions.is_empty() {
            return Err(Error::config_error("image_extensions cannot be empty"));
        }

        Ok(())
    }

    /// Vault root with `~` and environment variables expanded, made absolute
    /// against the current directory. The directory does not need to exist.
    pub fn resolved_vault_path(&self) -> Result<PathBuf> {
        let path_str = self
            .vault_path
            .to_str()
            .ok_or_else(|| Error::invalid_path("Vault path contains invalid UTF-8"))?;

        let expanded = shellexpand::full(path_str)
            .map_err(|e| Error::invalid_path(format!("Failed to expand path: {}", e)))?;
        let expanded_path = PathBuf::from(expanded.as_ref());

        if expanded_path.is_absolute() {
            Ok(expanded_path)
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&expanded_path))
                .map_err(|e| Error::invalid_path(format!("Failed to get current directory: {}", e)))
        }
    }

    /// Absolute media root: the vault root joined with `media_dir`
    pub fn media_root(&self) -> Result<PathBuf> {
        Ok(self.resolved_vault_path()?.join(&self.media_dir))
    }

    /// Whether `ext` (without dot) is a configured image extension
    pub fn is_image_extension(&self, ext: &str) -> bool {
        self.image_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }

    /// Whether a directory with this name is skipped by the note index
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_dirs.iter().any(|d| d == name)
    }
}

/// Builder for PublishConfig
pub struct PublishConfigBuilder {
    config: PublishConfig,
}

impl PublishConfigBuilder {
    /// Create a new builder rooted at `vault_path`
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            config: PublishConfig {
                vault_path: vault_path.into(),
                ..PublishConfig::default()
            },
        }
    }

    /// Set the media directory (relative to the vault)
    pub fn media_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.media_dir = dir.into();
        self
    }

    /// Set the media web prefix
    pub fn media_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.media_prefix = prefix.into();
        self
    }

    /// Set the external publish base URL
    pub fn publish_base(mut self, base: impl Into<String>) -> Self {
        self.config.publish_base = base.into();
        self
    }

    /// Set the cross-post prefix
    pub fn blog_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.blog_prefix = prefix.into();
        self
    }

    /// Add an excluded directory name
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_dirs.push(name.into());
        self
    }

    /// Set the directory traversal order
    pub fn scan_order(mut self, order: ScanOrder) -> Self {
        self.config.scan_order = order;
        self
    }

    /// Set the slug map file
    pub fn slug_map_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.slug_map_path = Some(path.into());
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<PublishConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
