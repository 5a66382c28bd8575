//! Lookup tables consumed by the resolvers.
//!
//! [`NoteIndex`] and [`MediaIndex`] are filled once while scanning a vault
//! and then only read. Both keep the first value inserted for a key, so the
//! scan order decides collisions. [`SlugMap`] is supplied by the caller.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Name-keyed table where the first insertion for a key wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct FirstWins {
    entries: BTreeMap<String, String>,
}

impl FirstWins {
    fn insert(&mut self, key: String, value: String) -> bool {
        match self.entries.entry(key) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }
}

/// Note name (file name without `.md`) → vault-relative path with spaces
/// replaced by `+`, e.g. `"AWS S3"` → `"Tech/Blob+Storage/AWS+S3"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteIndex {
    inner: FirstWins,
}

impl NoteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless `name` is already indexed. Returns whether it was inserted.
    pub fn insert_first(&mut self, name: impl Into<String>, path: impl Into<String>) -> bool {
        self.inner.insert(name.into(), path.into())
    }

    /// Indexed vault path for a note name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NoteIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (name, path) in iter {
            index.insert_first(name, path);
        }
        index
    }
}

/// Media file name (with extension) → absolute web path under the media
/// prefix, e.g. `"diagram.png"` → `"/media/Assets/diagram.png"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaIndex {
    inner: FirstWins,
}

impl MediaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless `file_name` is already indexed. Returns whether it was inserted.
    pub fn insert_first(
        &mut self,
        file_name: impl Into<String>,
        web_path: impl Into<String>,
    ) -> bool {
        self.inner.insert(file_name.into(), web_path.into())
    }

    /// Web path for a media file name
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.inner.entries.get(file_name).map(String::as_str)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.inner.entries.contains_key(file_name)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Entries in file-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MediaIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (name, path) in iter {
            index.insert_first(name, path);
        }
        index
    }
}

/// Exact note title → publish slug for cross-posted notes.
///
/// No normalization is applied to titles. Empty slugs are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlugMap {
    entries: HashMap<String, String>,
}

impl SlugMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a YAML mapping of `title: slug` pairs
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!(
                "Failed to load slug map from {}: {}",
                path.display(),
                e
            ))
        })?;

        let entries: HashMap<String, String> = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid slug map: {}", e)))?;

        log::debug!("Loaded {} slug mappings from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    pub fn insert(&mut self, title: impl Into<String>, slug: impl Into<String>) {
        self.entries.insert(title.into(), slug.into());
    }

    /// Slug for an exact title match
    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries
            .get(title)
            .map(String::as_str)
            .filter(|slug| !slug.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SlugMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for SlugMap {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}
