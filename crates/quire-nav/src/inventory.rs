//! Content inventory used for dangling-link checks.
//!
//! The inventory is the set of document keys that exist in the site's
//! content. A key is the document's path relative to the docs root, without
//! the `.md` extension (`index`, `guide`, `downloads/tools`).

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Set of valid internal document keys.
pub trait ContentInventory {
    /// Whether a document with this key exists.
    fn contains(&self, key: &str) -> bool;
}

impl ContentInventory for HashSet<String> {
    fn contains(&self, key: &str) -> bool {
        HashSet::contains(self, key)
    }
}

impl ContentInventory for BTreeSet<String> {
    fn contains(&self, key: &str) -> bool {
        BTreeSet::contains(self, key)
    }
}

/// Inventory discovered by walking a docs directory on disk.
///
/// Every `.md` file becomes a document key. Hidden files and directories
/// (leading `.`) are skipped, which also keeps theme directories such as
/// `.vitepress` out of the inventory.
#[derive(Debug, Default)]
pub struct FsInventory {
    source_dir: PathBuf,
    documents: BTreeSet<String>,
}

impl FsInventory {
    /// Scan `source_dir` for markdown documents.
    ///
    /// A missing directory yields an empty inventory.
    #[must_use]
    pub fn scan(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let mut documents = BTreeSet::new();
        if source_dir.is_dir() {
            scan_directory(&source_dir, "", &mut documents);
        } else {
            tracing::warn!(path = %source_dir.display(), "Docs directory not found");
        }
        tracing::debug!(
            path = %source_dir.display(),
            documents = documents.len(),
            "Scanned content inventory"
        );
        Self {
            source_dir,
            documents,
        }
    }

    /// Directory the inventory was scanned from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Document keys in sorted order.
    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(String::as_str)
    }

    /// Number of documents found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ContentInventory for FsInventory {
    fn contains(&self, key: &str) -> bool {
        self.documents.contains(key)
    }
}

fn scan_directory(dir: &Path, prefix: &str, documents: &mut BTreeSet<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::warn!(path = %dir.display(), "Failed to read directory");
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };

        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir {
            scan_directory(&entry.path(), &key, documents);
        } else if let Some(stem) = key.strip_suffix(".md") {
            documents.insert(stem.to_owned());
        }
    }
}
