//! Manifest Registry: which content sources exist and how they are laid out.

use serde::{Deserialize, Serialize};

use bible_core::types::{Category, ManifestEntry};
use bible_core::SourceLoader;

/// The manifest document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Manifest {
    #[serde(alias = "bibles")]
    pub translations: Vec<ManifestEntry>,
    pub commentaries: Vec<ManifestEntry>,
}

/// Lookup key of a source name: lowercase, no `.json` suffix, no `-` or `_`.
///
/// `"Statenvertaling.json"`, `"statenvertaling"` and `"STATEN_VERTALING"`
/// share one key.
pub fn source_key(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let stem = lowered.strip_suffix(".json").unwrap_or(&lowered);
    stem.chars().filter(|c| *c != '-' && *c != '_').collect()
}

#[derive(Debug, Clone, Default)]
pub struct ManifestRegistry {
    manifest: Manifest,
}

impl ManifestRegistry {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the manifest at `path`. A missing or unreadable manifest yields
    /// an empty registry.
    pub async fn load(loader: &dyn SourceLoader, path: &str) -> Self {
        let Some(value) = loader.fetch_json(path).await else {
            tracing::warn!(path, loader = %loader.describe(), "manifest unavailable; no sources registered");
            return Self::empty();
        };
        match serde_json::from_value::<Manifest>(value) {
            Ok(manifest) => {
                tracing::info!(
                    translations = manifest.translations.len(),
                    commentaries = manifest.commentaries.len(),
                    "manifest loaded"
                );
                Self::new(manifest)
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "manifest does not parse; no sources registered");
                Self::empty()
            }
        }
    }

    pub fn entries(&self, category: Category) -> &[ManifestEntry] {
        match category {
            Category::Translation => &self.manifest.translations,
            Category::Commentary => &self.manifest.commentaries,
        }
    }

    pub fn find(&self, category: Category, name: &str) -> Option<&ManifestEntry> {
        let key = source_key(name);
        if key.is_empty() {
            return None;
        }
        self.entries(category).iter().find(|e| source_key(&e.name) == key)
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}
