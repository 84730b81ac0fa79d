//! Builds the manifest and books index from a corpus directory.
//!
//! Every `.json` file directly under the translations or commentaries
//! directory becomes a `File` entry and every subdirectory a `Directory`
//! entry listing its book files and chapter directories. Book lists for the
//! index come from classifying each single-file source once, here, so the
//! engine never has to.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use bible_core::config::ContentConfig;
use bible_core::types::{ManifestEntry, SourceKind};

use crate::manifest::Manifest;
use crate::resolver;
use crate::shape::SourceShape;

/// Output of a catalog build.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub manifest: Manifest,
    pub books_index: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Write `manifest.json` and the books index under `data_root`.
    pub fn write(&self, data_root: &Path, config: &ContentConfig) -> Result<()> {
        let manifest_path = data_root.join(&config.manifest_file);
        let manifest = serde_json::to_string_pretty(&self.manifest)?;
        fs::write(&manifest_path, manifest).with_context(|| format!("writing {}", manifest_path.display()))?;

        let index_path = data_root.join(&config.books_index_file);
        let index = serde_json::to_string_pretty(&self.books_index)?;
        fs::write(&index_path, index).with_context(|| format!("writing {}", index_path.display()))?;
        Ok(())
    }
}

pub struct CatalogBuilder {
    translations_dir: String,
    commentaries_dir: String,
}

impl CatalogBuilder {
    pub fn from_config(config: &ContentConfig) -> Self {
        Self {
            translations_dir: config.translations_dir.clone(),
            commentaries_dir: config.commentaries_dir.clone(),
        }
    }

    pub fn build(&self, data_root: &Path) -> Result<Catalog> {
        if !data_root.is_dir() {
            anyhow::bail!("data directory {} does not exist", data_root.display());
        }
        let mut catalog = Catalog::default();
        catalog.manifest.translations = self.scan(&data_root.join(&self.translations_dir), &mut catalog.books_index)?;
        catalog.manifest.commentaries = self.scan(&data_root.join(&self.commentaries_dir), &mut catalog.books_index)?;
        tracing::info!(
            translations = catalog.manifest.translations.len(),
            commentaries = catalog.manifest.commentaries.len(),
            indexed = catalog.books_index.len(),
            "catalog built"
        );
        Ok(catalog)
    }

    fn scan(&self, dir: &Path, index: &mut BTreeMap<String, Vec<String>>) -> Result<Vec<ManifestEntry>> {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "no such content directory");
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in children(dir) {
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().to_string();

            if entry.file_type().is_dir() {
                let files: Vec<String> = children(path)
                    .filter(|c| c.file_type().is_dir() || is_json(c.path()))
                    .map(|c| c.file_name().to_string_lossy().to_string())
                    .collect();
                let books: Vec<String> = files.iter().map(|f| resolver::entry_stem(f).to_string()).collect();
                if !books.is_empty() {
                    index.insert(file_name.clone(), books);
                }
                entries.push(ManifestEntry {
                    name: file_name,
                    title: None,
                    kind: SourceKind::Directory,
                    files,
                    language: None,
                });
            } else if is_json(path) {
                let name = resolver::entry_stem(&file_name).to_string();
                match book_list(path) {
                    Ok(books) => {
                        index.insert(name.clone(), books);
                    }
                    Err(e) => tracing::warn!(path = %path.display(), error = %e, "not indexed"),
                }
                entries.push(ManifestEntry {
                    name,
                    title: None,
                    kind: SourceKind::File,
                    files: vec![file_name],
                    language: None,
                });
            }
        }
        Ok(entries)
    }
}

fn children(dir: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
}

fn is_json(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
}

fn book_list(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    let shape = SourceShape::classify(&path.to_string_lossy(), value)?;
    Ok(resolver::list_books(&shape))
}
