//! Precomputed per-source book lists.

use std::collections::HashMap;

use serde_json::Value;

use bible_core::books;
use bible_core::types::Language;
use bible_core::SourceLoader;

use crate::manifest::source_key;

#[derive(Debug, Clone, Default)]
pub struct BookIndex {
    lists: HashMap<String, Vec<String>>,
}

impl BookIndex {
    /// Entries of `{ "<source>": ["Genesis", ...] }`; anything else is ignored.
    pub fn from_value(value: &Value) -> Self {
        let lists = value
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(source, list)| {
                        let names: Vec<String> =
                            list.as_array()?.iter().filter_map(|n| n.as_str().map(str::to_string)).collect();
                        Some((source_key(source), names))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { lists }
    }

    /// Missing index is an empty index.
    pub async fn load(loader: &dyn SourceLoader, path: &str) -> Self {
        match loader.fetch_json(path).await {
            Some(value) => {
                let index = Self::from_value(&value);
                tracing::info!(sources = index.lists.len(), "book index loaded");
                index
            }
            None => {
                tracing::debug!(path, "no book index; book lists come from sources");
                Self::default()
            }
        }
    }

    pub fn list_books(&self, source: &str) -> Option<&[String]> {
        self.lists.get(&source_key(source)).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// Book names as shown for a source: translated into `language` when one is
/// set and the name is known, otherwise as stored.
pub fn display_books<S: AsRef<str>>(names: &[S], language: Option<Language>) -> Vec<String> {
    names
        .iter()
        .map(|n| match language {
            Some(lang) => books::display_name(n.as_ref(), lang),
            None => n.as_ref().to_string(),
        })
        .collect()
}
