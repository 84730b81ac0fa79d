//! Per-language book summaries (`summaries/<lang>.json`).

use std::collections::HashMap;

use serde_json::{Map, Value};
use tokio::sync::OnceCell;

use bible_core::books;
use bible_core::types::Language;
use bible_core::SourceLoader;

/// One language's summaries, keyed by whatever book names the file uses.
#[derive(Debug, Clone, Default)]
pub struct Summaries {
    entries: Map<String, Value>,
}

impl Summaries {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(entries) => Self { entries },
            _ => Self::default(),
        }
    }

    /// Summary of `book`, looked up by its display name in `language` first,
    /// then by each normalizer variant.
    pub fn get(&self, book: &str, language: Language) -> Option<String> {
        let mut candidates = vec![books::display_name(book, language)];
        candidates.extend(books::variants(book));
        candidates.iter().find_map(|name| {
            self.entries
                .iter()
                .find(|(key, _)| books::lookup_key(key) == books::lookup_key(name))
                .and_then(|(_, value)| summary_text(value))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn summary_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj.get("summary").and_then(Value::as_str)?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Lazily loaded summaries for every language.
pub struct SummaryStore {
    dir: String,
    loaded: HashMap<Language, OnceCell<Summaries>>,
}

impl SummaryStore {
    pub fn new(dir: impl Into<String>) -> Self {
        let loaded = [Language::En, Language::Nl].into_iter().map(|l| (l, OnceCell::new())).collect();
        Self { dir: dir.into(), loaded }
    }

    pub async fn summaries(&self, loader: &dyn SourceLoader, language: Language) -> Option<&Summaries> {
        let cell = self.loaded.get(&language)?;
        let summaries = cell
            .get_or_init(|| async {
                let path = format!("{}/{}.json", self.dir, language.code());
                let summaries = loader.fetch_json(&path).await.map(Summaries::from_value).unwrap_or_default();
                tracing::info!(language = %language, books = summaries.len(), "summaries loaded");
                summaries
            })
            .await;
        Some(summaries)
    }
}
