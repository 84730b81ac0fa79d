//! Resolution Cache.
//!
//! A mutex-guarded map of `Arc` payloads keyed by (source, book, chapter).
//! Readers always see a complete value; two tasks racing to fill the same key
//! just both compute it. Parsed whole sources are bounded separately from
//! book and chapter entries, so filling the chapter budget never pushes out
//! the source those chapters are read from. Within each budget the least
//! recently used entry goes first, books before chapters.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use bible_core::books;
use bible_core::types::VerseMap;

use crate::shape::{BookData, SourceShape};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source: String,
    /// `None` = whole source.
    pub book: Option<String>,
    /// `None` = every chapter of the book.
    pub chapter: Option<u32>,
}

impl CacheKey {
    pub fn source(source: &str) -> Self {
        Self { source: source.to_string(), book: None, chapter: None }
    }

    pub fn book(source: &str, book: &str) -> Self {
        Self { source: source.to_string(), book: Some(book_key(book)), chapter: None }
    }

    pub fn chapter(source: &str, book: &str, chapter: u32) -> Self {
        Self { source: source.to_string(), book: Some(book_key(book)), chapter: Some(chapter) }
    }

    pub fn is_source(&self) -> bool {
        self.book.is_none()
    }

    /// Eviction order among non-source entries: lower tiers go first.
    fn tier(&self) -> u8 {
        match (&self.book, self.chapter) {
            (None, _) => 0,
            (Some(_), None) => 1,
            (Some(_), Some(_)) => 2,
        }
    }
}

/// Dutch and English spellings of one book share a key.
fn book_key(book: &str) -> String {
    books::lookup_key(&books::canonical(book))
}

#[derive(Debug, Clone)]
pub enum Cached {
    Source(Arc<SourceShape>),
    Book(Arc<BookData>),
    Chapters(Arc<Vec<u32>>),
    Chapter(Arc<VerseMap>),
    /// A source that failed classification, with the reason.
    Malformed(Arc<str>),
}

struct Slot {
    value: Cached,
    last_access: u64,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<CacheKey, Slot>,
    tick: u64,
}

pub struct ResolutionCache {
    capacity: usize,
    max_sources: usize,
    inner: Mutex<Inner>,
}

impl ResolutionCache {
    /// At most `capacity` book and chapter entries and `max_sources` source
    /// entries; `0` leaves that budget unbounded.
    pub fn new(capacity: usize, max_sources: usize) -> Self {
        Self { capacity, max_sources, inner: Mutex::new(Inner::default()) }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Cached> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.tick += 1;
        let tick = inner.tick;
        let slot = inner.entries.get_mut(key)?;
        slot.last_access = tick;
        Some(slot.value.clone())
    }

    pub fn put(&self, key: CacheKey, value: Cached) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.tick += 1;
        let tick = inner.tick;
        inner.entries.insert(key.clone(), Slot { value, last_access: tick });

        let sources = key.is_source();
        let limit = if sources { self.max_sources } else { self.capacity };
        if limit == 0 {
            return;
        }
        loop {
            let held = inner.entries.keys().filter(|k| k.is_source() == sources).count();
            if held <= limit {
                break;
            }
            let victim = inner
                .entries
                .iter()
                .filter(|(k, _)| k.is_source() == sources && **k != key)
                .min_by_key(|(k, slot)| (k.tier(), slot.last_access))
                .map(|(k, _)| k.clone());
            match victim {
                Some(victim) => {
                    tracing::debug!(source = %victim.source, book = ?victim.book, chapter = ?victim.chapter, "evicting cache entry");
                    inner.entries.remove(&victim);
                }
                None => break,
            }
        }
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys currently held, for diagnostics and tests.
    pub fn keys(&self) -> Vec<CacheKey> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).entries.keys().cloned().collect()
    }
}
