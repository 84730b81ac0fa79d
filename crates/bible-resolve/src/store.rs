//! `ContentStore`: the read surface the HTTP layer calls.
//!
//! One store is built at startup and shared through `Arc`. It owns every
//! piece of process-wide state: the manifest and book index (loaded on first
//! use, never refreshed), the summaries, the resolution cache and the geo
//! overlay. Each public operation comes in two forms: `try_*` returns the
//! precise [`Error`], the plain form logs it and answers `None`.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::OnceCell;

use bible_core::config::ContentConfig;
use bible_core::types::{Category, Language, ManifestEntry, ResolvedChapter, SourceKind, VerseMap, VersionInfo};
use bible_core::{Error, Result, SourceLoader};
#[cfg(feature = "geo")]
use bible_geo::GeoOverlay;
#[cfg(feature = "geo")]
use bible_core::types::GeoImage;

use crate::book_index::{display_books, BookIndex};
use crate::cache::{CacheKey, Cached, ResolutionCache};
use crate::manifest::{source_key, ManifestRegistry};
use crate::resolver;
use crate::shape::{chapter_list, verses_from_value, BookData, DirectoryRef, SourceShape};
use crate::summary::SummaryStore;

/// A book inside a directory source.
enum DirectoryBook {
    /// `<Book>.json` holding the whole book.
    File(Arc<BookData>),
    /// `<Book>/` holding `<Book><n>.json` per chapter.
    Chapters { dir: String, stem: String },
}

pub struct ContentStore {
    loader: Arc<dyn SourceLoader>,
    config: ContentConfig,
    registry: OnceCell<ManifestRegistry>,
    index: OnceCell<BookIndex>,
    summaries: SummaryStore,
    cache: ResolutionCache,
    #[cfg(feature = "geo")]
    geo: GeoOverlay,
}

impl ContentStore {
    pub fn new(loader: Arc<dyn SourceLoader>, config: ContentConfig) -> Self {
        tracing::debug!(
            loader = %loader.describe(),
            capacity = config.cache_capacity,
            max_sources = config.max_cached_sources,
            "content store created"
        );
        Self {
            summaries: SummaryStore::new(config.summaries_dir.clone()),
            cache: ResolutionCache::new(config.cache_capacity, config.max_cached_sources),
            #[cfg(feature = "geo")]
            geo: GeoOverlay::new(loader.clone(), config.geo.clone()),
            registry: OnceCell::new(),
            index: OnceCell::new(),
            loader,
            config,
        }
    }

    /// Store over the loader `config` selects; relative data dirs resolve
    /// against `base`.
    pub fn from_config(config: ContentConfig, base: &Path) -> Result<Self> {
        let loader = bible_loader::from_config(&config, base)?;
        Ok(Self::new(loader, config))
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub async fn registry(&self) -> &ManifestRegistry {
        self.registry
            .get_or_init(|| ManifestRegistry::load(self.loader.as_ref(), &self.config.manifest_file))
            .await
    }

    pub async fn book_index(&self) -> &BookIndex {
        self.index.get_or_init(|| BookIndex::load(self.loader.as_ref(), &self.config.books_index_file)).await
    }

    /// `{ id, name }` of every translation, in manifest order.
    pub async fn versions(&self) -> Vec<VersionInfo> {
        self.listing(Category::Translation).await
    }

    /// Same as [`ContentStore::versions`] for commentary sources.
    pub async fn commentaries(&self) -> Vec<VersionInfo> {
        self.listing(Category::Commentary).await
    }

    async fn listing(&self, category: Category) -> Vec<VersionInfo> {
        self.registry()
            .await
            .entries(category)
            .iter()
            .map(|e| VersionInfo { id: e.name.clone(), name: e.display_title().to_string() })
            .collect()
    }

    pub async fn try_books(&self, version: &str) -> Result<Vec<String>> {
        let entry = self.entry(Category::Translation, version).await?;
        let language = self.display_language(&entry);
        if let Some(names) = self.book_index().await.list_books(&entry.name) {
            return Ok(display_books(names, language));
        }
        let shape = self.load_shape(Category::Translation, &entry).await?;
        Ok(display_books(&resolver::list_books(&shape), language))
    }

    pub async fn books(&self, version: &str) -> Option<Vec<String>> {
        found("books", self.try_books(version).await)
    }

    pub async fn try_chapters(&self, version: &str, book: &str) -> Result<Vec<u32>> {
        let entry = self.entry(Category::Translation, version).await?;
        self.chapters_of(Category::Translation, &entry, book).await
    }

    pub async fn chapters(&self, version: &str, book: &str) -> Option<Vec<u32>> {
        found("chapters", self.try_chapters(version, book).await)
    }

    pub async fn try_chapter(&self, version: &str, book: &str, chapter: u32) -> Result<ResolvedChapter> {
        let entry = self.entry(Category::Translation, version).await?;
        let verses = self.verses_of(Category::Translation, &entry, book, chapter).await?;
        Ok(ResolvedChapter { verses: verses.as_ref().clone() })
    }

    pub async fn chapter(&self, version: &str, book: &str, chapter: u32) -> Option<ResolvedChapter> {
        found("chapter", self.try_chapter(version, book, chapter).await)
    }

    pub async fn try_commentary(&self, source: &str, book: &str, chapter: u32) -> Result<VerseMap> {
        let entry = self.entry(Category::Commentary, source).await?;
        let verses = self.verses_of(Category::Commentary, &entry, book, chapter).await?;
        Ok(verses.as_ref().clone())
    }

    pub async fn commentary(&self, source: &str, book: &str, chapter: u32) -> Option<VerseMap> {
        found("commentary", self.try_commentary(source, book, chapter).await)
    }

    pub async fn try_summary(&self, book: &str, language: &str) -> Result<String> {
        let language: Language = language.parse()?;
        let not_found = || Error::BookNotFound {
            source_name: format!("{}/{}", self.config.summaries_dir, language.code()),
            book: book.to_string(),
        };
        let summaries = self.summaries.summaries(self.loader.as_ref(), language).await.ok_or_else(not_found)?;
        summaries.get(book, language).ok_or_else(not_found)
    }

    pub async fn summary(&self, book: &str, language: &str) -> Option<String> {
        found("summary", self.try_summary(book, language).await)
    }

    /// Images of places mentioned in `book` `chapter`, unique by id.
    #[cfg(feature = "geo")]
    pub async fn images_for_chapter(&self, book: &str, chapter: u32) -> Vec<GeoImage> {
        self.geo.images_for_chapter(book, chapter).await
    }

    async fn entry(&self, category: Category, name: &str) -> Result<ManifestEntry> {
        self.registry()
            .await
            .find(category, name)
            .cloned()
            .ok_or_else(|| Error::SourceNotFound(name.to_string()))
    }

    fn display_language(&self, entry: &ManifestEntry) -> Option<Language> {
        entry.language.or_else(|| {
            let key = source_key(&entry.name);
            self.config.display_languages.iter().find(|(k, _)| source_key(k) == key).map(|(_, lang)| *lang)
        })
    }

    fn content_dir(&self, category: Category) -> &str {
        match category {
            Category::Translation => &self.config.translations_dir,
            Category::Commentary => &self.config.commentaries_dir,
        }
    }

    /// Cache namespace of a source; translations and commentaries may share names.
    fn cache_source(category: Category, entry: &ManifestEntry) -> String {
        let prefix = match category {
            Category::Translation => "bible",
            Category::Commentary => "commentary",
        };
        format!("{prefix}:{}", source_key(&entry.name))
    }

    /// Classified source. File sources are fetched, parsed and cached whole;
    /// directory sources come straight from the manifest entry. A source that
    /// fails classification is remembered as malformed and not fetched again.
    async fn load_shape(&self, category: Category, entry: &ManifestEntry) -> Result<Arc<SourceShape>> {
        let dir = self.content_dir(category);
        if entry.kind == SourceKind::Directory {
            let root = format!("{dir}/{}", entry.name);
            return Ok(Arc::new(SourceShape::Directory(DirectoryRef { root, files: entry.files.clone() })));
        }

        let path = match entry.files.first() {
            Some(file) => format!("{dir}/{file}"),
            None => format!("{dir}/{}.json", entry.name),
        };
        let key = CacheKey::source(&Self::cache_source(category, entry));
        match self.cache.get(&key) {
            Some(Cached::Source(shape)) => {
                tracing::debug!(source = %entry.name, "source cache hit");
                return Ok(shape);
            }
            Some(Cached::Malformed(reason)) => return Err(Error::malformed(path, reason.as_ref())),
            _ => {}
        }

        let value = self.loader.fetch_json(&path).await.ok_or_else(|| Error::SourceNotFound(path.clone()))?;
        let shape = match SourceShape::classify(&path, value) {
            Ok(shape) => Arc::new(shape),
            Err(Error::MalformedSource { path, reason }) => {
                self.cache.put(key, Cached::Malformed(Arc::from(reason.as_str())));
                return Err(Error::MalformedSource { path, reason });
            }
            Err(e) => return Err(e),
        };
        tracing::info!(source = %entry.name, shape = shape.label(), "source loaded");
        self.cache.put(key, Cached::Source(shape.clone()));
        Ok(shape)
    }

    async fn directory_book(&self, category: Category, entry: &ManifestEntry, book: &str) -> Result<DirectoryBook> {
        let file = resolver::match_directory_entry(&entry.files, book).ok_or_else(|| Error::BookNotFound {
            source_name: entry.name.clone(),
            book: book.to_string(),
        })?;
        let root = format!("{}/{}", self.content_dir(category), entry.name);

        if resolver::entry_stem(file).len() == file.len() {
            return Ok(DirectoryBook::Chapters { dir: format!("{root}/{file}"), stem: file.to_string() });
        }

        let key = CacheKey::book(&Self::cache_source(category, entry), book);
        if let Some(Cached::Book(data)) = self.cache.get(&key) {
            return Ok(DirectoryBook::File(data));
        }
        let path = format!("{root}/{file}");
        let value = self.loader.fetch_json(&path).await.ok_or_else(|| Error::BookNotFound {
            source_name: entry.name.clone(),
            book: book.to_string(),
        })?;
        let data = Arc::new(BookData::classify(&path, value)?);
        self.cache.put(key, Cached::Book(data.clone()));
        Ok(DirectoryBook::File(data))
    }

    async fn verses_of(&self, category: Category, entry: &ManifestEntry, book: &str, chapter: u32) -> Result<Arc<VerseMap>> {
        let key = CacheKey::chapter(&Self::cache_source(category, entry), book, chapter);
        if let Some(Cached::Chapter(verses)) = self.cache.get(&key) {
            tracing::debug!(source = %entry.name, book, chapter, "chapter cache hit");
            return Ok(verses);
        }
        let book_missing = || Error::BookNotFound { source_name: entry.name.clone(), book: book.to_string() };

        let verses = match entry.kind {
            SourceKind::File => {
                let shape = self.load_shape(category, entry).await?;
                let view = resolver::find_book(&shape, book).ok_or_else(book_missing)?;
                view.chapter(chapter)
            }
            SourceKind::Directory => match self.directory_book(category, entry, book).await? {
                DirectoryBook::File(data) => {
                    let view = data.view();
                    view.chapter(chapter)
                }
                DirectoryBook::Chapters { dir, stem } => self
                    .loader
                    .fetch_json(&format!("{dir}/{stem}{chapter}.json"))
                    .await
                    .map(|value| verses_from_value(&value))
                    .filter(|verses| !verses.is_empty()),
            },
        };

        let verses = verses.ok_or_else(|| Error::ChapterNotFound {
            source_name: entry.name.clone(),
            book: book.to_string(),
            chapter,
        })?;
        let verses = Arc::new(verses);
        self.cache.put(key, Cached::Chapter(verses.clone()));
        Ok(verses)
    }

    async fn chapters_of(&self, category: Category, entry: &ManifestEntry, book: &str) -> Result<Vec<u32>> {
        let book_missing = || Error::BookNotFound { source_name: entry.name.clone(), book: book.to_string() };
        match entry.kind {
            SourceKind::File => {
                let shape = self.load_shape(category, entry).await?;
                let view = resolver::find_book(&shape, book).ok_or_else(book_missing)?;
                Ok(view.chapter_numbers())
            }
            SourceKind::Directory => match self.directory_book(category, entry, book).await? {
                DirectoryBook::File(data) => {
                    let view = data.view();
                    Ok(view.chapter_numbers())
                }
                DirectoryBook::Chapters { dir, stem } => {
                    let key = CacheKey::book(&Self::cache_source(category, entry), book);
                    if let Some(Cached::Chapters(list)) = self.cache.get(&key) {
                        return Ok(list.as_ref().clone());
                    }
                    let list = self.chapter_listing(&dir, &stem).await?;
                    if !list.is_empty() {
                        self.cache.put(key, Cached::Chapters(Arc::new(list.clone())));
                    }
                    Ok(list)
                }
            },
        }
    }

    /// Chapter numbers of a chapter directory: `chapters.json` when present,
    /// else the `<stem><n>.json` files the loader can list.
    async fn chapter_listing(&self, dir: &str, stem: &str) -> Result<Vec<u32>> {
        if let Some(value) = self.loader.fetch_json(&format!("{dir}/chapters.json")).await {
            return Ok(chapter_list(&value));
        }
        let Some(names) = self.loader.list_dir(dir).await? else {
            tracing::debug!(dir, "no chapters.json and no directory listing");
            return Ok(Vec::new());
        };
        let mut numbers: Vec<u32> = names.iter().filter_map(|name| chapter_file_number(name, stem)).collect();
        numbers.sort_unstable();
        numbers.dedup();
        Ok(numbers)
    }
}

/// `Genesis12.json` with stem `Genesis` → 12.
fn chapter_file_number(file: &str, stem: &str) -> Option<u32> {
    let base = resolver::entry_stem(file);
    if base.len() == file.len() {
        return None;
    }
    let digits = base.get(stem.len()..)?;
    if !base[..stem.len()].eq_ignore_ascii_case(stem) || digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

fn found<T>(operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_not_found() => {
            tracing::debug!(operation, error = %e, "not found");
            None
        }
        Err(e) => {
            tracing::warn!(operation, error = %e, "resolution failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_file_numbers() {
        assert_eq!(chapter_file_number("Genesis12.json", "Genesis"), Some(12));
        assert_eq!(chapter_file_number("genesis3.json", "Genesis"), Some(3));
        assert_eq!(chapter_file_number("chapters.json", "Genesis"), None);
        assert_eq!(chapter_file_number("Genesis.json", "Genesis"), None);
        assert_eq!(chapter_file_number("Genesis1.txt", "Genesis"), None);
        assert_eq!(chapter_file_number("Gen1.json", "Genesis"), None);
        assert_eq!(chapter_file_number("Genesis4.JSON", "Genesis"), Some(4));
    }
}
