//! A small corpus holding the same chapters in every storage shape.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use serde_json::{json, Value};

use bible_core::config::ContentConfig;
use bible_core::{Result, SourceLoader};
use bible_loader::FilesystemLoader;
use bible_resolve::ContentStore;

pub const GEN_1_1: &str = "In den beginne schiep God den hemel en de aarde.";
pub const GEN_1_2: &str = "De aarde nu was woest en ledig.";
pub const GEN_2_1: &str = "Alzo zijn volbracht de hemel en de aarde.";
pub const JOHN_3_16: &str = "Want alzo lief heeft God de wereld gehad.";
pub const PSALM_23_1: &str = "De HEERE is mijn Herder, mij zal niets ontbreken.";

/// Translations whose Genesis 1-2 and John 3 are identical.
pub const SAME_CONTENT: [&str; 5] = ["statenvertaling", "kjv", "hsv", "nbg", "sv-chapters"];

fn write_json(root: &Path, rel: &str, value: &Value) -> anyhow::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Content files only, no manifest or books index.
pub fn write_sources(root: &Path) -> anyhow::Result<()> {
    // Dictionary of books keyed in Dutch, mixed chapter encodings.
    write_json(
        root,
        "bibles/statenvertaling.json",
        &json!({
            "metadata": {"name": "Statenvertaling", "year": 1637},
            "Genesis": {"1": {"1": GEN_1_1, "2": GEN_1_2}, "2": {"1": GEN_2_1}},
            "Johannes": {"chapters": {"3": {"16": {"text": JOHN_3_16}}}}
        }),
    )?;

    // Flat verse list, English names, string numbers in places.
    write_json(
        root,
        "bibles/kjv.json",
        &json!({
            "metadata": {"name": "KJV"},
            "verses": [
                {"book_name": "Genesis", "book": 1, "chapter": 1, "verse": 1, "text": GEN_1_1},
                {"book_name": "Genesis", "book": 1, "chapter": "1", "verse": "2", "text": GEN_1_2},
                {"book_name": "Genesis", "book": 1, "chapter": 2, "verse": 1, "text": GEN_2_1},
                {"book_name": "John", "book": 43, "chapter": 3, "verse": 16, "text": JOHN_3_16}
            ]
        }),
    )?;

    // Array of book objects, English names.
    write_json(
        root,
        "bibles/hsv.json",
        &json!({"books": [
            {"name": "Genesis", "chapters": [
                {"number": 1, "verses": [{"number": 1, "text": GEN_1_1}, {"number": 2, "text": GEN_1_2}]},
                {"cnumber": "2", "verses": [{"vnumber": 1, "text": GEN_2_1}]}
            ]},
            {"name": "John", "chapters": [{"number": 3, "verses": [{"number": 16, "text": JOHN_3_16}]}]},
            {"name": "Psalms", "chapters": [{"number": 23, "verses": [{"number": 1, "text": PSALM_23_1}]}]}
        ]}),
    )?;

    // Directory of book files.
    write_json(
        root,
        "bibles/nbg/Genesis.json",
        &json!({"chapters": {"1": {"1": GEN_1_1, "2": GEN_1_2}, "2": {"1": GEN_2_1}}}),
    )?;
    write_json(root, "bibles/nbg/Johannes.json", &json!([{"chapter": 3, "verse": 16, "text": JOHN_3_16}]))?;

    // Directory of per-book chapter directories.
    write_json(root, "bibles/sv-chapters/Genesis/Genesis1.json", &json!({"verses": {"1": GEN_1_1, "2": GEN_1_2}}))?;
    write_json(root, "bibles/sv-chapters/Genesis/Genesis2.json", &json!([{"verse": 1, "text": GEN_2_1}]))?;
    write_json(root, "bibles/sv-chapters/Genesis/chapters.json", &json!([1, 2]))?;
    write_json(root, "bibles/sv-chapters/Johannes/Johannes3.json", &json!({"16": JOHN_3_16}))?;

    // Matches two shapes at once.
    write_json(root, "bibles/broken.json", &json!({"books": [], "verses": []}))?;

    write_json(
        root,
        "commentaries/matthew-henry.json",
        &json!({
            "John": {"3": {"16": "God so loved the world: the gospel in brief.", "17": "Not to condemn, but to save."}},
            "Genesis": {"1": {"1": "The first verse of the Bible gives a surprising account."}}
        }),
    )?;

    write_json(root, "summaries/nl.json", &json!({"Genesis": "Het boek van het begin.", "Psalmen": {"summary": "Liederen."}}))?;
    write_json(root, "summaries/en.json", &json!({"Genesis": "The book of beginnings."}))?;

    fs::create_dir_all(root.join("geo"))?;
    fs::write(
        root.join("geo/ancient.jsonl"),
        "{\"placeId\":\"a-eden\",\"placeName\":\"Eden\",\"verseReferences\":[\"Gen.2.8\"],\"identifications\":[{\"modernId\":\"m-eden\",\"description\":\"unknown\",\"imageId\":\"img-river\"}]}\n",
    )?;
    fs::write(
        root.join("geo/image.jsonl"),
        "{\"id\":\"img-river\",\"url\":\"https://img.example.org/river.jpg\",\"description\":\"<b>River</b>\",\"credit\":\"A\",\"creditUrl\":\"https://a.example.org\",\"license\":\"CC0\"}\n",
    )?;
    Ok(())
}

pub fn write_manifest(root: &Path) -> anyhow::Result<()> {
    write_json(
        root,
        "manifest.json",
        &json!({
            "translations": [
                {"name": "statenvertaling", "title": "Statenvertaling", "files": ["statenvertaling.json"]},
                {"name": "kjv", "title": "King James Version", "files": ["kjv.json"]},
                {"name": "hsv", "title": "Herziene Statenvertaling", "files": ["hsv.json"]},
                {"name": "nbg", "type": "directory", "files": ["Genesis.json", "Johannes.json"]},
                {"name": "sv-chapters", "type": "directory", "files": ["Genesis", "Johannes"]},
                {"name": "broken", "files": ["broken.json"]},
                {"name": "missing", "files": ["missing.json"]}
            ],
            "commentaries": [
                {"name": "matthew-henry", "title": "Matthew Henry", "files": ["matthew-henry.json"]}
            ]
        }),
    )?;
    write_json(root, "books-index.json", &json!({"hsv": ["Genesis", "John", "Psalms"]}))?;
    Ok(())
}

pub fn corpus() -> anyhow::Result<tempfile::TempDir> {
    let tmp = tempfile::tempdir()?;
    write_sources(tmp.path())?;
    write_manifest(tmp.path())?;
    Ok(tmp)
}

pub fn store(root: &Path) -> ContentStore {
    store_with(root, ContentConfig::default())
}

pub fn store_with(root: &Path, config: ContentConfig) -> ContentStore {
    ContentStore::new(Arc::new(FilesystemLoader::new(root)), config)
}

/// Filesystem loader that records how often each path is read.
pub struct CountingLoader {
    inner: FilesystemLoader,
    fetches: Mutex<HashMap<String, usize>>,
}

impl CountingLoader {
    pub fn new(root: &Path) -> Self {
        Self { inner: FilesystemLoader::new(root), fetches: Mutex::new(HashMap::new()) }
    }

    pub fn fetches(&self, path: &str) -> usize {
        self.fetches.lock().expect("fetch counts").get(path).copied().unwrap_or(0)
    }
}

#[async_trait]
impl SourceLoader for CountingLoader {
    fn describe(&self) -> String {
        format!("counting {}", self.inner.describe())
    }

    async fn fetch_text(&self, path: &str) -> Result<Option<String>> {
        *self.fetches.lock().expect("fetch counts").entry(path.to_string()).or_default() += 1;
        self.inner.fetch_text(path).await
    }

    async fn list_dir(&self, path: &str) -> Result<Option<Vec<String>>> {
        self.inner.list_dir(path).await
    }
}

/// Store over a [`CountingLoader`], with the loader kept for assertions.
pub fn counting_store(root: &Path, config: ContentConfig) -> (Arc<CountingLoader>, ContentStore) {
    let loader = Arc::new(CountingLoader::new(root));
    let store = ContentStore::new(loader.clone(), config);
    (loader, store)
}
