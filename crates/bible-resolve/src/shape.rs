//! Structural classification of source payloads.
//!
//! A parsed file is classified exactly once, right after loading, into a
//! [`SourceShape`]. Everything downstream matches on the variant instead of
//! probing fields. A payload that satisfies none, or more than one, of the
//! shape predicates is rejected as malformed.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use bible_core::types::VerseMap;
use bible_core::{Error, Result};

/// Top-level keys that never name a book in a dictionary-shaped source.
pub const RESERVED_KEYS: [&str; 5] = ["metadata", "version", "id", "verses", "meta"];

/// Integer from a JSON number or a numeric string.
pub fn number_of(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn flexible_number<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_of))
}

fn first_number(obj: &Map<String, Value>, keys: &[&str]) -> Option<u32> {
    keys.iter().find_map(|k| obj.get(*k).and_then(number_of))
}

/// One element of a `books` array.
#[derive(Debug, Clone, Deserialize)]
pub struct BookObject {
    #[serde(default, alias = "bname")]
    pub name: Option<String>,
    #[serde(default, alias = "bnumber", deserialize_with = "flexible_number")]
    pub number: Option<u32>,
    /// Chapter objects, `{ number|cnumber, verses }`, kept raw.
    #[serde(default)]
    pub chapters: Vec<Value>,
}

/// One record of a flat verse list.
#[derive(Debug, Clone, Deserialize)]
pub struct FlatVerse {
    #[serde(default)]
    pub book_name: Option<String>,
    /// Book number, or occasionally the book name itself.
    #[serde(default)]
    pub book: Option<Value>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub chapter: Option<u32>,
    #[serde(default, deserialize_with = "flexible_number")]
    pub verse: Option<u32>,
    #[serde(default)]
    pub text: String,
}

impl FlatVerse {
    pub fn name(&self) -> Option<&str> {
        self.book_name
            .as_deref()
            .or_else(|| self.book.as_ref().and_then(Value::as_str).filter(|s| s.trim().parse::<u32>().is_err()))
    }

    pub fn number(&self) -> Option<u32> {
        self.book.as_ref().and_then(number_of)
    }
}

/// A `Directory` manifest entry: where it lives and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRef {
    pub root: String,
    pub files: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum SourceShape {
    /// `{ "books": [ { name, chapters: [...] } ] }`
    ArrayOfBooks(Vec<BookObject>),
    /// `[ { book_name, chapter, verse, text } ]` or `{ "verses": [...] }`
    FlatVerses(Vec<FlatVerse>),
    /// Book name → chapters → verses, from `books` or the top level.
    NestedDict(Map<String, Value>),
    /// Per-book files under a directory; nothing is parsed up front.
    Directory(DirectoryRef),
}

impl SourceShape {
    pub fn classify(path: &str, value: Value) -> Result<Self> {
        let array_of_books = value.get("books").is_some_and(Value::is_array);
        let flat = value.is_array() || value.get("verses").is_some_and(Value::is_array);
        let nested = match &value {
            Value::Object(obj) => match obj.get("books") {
                Some(books) => books.is_object(),
                None => obj.iter().any(|(k, v)| v.is_object() && !is_reserved(k)),
            },
            _ => false,
        };

        match (array_of_books, flat, nested) {
            (true, false, false) => {
                let books = take_array(value, "books");
                Ok(SourceShape::ArrayOfBooks(parse_elements(path, books)))
            }
            (false, true, false) => {
                let records = match value {
                    Value::Array(items) => items,
                    other => take_array(other, "verses"),
                };
                Ok(SourceShape::FlatVerses(parse_elements(path, records)))
            }
            (false, false, true) => {
                let Value::Object(mut obj) = value else {
                    return Err(Error::malformed(path, "dictionary shape without an object"));
                };
                let books = match obj.remove("books") {
                    Some(Value::Object(books)) => books,
                    _ => obj.into_iter().filter(|(k, v)| v.is_object() && !is_reserved(k)).collect(),
                };
                Ok(SourceShape::NestedDict(books))
            }
            (false, false, false) => Err(Error::malformed(path, "no recognizable shape")),
            _ => Err(Error::malformed(path, "payload matches more than one shape")),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceShape::ArrayOfBooks(_) => "array-of-books",
            SourceShape::FlatVerses(_) => "flat-verses",
            SourceShape::NestedDict(_) => "nested-dict",
            SourceShape::Directory(_) => "directory",
        }
    }
}

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.iter().any(|r| r.eq_ignore_ascii_case(key))
}

fn take_array(value: Value, key: &str) -> Vec<Value> {
    match value {
        Value::Object(mut obj) => match obj.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn parse_elements<T: serde::de::DeserializeOwned>(path: &str, items: Vec<Value>) -> Vec<T> {
    let total = items.len();
    let parsed: Vec<T> = items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect();
    if parsed.len() < total {
        tracing::warn!(path, skipped = total - parsed.len(), "skipped unparseable elements");
    }
    parsed
}

/// Contents of one book-level file inside a directory source.
#[derive(Debug, Clone)]
pub enum BookData {
    Chapters(Vec<Value>),
    ChapterMap(Map<String, Value>),
    Records(Vec<FlatVerse>),
}

impl BookData {
    pub fn classify(path: &str, value: Value) -> Result<Self> {
        match value {
            Value::Object(mut obj) => match obj.remove("chapters") {
                Some(Value::Array(chapters)) => Ok(BookData::Chapters(chapters)),
                Some(Value::Object(map)) => Ok(BookData::ChapterMap(map)),
                Some(_) => Err(Error::malformed(path, "'chapters' is neither a list nor a map")),
                None => match obj.remove("verses") {
                    Some(Value::Array(records)) => Ok(BookData::Records(parse_elements(path, records))),
                    _ => Ok(BookData::ChapterMap(obj)),
                },
            },
            Value::Array(items) => {
                let looks_flat = items
                    .first()
                    .and_then(Value::as_object)
                    .is_some_and(|o| o.contains_key("chapter") && o.contains_key("verse"));
                if looks_flat {
                    Ok(BookData::Records(parse_elements(path, items)))
                } else {
                    Ok(BookData::Chapters(items))
                }
            }
            _ => Err(Error::malformed(path, "book file is neither a list nor a map")),
        }
    }

    pub fn view(&self) -> BookView<'_> {
        match self {
            BookData::Chapters(c) => BookView::Chapters(c),
            BookData::ChapterMap(m) => BookView::ChapterMap(m),
            BookData::Records(r) => BookView::Records(r.iter().collect()),
        }
    }
}

/// One matched book, borrowed from whatever shape holds it.
#[derive(Debug, Clone)]
pub enum BookView<'a> {
    /// Chapter objects with a `number`/`cnumber` and `verses`.
    Chapters(&'a [Value]),
    /// Chapter number (as key) → verses.
    ChapterMap(&'a Map<String, Value>),
    /// Flat records already filtered to this book.
    Records(Vec<&'a FlatVerse>),
}

impl<'a> BookView<'a> {
    /// View of a dictionary book value: `{ chapters: ... }`, a chapter map, or
    /// a list of chapter objects.
    pub fn of_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(obj) => match obj.get("chapters") {
                Some(Value::Object(map)) => Some(BookView::ChapterMap(map)),
                Some(Value::Array(list)) => Some(BookView::Chapters(list)),
                _ => Some(BookView::ChapterMap(obj)),
            },
            Value::Array(list) => Some(BookView::Chapters(list)),
            _ => None,
        }
    }

    /// Verses of chapter `n`; `None` when absent or empty.
    pub fn chapter(&self, n: u32) -> Option<VerseMap> {
        let verses = match self {
            // Duplicate numbers resolve to the first non-empty entry, matching
            // what `chapter_numbers` reports.
            BookView::Chapters(list) => list
                .iter()
                .filter_map(Value::as_object)
                .filter(|c| chapter_number(c) == Some(n))
                .filter_map(|c| c.get("verses").map(verses_from_value))
                .find(|verses| !verses.is_empty())?,
            BookView::ChapterMap(map) => map
                .iter()
                .filter(|(k, _)| k.trim().parse::<u32>().ok() == Some(n))
                .map(|(_, v)| verses_from_value(v))
                .find(|verses| !verses.is_empty())?,
            BookView::Records(records) => records
                .iter()
                .filter(|r| r.chapter == Some(n))
                .filter_map(|r| r.verse.map(|v| (v, r.text.clone())))
                .collect(),
        };
        (!verses.is_empty()).then_some(verses)
    }

    /// Ascending, unique numbers of the non-empty chapters.
    pub fn chapter_numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = match self {
            BookView::Chapters(list) => list
                .iter()
                .filter_map(Value::as_object)
                .filter(|c| c.get("verses").is_some_and(|v| !verses_from_value(v).is_empty()))
                .filter_map(chapter_number)
                .collect(),
            BookView::ChapterMap(map) => map
                .iter()
                .filter(|(_, v)| !verses_from_value(v).is_empty())
                .filter_map(|(k, _)| k.trim().parse().ok())
                .collect(),
            BookView::Records(records) => {
                records.iter().filter(|r| r.verse.is_some()).filter_map(|r| r.chapter).collect()
            }
        };
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }
}

fn chapter_number(chapter: &Map<String, Value>) -> Option<u32> {
    first_number(chapter, &["number", "cnumber", "chapter"])
}

fn verse_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("text").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Uniform verse map from any of the verse encodings seen in the corpus:
/// `{ "1": "text" }`, `{ "1": { "text": ... } }`, `{ "verses": ... }`,
/// `[ { number|vnumber|verse, text } ]` or a bare list of strings.
pub fn verses_from_value(value: &Value) -> VerseMap {
    match value {
        Value::Object(obj) => {
            if let Some(inner) = obj.get("verses") {
                return verses_from_value(inner);
            }
            obj.iter()
                .filter_map(|(k, v)| Some((k.trim().parse::<u32>().ok()?, verse_text(v)?)))
                .collect()
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| match item {
                Value::String(s) => Some((u32::try_from(i + 1).ok()?, s.clone())),
                Value::Object(obj) => Some((first_number(obj, &["number", "vnumber", "verse"])?, verse_text(item)?)),
                _ => None,
            })
            .collect(),
        _ => VerseMap::new(),
    }
}

/// Chapter numbers from a `chapters.json` listing: `[1, 2]`, `["1", "2"]`,
/// `[{ "number": 1 }]` or `{ "chapters": [...] }`.
pub fn chapter_list(value: &Value) -> Vec<u32> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => match obj.get("chapters") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };
    let mut numbers: Vec<u32> = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(obj) => chapter_number(obj),
            other => number_of(other),
        })
        .collect();
    numbers.sort_unstable();
    numbers.dedup();
    numbers
}
