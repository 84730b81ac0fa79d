//! Domain types shared by the loader, resolver and geo overlay.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Display language of a source's book names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Language {
    #[serde(rename = "en", alias = "english", alias = "EN")]
    En,
    #[serde(rename = "nl", alias = "dutch", alias = "NL")]
    Nl,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Nl => "nl",
        }
    }
}

impl FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::En),
            "nl" | "dutch" | "nederlands" => Ok(Language::Nl),
            other => Err(crate::Error::InvalidConfig(format!("unknown language '{other}'"))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Physical layout of one content source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// One aggregate JSON file.
    #[default]
    File,
    /// A directory of per-book files or per-book chapter directories.
    #[serde(alias = "dir")]
    Directory,
}

/// Which half of the manifest an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Translation,
    Commentary,
}

/// One content source as listed in the manifest.
///
/// - `name`: source key, also the directory name for `Directory` entries
/// - `files`: for `File`, the file name (first element); for `Directory`,
///   every book-level file (`Genesis.json`) or chapter directory (`Genesis`)
/// - `language`: display language for book listings, when it differs from
///   the language the content is keyed in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", alias = "kind", default)]
    pub kind: SourceKind,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl ManifestEntry {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Entry of `getVersions()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub id: String,
    pub name: String,
}

/// Verse number to verse text for one chapter.
///
/// Keys are integers internally and serialize as decimal strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct VerseMap(BTreeMap<u32, String>);

impl VerseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, verse: u32, text: impl Into<String>) {
        self.0.insert(verse, text.into());
    }

    /// Lookup by decimal-string key, as callers see it.
    pub fn get(&self, key: &str) -> Option<&str> {
        key.trim().parse::<u32>().ok().and_then(|v| self.verse(v))
    }

    pub fn verse(&self, verse: u32) -> Option<&str> {
        self.0.get(&verse).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl FromIterator<(u32, String)> for VerseMap {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The unit returned by `getChapter`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedChapter {
    pub verses: VerseMap,
}

/// An archival image attached to a place mentioned in a chapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeoImage {
    pub id: String,
    pub url: String,
    pub thumbnail_url: String,
    pub description: String,
    pub credit: String,
    pub credit_url: String,
    pub license: String,
    pub place_name: String,
    pub verses: Vec<String>,
    pub modern_identifier: String,
}
