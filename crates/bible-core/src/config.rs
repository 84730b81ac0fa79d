//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `BIBLE_*` env vars
//! (`__` separates nesting, e.g. `BIBLE_CONTENT__DATA_DIR`). The engine reads its
//! settings from the `[content]` table as a [`ContentConfig`]; every field has
//! a default so a missing file or table is not an error.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::types::Language;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Same as [`Config::load`], reading the TOML files from `dir`.
    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("BIBLE_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[content]` table, or defaults when it is absent.
    pub fn content(&self) -> anyhow::Result<ContentConfig> {
        if self.figment.contains("content") {
            self.get("content")
        } else {
            Ok(ContentConfig::default())
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        let content = self.content()?;
        if content.loader == LoaderKind::Http && content.base_url.as_deref().map_or(true, str::is_empty) {
            return Err(anyhow::anyhow!("content.loader = \"http\" requires content.base_url"));
        }
        Ok(())
    }
}

/// Which [`crate::traits::SourceLoader`] backs the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    #[default]
    #[serde(alias = "fs")]
    Filesystem,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContentConfig {
    pub loader: LoaderKind,
    /// Corpus root for the filesystem loader; relative paths resolve against
    /// the working directory.
    pub data_dir: String,
    /// Corpus root for the HTTP loader.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub http_timeout_secs: u64,
    pub manifest_file: String,
    pub books_index_file: String,
    pub translations_dir: String,
    pub commentaries_dir: String,
    pub summaries_dir: String,
    /// Resolution cache capacity in book and chapter entries; 0 disables eviction.
    pub cache_capacity: usize,
    /// Parsed whole sources kept at once, counted apart from `cache_capacity`;
    /// 0 disables eviction.
    pub max_cached_sources: usize,
    /// Display language per source key, for sources whose manifest entry
    /// carries no `language` of its own.
    pub display_languages: BTreeMap<String, Language>,
    pub geo: GeoConfig,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            loader: LoaderKind::Filesystem,
            data_dir: "data".to_string(),
            base_url: None,
            http_timeout_secs: 10,
            manifest_file: "manifest.json".to_string(),
            books_index_file: "books-index.json".to_string(),
            translations_dir: "bibles".to_string(),
            commentaries_dir: "commentaries".to_string(),
            summaries_dir: "summaries".to_string(),
            cache_capacity: 256,
            max_cached_sources: 8,
            display_languages: BTreeMap::from([("hsv".to_string(), Language::Nl)]),
            geo: GeoConfig::default(),
        }
    }
}

impl ContentConfig {
    pub fn data_root(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.data_dir)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeoConfig {
    pub places_file: String,
    pub images_file: String,
    /// `{id}` and `{width}` are substituted per image.
    pub thumbnail_url_pattern: String,
    pub thumbnail_width: u32,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            places_file: "geo/ancient.jsonl".to_string(),
            images_file: "geo/image.jsonl".to_string(),
            thumbnail_url_pattern: "https://a.openbible.info/geo/thumbnails/{width}/{id}.jpg".to_string(),
            thumbnail_width: 512,
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
