//! bible-geo
//!
//! Geo-annotation overlay: archival images of places mentioned in a chapter.
//!
//! Two line-delimited datasets are read once per [`GeoOverlay`]: place
//! mentions keyed by OSIS verse references (`ancient.jsonl`) and an image
//! catalog (`image.jsonl`). Book names go through the shared normalizer and
//! then to OSIS codes, which is what the datasets are keyed by.

pub mod records;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::OnceCell;

use bible_core::books;
use bible_core::config::GeoConfig;
use bible_core::types::GeoImage;
use bible_core::SourceLoader;

pub use records::{Identification, ImageRecord, PlaceMention};

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Plain text of an HTML fragment.
pub fn strip_html(input: &str) -> String {
    let without_tags = RE_TAG.replace_all(input, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    RE_WS.replace_all(decoded.trim(), " ").into_owned()
}

/// Both datasets, in memory.
#[derive(Debug, Default, Clone)]
pub struct GeoData {
    places: Vec<PlaceMention>,
    images: HashMap<String, ImageRecord>,
}

impl GeoData {
    pub fn from_jsonl(places: &str, images: &str) -> Self {
        let places: Vec<PlaceMention> = parse_jsonl(places, "places");
        let images = parse_jsonl::<ImageRecord>(images, "images")
            .into_iter()
            .map(|img| (img.id.clone(), img))
            .collect();
        Self { places, images }
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Images of places referenced in `osis` chapter `chapter`, unique by id.
    pub fn images_for_chapter(&self, osis: &str, chapter: u32, config: &GeoConfig) -> Vec<GeoImage> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        for place in &self.places {
            let verses = place.references_in(osis, chapter);
            if verses.is_empty() {
                continue;
            }
            for ident in &place.identifications {
                for image_id in ident.images() {
                    let Some(image) = self.images.get(image_id) else {
                        tracing::debug!(image_id, place = %place.place_id, "image missing from catalog");
                        continue;
                    };
                    if !seen.insert(image.id.as_str()) {
                        continue;
                    }
                    let description = if image.description.trim().is_empty() { &ident.description } else { &image.description };
                    out.push(GeoImage {
                        id: image.id.clone(),
                        url: image.url.clone(),
                        thumbnail_url: thumbnail_url(image, config),
                        description: strip_html(description),
                        credit: image.credit.clone(),
                        credit_url: image.credit_url.clone(),
                        license: image.license.clone(),
                        place_name: place.display_name().to_string(),
                        verses: verses.clone(),
                        modern_identifier: ident.modern_id.clone(),
                    });
                }
            }
        }
        out
    }
}

fn thumbnail_url(image: &ImageRecord, config: &GeoConfig) -> String {
    let width = config.thumbnail_width.to_string();
    match image.thumbnail_url.as_deref() {
        Some(pattern) if !pattern.is_empty() => pattern.replace("{width}", &width),
        _ => config.thumbnail_url_pattern.replace("{id}", &image.id).replace("{width}", &width),
    }
}

fn parse_jsonl<T: DeserializeOwned>(text: &str, label: &str) -> Vec<T> {
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(record) => out.push(record),
            Err(e) => tracing::warn!(dataset = label, line = lineno + 1, error = %e, "skipping malformed record"),
        }
    }
    out
}

/// Lazily loaded overlay over a [`SourceLoader`].
pub struct GeoOverlay {
    loader: Arc<dyn SourceLoader>,
    config: GeoConfig,
    data: OnceCell<GeoData>,
}

impl GeoOverlay {
    pub fn new(loader: Arc<dyn SourceLoader>, config: GeoConfig) -> Self {
        Self { loader, config, data: OnceCell::new() }
    }

    pub async fn data(&self) -> &GeoData {
        self.data.get_or_init(|| self.load()).await
    }

    async fn load(&self) -> GeoData {
        let places = self.read(&self.config.places_file).await;
        let images = self.read(&self.config.images_file).await;
        let data = GeoData::from_jsonl(&places, &images);
        tracing::info!(places = data.place_count(), images = data.image_count(), "geo datasets loaded");
        data
    }

    async fn read(&self, path: &str) -> String {
        match self.loader.fetch_text(path).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::warn!(path, "geo dataset missing");
                String::new()
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "geo dataset unreadable");
                String::new()
            }
        }
    }

    pub async fn images_for_chapter(&self, book: &str, chapter: u32) -> Vec<GeoImage> {
        let Some(osis) = books::osis_code(book) else {
            tracing::debug!(book, "no OSIS code for book");
            return Vec::new();
        };
        self.data().await.images_for_chapter(osis, chapter, &self.config)
    }
}
