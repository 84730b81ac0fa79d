//! Line records of the two geo datasets.
//!
//! Both camelCase and the snake_case export spelling are accepted.

use serde::{Deserialize, Deserializer};

/// One line of `ancient.jsonl`: an ancient place and where it is mentioned.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceMention {
    #[serde(alias = "id", alias = "place_id")]
    pub place_id: String,
    #[serde(default, alias = "friendly_id", alias = "friendlyId", alias = "name", alias = "place_name")]
    pub place_name: Option<String>,
    /// OSIS references such as `Gen.12.8` or `Gen.12.8-Gen.12.9`.
    #[serde(default, alias = "verses", alias = "verse_references", deserialize_with = "osis_refs")]
    pub verse_references: Vec<String>,
    #[serde(default)]
    pub identifications: Vec<Identification>,
}

impl PlaceMention {
    pub fn display_name(&self) -> &str {
        self.place_name.as_deref().unwrap_or(&self.place_id)
    }

    /// References that fall inside `osis` chapter `chapter`.
    pub fn references_in(&self, osis: &str, chapter: u32) -> Vec<String> {
        let exact = format!("{osis}.{chapter}");
        let prefix = format!("{exact}.");
        self.verse_references
            .iter()
            .filter(|r| **r == exact || r.starts_with(&prefix))
            .cloned()
            .collect()
    }
}

/// A modern-site identification of a place, optionally illustrated.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    #[serde(default, alias = "id", alias = "modern_id")]
    pub modern_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "image_id", alias = "image")]
    pub image_id: Option<String>,
    #[serde(default, alias = "image_ids", alias = "images")]
    pub image_ids: Vec<String>,
}

impl Identification {
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.image_id.iter().chain(self.image_ids.iter()).map(String::as_str)
    }
}

/// One line of `image.jsonl`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: String,
    #[serde(default)]
    pub url: String,
    /// Per-image thumbnail pattern; `{width}` is substituted when present.
    #[serde(default, alias = "thumbnail", alias = "thumbnail_url")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub credit: String,
    #[serde(default, alias = "credit_url")]
    pub credit_url: String,
    #[serde(default)]
    pub license: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OsisRef {
    Plain(String),
    Tagged { osis: String },
}

fn osis_refs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs: Vec<OsisRef> = Vec::deserialize(deserializer)?;
    Ok(refs
        .into_iter()
        .map(|r| match r {
            OsisRef::Plain(s) | OsisRef::Tagged { osis: s } => s,
        })
        .collect())
}
