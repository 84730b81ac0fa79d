//! bible-resolve
//!
//! The content resolution engine. Given a version, a book name and a chapter
//! it finds the backing source through the manifest, loads it once, classifies
//! its JSON shape and extracts a uniform [`VerseMap`](bible_core::types::VerseMap),
//! trying Dutch and English spellings of the book along the way.
//!
//! [`ContentStore`] is the entry point; the other modules are its parts and
//! are public for the indexer and for tests.

pub mod book_index;
pub mod cache;
pub mod catalog;
pub mod manifest;
pub mod resolver;
pub mod shape;
pub mod store;
pub mod summary;

pub use catalog::{Catalog, CatalogBuilder};
pub use manifest::{source_key, Manifest, ManifestRegistry};
pub use shape::SourceShape;
pub use store::ContentStore;
