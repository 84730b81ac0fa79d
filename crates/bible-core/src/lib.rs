//! bible-core
//!
//! Shared vocabulary of the content engine: book-name normalization, domain
//! types, the error taxonomy, the `SourceLoader` seam and configuration.

pub mod books;
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::SourceLoader;
