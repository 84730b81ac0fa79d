mod common;

use bible_core::config::ContentConfig;
use bible_core::types::{Language, VersionInfo};
use bible_core::Error;

use common::*;

#[tokio::test]
async fn nested_dictionary_genesis_one() -> anyhow::Result<()> {
    let tmp = corpus()?;
    let store = store(tmp.path());

    let chapter = store.chapter("statenvertaling", "Genesis", 1).await.expect("chapter");
    assert_eq!(chapter.verses.get("1"), Some(GEN_1_1));
    assert_eq!(chapter.verses.len(), 2);

    for name in ["Statenvertaling", "Statenvertaling.json", "STATENVERTALING"] {
        assert_eq!(store.chapter(name, "genesis", 1).await, Some(chapter.clone()), "{name}");
    }
    Ok(())
}

#[tokio::test]
async fn hsv_books_render_in_dutch() -> anyhow::Result<()> {
    let tmp = corpus()?;
    let store = store(tmp.path());

    let books = store.books("hsv").await.expect("books");
    assert_eq!(books, vec!["Genesis", "Johannes", "Psalmen"]);

    // No index entry: derived from the source, shown as stored.
    assert_eq!(store.books("kjv").await.expect("books"), vec!["Genesis", "John"]);
    assert_eq!(store.books("nbg").await.expect("books"), vec!["Genesis", "Johannes"]);
    Ok(())
}

#[tokio::test]
async fn display_language_comes_from_the_manifest_or_config() -> anyhow::Result<()> {
    let tmp = corpus()?;
    let mut config = ContentConfig::default();
    config.display_languages.clear();
    config.display_languages.insert("statenvertaling".to_string(), Language::En);
    let store = store_with(tmp.path(), config);

    assert_eq!(store.books("hsv").await.expect("books"), vec!["Genesis", "John", "Psalms"]);
    assert_eq!(store.books("statenvertaling").await.expect("books"), vec!["Genesis", "John"]);
    Ok(())
}

#[tokio::test]
async fn unknown_book_is_not_found_and_not_cached() -> anyhow::Result<()> {
    let tmp = corpus()?;
    let store = store(tmp.path());

    assert!(store.chapter("kjv", "NoSuchBook", 1).await.is_none());
    assert!(matches!(store.try_chapter("kjv", "NoSuchBook", 1).await, Err(Error::BookNotFound { .. })));
    assert!(store.cache().keys().iter().all(|k| k.book.is_none()), "only the parsed source is cached");

    assert!(matches!(store.try_chapter("kjv", "Genesis", 50).await, Err(Error::ChapterNotFound { chapter: 50, .. })));
    assert!(store.cache().keys().iter().all(|k| k.chapter != Some(50)));

    assert!(store.chapter("kjv", "Genesis", 1).await.is_some());
    assert!(store.cache().keys().iter().any(|k| k.chapter == Some(1)));
    Ok(())
}

#[tokio::test]
async fn commentary_resolves_dutch_names_through_variants() -> anyhow::Result<()> {
    let tmp = corpus()?;
    let store = store(tmp.path());

    let dutch = store.commentary("matthew-henry", "Johannes", 3).await.expect("commentary");
    let english = store.commentary("matthew-henry", "John", 3).await.expect("commentary");
    assert_eq!(dutch, english);
    assert_eq!(dutch.len(), 2);
    assert!(store.commentary("matthew_henry", "Johannes", 4).await.is_none());

    // Categories are separate.
    assert!(store.chapter("matthew-henry", "John", 3).await.is_none());
    assert!(store.commentary("kjv", "John", 3).await.is_none());
    Ok(())
}

#[tokio::test]
async fn versions_follow_manifest_order() -> anyhow::Result<()> {
    let tmp = corpus()?;
    let store = store(tmp.path());

    let versions = store.versions().await;
    assert_eq!(versions.len(), 7);
    assert_eq!(versions[0], VersionInfo { id: "statenvertaling".into(), name: "Statenvertaling".into() });
    assert_eq!(versions[3], VersionInfo { id: "nbg".into(), name: "nbg".into() });
    assert_eq!(store.commentaries().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn failures_are_not_found_for_callers() -> anyhow::Result<()> {
    let tmp = corpus()?;
    let store = store(tmp.path());

    assert!(matches!(store.try_chapter("nope", "Genesis", 1).await, Err(Error::SourceNotFound(_))));
    assert!(matches!(store.try_chapter("missing", "Genesis", 1).await, Err(Error::SourceNotFound(_))));
    assert!(matches!(store.try_chapter("broken", "Genesis", 1).await, Err(Error::MalformedSource { .. })));
    assert!(store.chapter("broken", "Genesis", 1).await.is_none());
    assert!(store.books("broken").await.is_none());
    assert!(store.chapters("broken", "Genesis").await.is_none());

    // Other sources are unaffected.
    assert!(store.chapter("kjv", "Genesis", 1).await.is_some());
    Ok(())
}

#[tokio::test]
async fn missing_manifest_means_no_sources() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    write_sources(tmp.path())?;
    let store = store(tmp.path());

    assert!(store.versions().await.is_empty());
    assert!(store.chapter("kjv", "Genesis", 1).await.is_none());
    assert!(store.books("hsv").await.is_none());
    Ok(())
}

#[tokio::test]
async fn summaries_by_language() -> anyhow::Result<()> {
    let tmp = corpus()?;
    let store = store(tmp.path());

    assert_eq!(store.summary("Genesis", "nl").await.as_deref(), Some("Het boek van het begin."));
    assert_eq!(store.summary("genesis", "English").await.as_deref(), Some("The book of beginnings."));
    assert_eq!(store.summary("Psalms", "dutch").await.as_deref(), Some("Liederen."));
    assert!(store.summary("Exodus", "nl").await.is_none());
    assert!(store.summary("Genesis", "fr").await.is_none());
    assert!(matches!(store.try_summary("Genesis", "fr").await, Err(Error::InvalidConfig(_))));
    Ok(())
}

#[tokio::test]
async fn images_for_chapter_through_the_store() -> anyhow::Result<()> {
    let tmp = corpus()?;
    let store = store(tmp.path());

    let images = store.images_for_chapter("Genesis", 2).await;
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].description, "River");
    assert_eq!(images[0].place_name, "Eden");
    assert!(store.images_for_chapter("Genesis", 3).await.is_empty());
    Ok(())
}
