use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use bible_core::config::GeoConfig;
use bible_geo::GeoOverlay;
use bible_loader::FilesystemLoader;

const ANCIENT: &str = r#"{"placeId":"a-eden","placeName":"Eden","verseReferences":["Gen.2.8","Gen.2.10"],"identifications":[{"modernId":"m-eden","description":"unknown","imageId":"img-river"}]}
{"placeId":"a-bethel","placeName":"Bethel","verseReferences":["Gen.12.8","Gen.28.19"],"identifications":[{"modernId":"m-beitin","description":"<i>Beitin</i>","imageId":"img-beitin"},{"modernId":"m-burj","description":"Burj Beitin","imageIds":["img-beitin","img-burj"]}]}
{"placeId":"a-ai","placeName":"Ai","verseReferences":["Gen.12.8","Josh.7.2"],"identifications":[{"modernId":"m-tell","description":"et-Tell","imageId":"img-beitin"}]}
{"placeId":"a-haran","placeName":"Haran","verseReferences":["Gen.11.31","Gen.12.4-Gen.12.5"],"identifications":[{"modernId":"m-harran","description":"Harran","imageId":"img-harran"}]}
"#;

const IMAGES: &str = r#"{"id":"img-river","url":"https://img.example.org/river.jpg","description":"","credit":"A","creditUrl":"https://a.example.org","license":"CC BY 4.0"}
{"id":"img-beitin","url":"https://img.example.org/beitin.jpg","description":"<p>Hills near <b>Beitin</b></p>","credit":"B","creditUrl":"https://b.example.org","license":"CC0"}
{"id":"img-burj","url":"https://img.example.org/burj.jpg","description":"Tower ruin","credit":"C","creditUrl":"https://c.example.org","license":"CC BY-SA 4.0"}
{"id":"img-harran","url":"https://img.example.org/harran.jpg","thumbnail":"https://img.example.org/harran-{width}.jpg","description":"Beehive houses","credit":"D","creditUrl":"https://d.example.org","license":"CC BY 2.0"}
"#;

fn overlay(root: &std::path::Path) -> GeoOverlay {
    GeoOverlay::new(Arc::new(FilesystemLoader::new(root)), GeoConfig::default())
}

fn write_datasets(root: &std::path::Path) -> anyhow::Result<()> {
    fs::create_dir_all(root.join("geo"))?;
    fs::write(root.join("geo/ancient.jsonl"), ANCIENT)?;
    fs::write(root.join("geo/image.jsonl"), IMAGES)?;
    Ok(())
}

#[tokio::test]
async fn images_for_chapter_deduplicates_by_id() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    write_datasets(tmp.path())?;
    let geo = overlay(tmp.path());

    let images = geo.images_for_chapter("Genesis", 12).await;
    let ids: Vec<&str> = images.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["img-beitin", "img-burj", "img-harran"]);
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());

    let beitin = &images[0];
    assert_eq!(beitin.place_name, "Bethel", "first occurrence wins");
    assert_eq!(beitin.modern_identifier, "m-beitin");
    assert_eq!(beitin.description, "Hills near Beitin");
    assert_eq!(beitin.verses, vec!["Gen.12.8"]);
    assert_eq!(beitin.thumbnail_url, "https://a.openbible.info/geo/thumbnails/512/img-beitin.jpg");

    let harran = &images[2];
    assert_eq!(harran.verses, vec!["Gen.12.4-Gen.12.5"]);
    assert_eq!(harran.thumbnail_url, "https://img.example.org/harran-512.jpg");
    Ok(())
}

#[tokio::test]
async fn dutch_names_and_missing_chapters() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    write_datasets(tmp.path())?;
    let geo = overlay(tmp.path());

    let eden = geo.images_for_chapter("genesis", 2).await;
    assert_eq!(eden.len(), 1);
    assert_eq!(eden[0].description, "unknown", "falls back to the identification description");

    let jozua = geo.images_for_chapter("Jozua", 7).await;
    assert_eq!(jozua.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["img-beitin"]);

    assert!(geo.images_for_chapter("Genesis", 1).await.is_empty());
    assert!(geo.images_for_chapter("NoSuchBook", 12).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_datasets_yield_no_images() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let geo = overlay(tmp.path());
    assert!(geo.images_for_chapter("Genesis", 12).await.is_empty());
    assert_eq!(geo.data().await.place_count(), 0);
    Ok(())
}
