use std::fs;

use bible_core::{Error, SourceLoader};
use bible_loader::FilesystemLoader;

#[tokio::test]
async fn fetches_files_and_reports_missing_as_none() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    fs::create_dir_all(tmp.path().join("bibles/nbg/Genesis"))?;
    fs::write(tmp.path().join("manifest.json"), r#"{"translations":[]}"#)?;
    fs::write(tmp.path().join("bibles/nbg/Genesis/Genesis1.json"), r#"{"1":"In het begin"}"#)?;

    let loader = FilesystemLoader::new(tmp.path());
    assert_eq!(loader.fetch_text("manifest.json").await?.as_deref(), Some(r#"{"translations":[]}"#));
    assert!(loader.fetch_text("nope.json").await?.is_none());
    assert!(loader.fetch_text("bibles/nbg/Genesis").await?.is_none(), "directories are not files");

    let chapter = loader.fetch_json("bibles/nbg/Genesis/Genesis1.json").await.expect("json");
    assert_eq!(chapter["1"], serde_json::json!("In het begin"));
    Ok(())
}

#[tokio::test]
async fn lists_directories_sorted() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let dir = tmp.path().join("bibles/nbg/Genesis");
    fs::create_dir_all(&dir)?;
    for n in [2, 1, 10] {
        fs::write(dir.join(format!("Genesis{n}.json")), "{}")?;
    }

    let loader = FilesystemLoader::new(tmp.path());
    let names = loader.list_dir("bibles/nbg/Genesis").await?.expect("listing");
    assert_eq!(names, vec!["Genesis1.json", "Genesis10.json", "Genesis2.json"]);
    assert!(loader.list_dir("bibles/missing").await?.is_none());
    assert!(loader.list_dir("bibles/nbg/Genesis/Genesis1.json").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn refuses_paths_outside_the_root() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let inner = tmp.path().join("corpus");
    fs::create_dir_all(&inner)?;
    fs::write(tmp.path().join("secret.json"), "{}")?;

    let loader = FilesystemLoader::new(&inner);
    assert!(matches!(loader.fetch_text("../secret.json").await, Err(Error::InvalidPath(_))));
    assert!(loader.fetch_json("../secret.json").await.is_none());
    Ok(())
}
