use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use bible_core::config::Config;
use bible_resolve::ContentStore;

#[derive(Parser)]
#[command(name = "bible", about = "Query the Bible content store")]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", env = "BIBLE_CONFIG_DIR")]
    config_dir: PathBuf,

    /// Overrides content.data_dir
    #[arg(long)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List translations
    Versions,
    /// List commentary sources
    Commentaries,
    /// Book names of a translation
    Books { version: String },
    /// Chapter numbers of a book
    Chapters { version: String, book: String },
    /// Verses of one chapter
    Chapter { version: String, book: String, chapter: u32 },
    /// Commentary on one chapter
    Commentary { source: String, book: String, chapter: u32 },
    /// Book summary in `en` or `nl`
    Summary { book: String, #[arg(default_value = "nl")] language: String },
    /// Place images for one chapter
    Images { book: String, chapter: u32 },
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn found<T: Serialize>(value: Option<T>, what: String) -> anyhow::Result<()> {
    match value {
        Some(v) => print(&v),
        None => anyhow::bail!("not found: {what}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_from(&cli.config_dir).context("loading configuration")?;
    let mut content = config.content()?;
    if let Some(dir) = cli.data_dir {
        content.data_dir = dir;
    }
    let store = ContentStore::from_config(content, &cli.config_dir)?;

    let outcome = match cli.command {
        Command::Versions => print(&store.versions().await),
        Command::Commentaries => print(&store.commentaries().await),
        Command::Books { version } => {
            let books = store.books(&version).await;
            found(books, version)
        }
        Command::Chapters { version, book } => {
            let chapters = store.chapters(&version, &book).await;
            found(chapters, format!("{version} {book}"))
        }
        Command::Chapter { version, book, chapter } => {
            let resolved = store.chapter(&version, &book, chapter).await;
            found(resolved, format!("{version} {book} {chapter}"))
        }
        Command::Commentary { source, book, chapter } => {
            let verses = store.commentary(&source, &book, chapter).await;
            found(verses, format!("{source} {book} {chapter}"))
        }
        Command::Summary { book, language } => {
            let summary = store.summary(&book, &language).await;
            found(summary, format!("{book} ({language})"))
        }
        Command::Images { book, chapter } => print(&store.images_for_chapter(&book, chapter).await),
    };
    outcome
}
