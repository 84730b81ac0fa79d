use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bible_core::config::Config;
use bible_resolve::CatalogBuilder;

/// Scan a corpus and write its manifest and books index.
#[derive(Parser)]
#[command(name = "bible-indexer")]
struct Args {
    /// Corpus root; defaults to content.data_dir
    data_dir: Option<PathBuf>,

    #[arg(long, default_value = ".", env = "BIBLE_CONFIG_DIR")]
    config_dir: PathBuf,

    /// Print the catalog instead of writing it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load_from(&args.config_dir).context("loading configuration")?;
    let content = config.content()?;
    let data_dir = args.data_dir.unwrap_or_else(|| content.data_root(&args.config_dir));

    println!("Catalog indexer\n===============");
    println!("Data directory: {}", data_dir.display());

    let catalog = CatalogBuilder::from_config(&content).build(&data_dir)?;
    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&catalog.manifest)?);
        println!("{}", serde_json::to_string_pretty(&catalog.books_index)?);
        return Ok(());
    }
    catalog.write(&data_dir, &content)?;

    println!("Translations: {}", catalog.manifest.translations.len());
    println!("Commentaries: {}", catalog.manifest.commentaries.len());
    println!("Indexed book lists: {}", catalog.books_index.len());
    println!("Wrote {} and {}", content.manifest_file, content.books_index_file);
    Ok(())
}
