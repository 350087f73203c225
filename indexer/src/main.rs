use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the inverted word index of a crawled page directory", long_about = None)]
struct Cli {
    /// Directory written by the crawler
    page_directory: PathBuf,
    /// File to write the index to
    index_filename: PathBuf,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let index = indexer::run(&cli.page_directory, &cli.index_filename)?;
    eprintln!(
        "done: words={} occurrences={} -> {}",
        index.len(),
        index.total_occurrences(),
        cli.index_filename.display()
    );
    Ok(())
}
