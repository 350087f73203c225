use anyhow::{Context, Result};
use clap::Parser;
use common::indexio::{load_index, save_index};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indextest")]
#[command(about = "Load an index file and save it again under a new name", long_about = None)]
struct Cli {
    index_filename: PathBuf,
    copy_filename: PathBuf,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let index = load_index(&cli.index_filename)
        .with_context(|| format!("loading index {}", cli.index_filename.display()))?;
    save_index(&index, &cli.copy_filename)
        .with_context(|| format!("writing index {}", cli.copy_filename.display()))?;
    tracing::info!(words = index.len(), "index copied");
    Ok(())
}
