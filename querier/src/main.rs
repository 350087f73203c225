use anyhow::{bail, Result};
use clap::Parser;
use querier::{run, OutputFormat, Querier};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "querier")]
#[command(about = "Answer AND/OR word queries from stdin using a crawled index")]
struct Args {
    /// Directory written by the crawler
    page_directory: PathBuf,
    /// Index file written by the indexer
    index_filename: PathBuf,
    /// Print one JSON object per query instead of text lines
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    if !args.page_directory.is_dir() {
        bail!("page directory {} does not exist", args.page_directory.display());
    }
    let querier = Querier::open(&args.page_directory, &args.index_filename)?;
    let format = if args.json { OutputFormat::Json } else { OutputFormat::Text };

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    run(&querier, stdin.lock(), io::stdout().lock(), format, prompt)?;
    Ok(())
}
