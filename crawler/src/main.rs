use anyhow::{bail, Context, Result};
use clap::Parser;
use common::Depth;
use crawler::{crawl, crawl_concurrent, CrawlConfig, HttpFetcher};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Crawl a site breadth-first, saving each page as <page_directory>/<id>")]
struct Cli {
    /// URL to start from; only links under its directory are followed
    seed_url: String,
    /// Directory for page files (created if missing)
    page_directory: PathBuf,
    /// Maximum link distance from the seed
    #[arg(allow_negative_numbers = true)]
    max_depth: i64,
    /// Number of concurrent fetch workers
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent header sent with every request
    #[arg(long, default_value = "tse-crawler/0.1")]
    user_agent: String,
    /// Largest response body accepted, in bytes
    #[arg(long, default_value_t = 2 * 1024 * 1024)]
    max_bytes: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();
    if args.max_depth < 0 {
        bail!("max depth must be non-negative, got {}", args.max_depth);
    }
    let max_depth = Depth::try_from(args.max_depth).context("max depth out of range")?;
    fs::create_dir_all(&args.page_directory)
        .with_context(|| format!("cannot create page directory {}", args.page_directory.display()))?;

    let fetcher = Arc::new(HttpFetcher::new(&args.user_agent, Duration::from_secs(args.timeout_secs), args.max_bytes)?);
    let config = CrawlConfig {
        seed: args.seed_url.clone(),
        page_dir: args.page_directory.clone(),
        max_depth,
        concurrency: args.concurrency,
    };
    eprintln!(
        "crawler: seed={} max_depth={} concurrency={} output={}",
        config.seed, config.max_depth, config.concurrency, config.page_dir.display()
    );

    let summary = if config.concurrency > 1 {
        crawl_concurrent(fetcher, &config).await?
    } else {
        crawl(fetcher.as_ref(), &config).await?
    };

    eprintln!(
        "done: saved={} deepest={} failed={} -> {}",
        summary.pages_saved, summary.max_depth_reached, summary.failed_fetches, config.page_dir.display()
    );
    Ok(())
}
