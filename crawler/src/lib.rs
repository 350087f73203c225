pub mod crawl;
pub mod fetch;
pub mod scope;

pub use crawl::{crawl, crawl_concurrent, CrawlConfig, CrawlError, CrawlSummary};
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use scope::Scope;
