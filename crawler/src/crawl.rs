use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::pageio::save_page;
use common::webpage::normalize_url;
use common::{Depth, DocId, HashTable, HashTableError, LockedHashTable, LockedQueue, Page, PageError, Queue};
use thiserror::Error;
use tokio::time::sleep;
use url::Url;

use crate::fetch::{FetchError, Fetcher};
use crate::scope::Scope;

/// Buckets of the visited-URL table.
const VISITED_BUCKETS: usize = 4096;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: String,
    pub page_dir: PathBuf,
    pub max_depth: Depth,
    pub concurrency: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_saved: u32,
    pub max_depth_reached: Depth,
    pub failed_fetches: u32,
}

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("invalid seed url {url}: {source}")]
    InvalidSeed { url: String, source: url::ParseError },

    #[error("failed to fetch seed {url}: {source}")]
    SeedFetch { url: String, source: FetchError },

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Table(#[from] HashTableError),

    #[error("crawl worker stopped: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

fn same_url(seen: &String, key: &[u8]) -> bool { seen.as_bytes() == key }

/// What to do with a URL found on a page.
enum Link {
    External,
    Seen,
    New,
}

struct Seed {
    page: Page,
    scope: Scope,
}

async fn fetch_seed<F: Fetcher + ?Sized>(fetcher: &F, config: &CrawlConfig) -> Result<Seed, CrawlError> {
    let url = Url::parse(&config.seed)
        .map_err(|source| CrawlError::InvalidSeed { url: config.seed.clone(), source })?;
    let key = normalize_url(&url);
    let html = fetcher
        .fetch(&key)
        .await
        .map_err(|source| CrawlError::SeedFetch { url: key.clone(), source })?;
    Ok(Seed { page: Page::new(key, 0, html), scope: Scope::from_seed(&url) })
}

fn log_saved(page: &Page, id: DocId) {
    tracing::info!(id, depth = page.depth, url = %page.url, "saved page");
}

/// Breadth-first crawl on the calling task.
///
/// The seed is saved as page 1. Every internal URL is fetched at most once;
/// a failed fetch drops that URL for the rest of the crawl.
pub async fn crawl<F: Fetcher + ?Sized>(fetcher: &F, config: &CrawlConfig) -> Result<CrawlSummary, CrawlError> {
    let Seed { page, scope } = fetch_seed(fetcher, config).await?;
    let mut visited: HashTable<String> = HashTable::open(VISITED_BUCKETS)?;
    let mut frontier: Queue<Page> = Queue::open();
    let mut summary = CrawlSummary::default();
    let mut next_id: DocId = 1;

    save_page(&page, next_id, &config.page_dir)?;
    log_saved(&page, next_id);
    summary.pages_saved = 1;
    visited.put(page.url.clone(), page.url.as_bytes())?;
    frontier.put(page);

    while let Some(curr) = frontier.get() {
        if curr.depth >= config.max_depth { continue; }
        for url in curr.urls() {
            let link = if !scope.is_internal(&url) {
                Link::External
            } else if visited.search(url.as_bytes(), same_url).is_some() {
                Link::Seen
            } else {
                Link::New
            };
            match link {
                Link::External => tracing::debug!(%url, "external, skipped"),
                Link::Seen => tracing::debug!(%url, "already seen, skipped"),
                Link::New => {
                    visited.put(url.clone(), url.as_bytes())?;
                    match fetcher.fetch(&url).await {
                        Ok(html) => {
                            next_id += 1;
                            let page = Page::new(url, curr.depth + 1, html);
                            save_page(&page, next_id, &config.page_dir)?;
                            log_saved(&page, next_id);
                            summary.pages_saved += 1;
                            summary.max_depth_reached = summary.max_depth_reached.max(page.depth);
                            frontier.put(page);
                        }
                        Err(e) => {
                            tracing::warn!(%url, error = %e, "fetch failed, dropping");
                            summary.failed_fetches += 1;
                        }
                    }
                }
            }
        }
    }
    Ok(summary)
}

struct Shared<F: ?Sized> {
    fetcher: Arc<F>,
    scope: Scope,
    config: CrawlConfig,
    visited: LockedHashTable<String>,
    frontier: LockedQueue<Page>,
    next_id: AtomicU32,
    /// Pages enqueued whose links are not fully processed yet.
    pending: AtomicUsize,
    /// Set once any worker fails; the others drain out.
    stop: AtomicBool,
    saved: AtomicU32,
    failed: AtomicU32,
    deepest: AtomicU32,
}

impl<F: Fetcher + ?Sized> Shared<F> {
    async fn expand(&self, curr: &Page) -> Result<(), CrawlError> {
        if curr.depth >= self.config.max_depth { return Ok(()); }
        let links: Vec<String> = curr.urls().collect();
        for url in links {
            if self.stop.load(Ordering::SeqCst) { break; }
            if !self.scope.is_internal(&url) {
                tracing::debug!(%url, "external, skipped");
                continue;
            }
            if !self.visited.put_if_absent(url.clone(), url.as_bytes(), same_url)? {
                tracing::debug!(%url, "already seen, skipped");
                continue;
            }
            match self.fetcher.fetch(&url).await {
                Ok(html) => {
                    let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                    let page = Page::new(url, curr.depth + 1, html);
                    save_page(&page, id, &self.config.page_dir)?;
                    log_saved(&page, id);
                    self.saved.fetch_add(1, Ordering::SeqCst);
                    self.deepest.fetch_max(page.depth, Ordering::SeqCst);
                    self.pending.fetch_add(1, Ordering::SeqCst);
                    self.frontier.put(page);
                }
                Err(e) => {
                    tracing::warn!(%url, error = %e, "fetch failed, dropping");
                    self.failed.fetch_add(1, Ordering::SeqCst);
                }
            }
        }
        Ok(())
    }
}

/// Accounts for one dequeued page. Dropping it, including while unwinding out
/// of a panicking fetcher, releases the page from `pending`.
struct InFlight<'a, F: ?Sized>(&'a Shared<F>);

impl<F: ?Sized> Drop for InFlight<'_, F> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.stop.store(true, Ordering::SeqCst);
        }
        self.0.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

async fn worker<F: Fetcher + ?Sized>(shared: Arc<Shared<F>>) -> Result<(), CrawlError> {
    loop {
        if shared.stop.load(Ordering::SeqCst) {
            return Ok(());
        }
        let Some(curr) = shared.frontier.get() else {
            if shared.pending.load(Ordering::SeqCst) == 0 {
                return Ok(());
            }
            sleep(Duration::from_millis(5)).await;
            continue;
        };
        let _in_flight = InFlight(shared.as_ref());
        if let Err(e) = shared.expand(&curr).await {
            shared.stop.store(true, Ordering::SeqCst);
            return Err(e);
        }
    }
}

/// Crawl with `config.concurrency` worker tasks sharing a locked frontier and
/// visited set. Depth bounds and single fetch per URL hold as in [`crawl`];
/// pages of different depths may interleave.
pub async fn crawl_concurrent<F>(fetcher: Arc<F>, config: &CrawlConfig) -> Result<CrawlSummary, CrawlError>
where
    F: Fetcher + ?Sized + 'static,
{
    let Seed { page, scope } = fetch_seed(fetcher.as_ref(), config).await?;
    save_page(&page, 1, &config.page_dir)?;
    log_saved(&page, 1);

    let visited = LockedHashTable::open(VISITED_BUCKETS)?;
    visited.put(page.url.clone(), page.url.as_bytes())?;
    let frontier = LockedQueue::open();
    frontier.put(page);

    let shared = Arc::new(Shared {
        fetcher,
        scope,
        config: config.clone(),
        visited,
        frontier,
        next_id: AtomicU32::new(2),
        pending: AtomicUsize::new(1),
        stop: AtomicBool::new(false),
        saved: AtomicU32::new(1),
        failed: AtomicU32::new(0),
        deepest: AtomicU32::new(0),
    });

    let handles: Vec<_> = (0..config.concurrency.max(1))
        .map(|_| tokio::spawn(worker(Arc::clone(&shared))))
        .collect();
    let mut first_err = None;
    for h in handles {
        if let Err(e) = h.await.map_err(CrawlError::from).and_then(|r| r) {
            first_err.get_or_insert(e);
        }
    }
    if let Some(e) = first_err {
        return Err(e);
    }

    Ok(CrawlSummary {
        pages_saved: shared.saved.load(Ordering::SeqCst),
        max_depth_reached: shared.deepest.load(Ordering::SeqCst),
        failed_fetches: shared.failed.load(Ordering::SeqCst),
    })
}
