use async_trait::async_trait;
use common::pageio::{load_page, page_ids};
use crawler::{crawl, crawl_concurrent, CrawlConfig, CrawlError, FetchError, Fetcher};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

const SEED: &str = "https://site.test/";

/// Serves a fixed set of pages and records every URL it was asked for.
struct MapFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MapFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        let pages = pages.iter().map(|(u, h)| (u.to_string(), h.to_string())).collect();
        Self { pages, calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<String> { self.calls.lock().clone() }
}

#[async_trait]
impl Fetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().push(url.to_string());
        self.pages.get(url).cloned().ok_or(FetchError::Status(404))
    }
}

// seed -> a, b, missing, external, a again
// a -> c, seed
// b -> c
// c -> d
fn site() -> MapFetcher {
    MapFetcher::new(&[
        (
            "https://site.test/",
            r#"<a href="a.html">A</a> <a href="/b.html#top">B</a> <a href="missing.html">gone</a>
               <a href="https://elsewhere.test/x">out</a> <a href="https://site.test/a.html">A again</a>"#,
        ),
        ("https://site.test/a.html", r#"<a href="c.html">C</a> <a href="/">home</a>"#),
        ("https://site.test/b.html", r#"<a href="c.html">C</a>"#),
        ("https://site.test/c.html", r#"<a href="d.html">D</a>"#),
        ("https://site.test/d.html", "<p>leaf</p>"),
    ])
}

fn config(dir: &Path, max_depth: u32, concurrency: usize) -> CrawlConfig {
    CrawlConfig { seed: SEED.to_string(), page_dir: dir.to_path_buf(), max_depth, concurrency }
}

fn saved(dir: &Path) -> BTreeMap<String, u32> {
    page_ids(dir)
        .unwrap()
        .into_iter()
        .map(|id| {
            let p = load_page(id, dir).unwrap();
            (p.url, p.depth)
        })
        .collect()
}

#[tokio::test]
async fn breadth_first_within_depth() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = site();
    let summary = crawl(&fetcher, &config(dir.path(), 2, 1)).await.unwrap();

    assert_eq!(summary.pages_saved, 4);
    assert_eq!(summary.failed_fetches, 1);
    assert_eq!(summary.max_depth_reached, 2);
    assert_eq!(page_ids(dir.path()).unwrap(), vec![1, 2, 3, 4]);

    let order: Vec<String> = (1..=4).map(|id| load_page(id, dir.path()).unwrap().url).collect();
    assert_eq!(
        order,
        vec![
            "https://site.test/",
            "https://site.test/a.html",
            "https://site.test/b.html",
            "https://site.test/c.html",
        ]
    );
    assert_eq!(load_page(1, dir.path()).unwrap().depth, 0);
    assert_eq!(load_page(4, dir.path()).unwrap().depth, 2);
}

#[tokio::test]
async fn every_url_fetched_once() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = site();
    crawl(&fetcher, &config(dir.path(), 5, 1)).await.unwrap();

    let mut calls = fetcher.calls();
    let total = calls.len();
    calls.sort();
    calls.dedup();
    assert_eq!(total, calls.len(), "a url was fetched twice");
    assert!(!calls.iter().any(|u| u.contains("elsewhere.test")));
    assert!(calls.contains(&"https://site.test/missing.html".to_string()));
    assert_eq!(saved(dir.path()).get("https://site.test/d.html"), Some(&3));
}

#[tokio::test]
async fn depth_zero_saves_only_seed() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = site();
    let summary = crawl(&fetcher, &config(dir.path(), 0, 1)).await.unwrap();
    assert_eq!(summary.pages_saved, 1);
    assert_eq!(fetcher.calls(), vec![SEED.to_string()]);
    assert_eq!(page_ids(dir.path()).unwrap(), vec![1]);
}

#[tokio::test]
async fn seed_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = MapFetcher::new(&[]);
    let err = crawl(&fetcher, &config(dir.path(), 1, 1)).await.unwrap_err();
    assert!(matches!(err, CrawlError::SeedFetch { .. }));
    assert!(page_ids(dir.path()).unwrap().is_empty());
}

#[tokio::test]
async fn malformed_seed_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = site();
    let mut cfg = config(dir.path(), 1, 1);
    cfg.seed = "not a url".into();
    let err = crawl(&fetcher, &cfg).await.unwrap_err();
    assert!(matches!(err, CrawlError::InvalidSeed { .. }));
    assert!(fetcher.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_crawl_matches_sequential() {
    let seq_dir = tempfile::tempdir().unwrap();
    crawl(&site(), &config(seq_dir.path(), 3, 1)).await.unwrap();

    let par_dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(site());
    let summary = crawl_concurrent(Arc::clone(&fetcher), &config(par_dir.path(), 3, 4)).await.unwrap();

    assert_eq!(summary.pages_saved, 5);
    assert_eq!(saved(par_dir.path()), saved(seq_dir.path()));
    assert_eq!(page_ids(par_dir.path()).unwrap(), vec![1, 2, 3, 4, 5]);

    let mut calls = fetcher.calls();
    let total = calls.len();
    calls.sort();
    calls.dedup();
    assert_eq!(total, calls.len());
}

/// Delegates to [`site`] but panics when asked for one URL.
struct PanicOn {
    inner: MapFetcher,
    url: &'static str,
}

#[async_trait]
impl Fetcher for PanicOn {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if url == self.url {
            panic!("fetcher blew up on {url}");
        }
        self.inner.fetch(url).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn panicking_fetcher_fails_the_concurrent_crawl() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(PanicOn { inner: site(), url: "https://site.test/b.html" });
    let cfg = config(dir.path(), 3, 3);
    let run = crawl_concurrent(fetcher, &cfg);
    let res = tokio::time::timeout(std::time::Duration::from_secs(10), run)
        .await
        .expect("crawl must finish after a worker panics");
    assert!(matches!(res, Err(CrawlError::Worker(_))), "got {res:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn single_worker_panic_does_not_hang() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(PanicOn { inner: site(), url: "https://site.test/d.html" });
    let cfg = config(dir.path(), 3, 1);
    let run = crawl_concurrent(fetcher, &cfg);
    let res = tokio::time::timeout(std::time::Duration::from_secs(10), run).await.unwrap();
    assert!(matches!(res, Err(CrawlError::Worker(_))));
}
